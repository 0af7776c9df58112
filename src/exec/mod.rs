// src/exec/mod.rs

//! Process execution layer.
//!
//! - [`engine`] walks the manifest, checks each eligible job's files, prints
//!   the optional trace and launches it.
//! - [`launcher`] provides the `JobLauncher` trait and the real
//!   `ProcessLauncher` built on `tokio::process::Command`. Tests can replace
//!   it with a fake implementation.
//! - [`supervisor`] keeps the launch-index table and reports completions.
//! - [`status`] maps raw exit statuses to reported codes.

pub mod engine;
pub mod launcher;
pub mod status;
pub mod supervisor;

pub use engine::{trace_line, Engine};
pub use launcher::{Access, JobIo, JobLauncher, OpenFailure, ProcessLauncher, Termination};
pub use status::{Completion, JobStatus};
pub use supervisor::Supervisor;
