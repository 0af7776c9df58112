// src/manifest/mod.rs

//! Manifest loading and the job model.
//!
//! Responsibilities:
//! - Read manifest files line by line (`reader.rs`).
//! - Parse one job line into a [`JobSpec`] (`parse.rs`).
//! - Define the job model and the ordered manifest (`model.rs`).
//! - Check openability and load every manifest in order (`loader.rs`).

pub mod loader;
pub mod model;
pub mod parse;
pub mod reader;

pub use loader::{check_files, load_manifests, read_manifest};
pub use model::{JobInput, JobOutput, JobSpec, Manifest, ManifestLine, CHANNEL_MARKER};
pub use parse::{parse_job, ParseError};
