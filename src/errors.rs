// src/errors.rs

//! Crate-wide error type.
//!
//! Every variant is fatal for the whole run. The `Display` text is the exact
//! line printed on the diagnostic stream, and [`JobrunnerError::exit_code`]
//! gives the process exit status `main` terminates with.

use std::path::PathBuf;

use thiserror::Error;

/// Usage line printed for any command-line error.
pub const USAGE: &str = "Usage: jobrunner [-v] jobfile [jobfile ...]";

#[derive(Error, Debug)]
pub enum JobrunnerError {
    #[error("{}", USAGE)]
    Usage,

    #[error("jobrunner: file \"{}\" can not be opened", .path.display())]
    ManifestUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("jobrunner: invalid job specification on line {line} of \"{}\"", .path.display())]
    InvalidJobSpec { path: PathBuf, line: usize },

    #[error("jobrunner: no runnable jobs")]
    NoRunnableJobs,

    #[error("jobrunner: waiting for jobs failed: {0}")]
    WaitFailed(String),
}

impl JobrunnerError {
    pub fn exit_code(&self) -> i32 {
        match self {
            JobrunnerError::Usage => 1,
            JobrunnerError::ManifestUnreadable { .. } => 2,
            JobrunnerError::InvalidJobSpec { .. } => 3,
            JobrunnerError::NoRunnableJobs => 4,
            JobrunnerError::WaitFailed(_) => 255,
        }
    }
}

pub type Result<T> = std::result::Result<T, JobrunnerError>;
