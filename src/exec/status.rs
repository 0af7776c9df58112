// src/exec/status.rs

use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

/// How a launched job ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// Normal exit with the given code.
    Exited(i32),
    /// Killed by the given signal.
    Signaled(i32),
    /// The program could not be executed at all.
    ExecFailed,
}

impl JobStatus {
    /// Status reported in the `Job <n> exited with status <code>` line.
    ///
    /// Signals collapse to 1; an exec failure is 255.
    pub fn reported_code(&self) -> i32 {
        match self {
            JobStatus::Exited(code) => *code,
            JobStatus::Signaled(_) => 1,
            JobStatus::ExecFailed => 255,
        }
    }
}

impl From<ExitStatus> for JobStatus {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => JobStatus::Exited(code),
            None => JobStatus::Signaled(status.signal().unwrap_or_default()),
        }
    }
}

/// One finished job, identified by its launch index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub index: usize,
    pub status: JobStatus,
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Job {} exited with status {}",
            self.index,
            self.status.reported_code()
        )
    }
}
