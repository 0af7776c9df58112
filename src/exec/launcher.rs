// src/exec/launcher.rs

//! Pluggable job launching.
//!
//! The engine talks to a [`JobLauncher`] instead of spawning processes itself.
//! [`ProcessLauncher`] is the production implementation; tests swap in a fake
//! that records launches and reports canned statuses.

use std::fs::{File, OpenOptions};
use std::future::Future;
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::pin::Pin;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::exec::status::JobStatus;
use crate::manifest::JobSpec;

/// Future resolving once a launched job has terminated.
pub type Termination = Pin<Box<dyn Future<Output = io::Result<JobStatus>> + Send + 'static>>;

/// Which way a job file was being opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Reading,
    Writing,
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Access::Reading => "reading",
            Access::Writing => "writing",
        })
    }
}

/// A job input or output that could not be opened.
#[derive(Debug, Error)]
#[error("Unable to open \"{path}\" for {access}")]
pub struct OpenFailure {
    pub path: String,
    pub access: Access,
    #[source]
    pub source: io::Error,
}

/// The already-open files a job's stdin/stdout get redirected to.
///
/// `None` means the stream is inherited from the supervisor.
#[derive(Debug, Default)]
pub struct JobIo {
    pub stdin: Option<File>,
    pub stdout: Option<File>,
}

impl JobIo {
    /// Open the job's input for reading and its output for writing.
    ///
    /// The output is created or truncated with owner read/write permissions.
    /// Both sides are always attempted, so a job can fail on both at once.
    pub fn open(job: &JobSpec) -> Result<JobIo, Vec<OpenFailure>> {
        let mut failures = Vec::new();

        let stdin = job.input.path().and_then(|path| {
            File::open(path)
                .map_err(|source| {
                    failures.push(OpenFailure {
                        path: path.to_string(),
                        access: Access::Reading,
                        source,
                    })
                })
                .ok()
        });

        let stdout = job.output.path().and_then(|path| {
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)
                .map_err(|source| {
                    failures.push(OpenFailure {
                        path: path.to_string(),
                        access: Access::Writing,
                        source,
                    })
                })
                .ok()
        });

        if failures.is_empty() {
            Ok(JobIo { stdin, stdout })
        } else {
            Err(failures)
        }
    }
}

/// Trait abstracting how an eligible job is started.
///
/// Launching must not wait for the job; the returned [`Termination`] is
/// awaited later by the supervisor.
pub trait JobLauncher: Send {
    /// Start `job` as launch number `index` with the given redirections.
    ///
    /// A job that cannot be started still yields a termination, resolving to
    /// [`JobStatus::ExecFailed`].
    fn launch(&mut self, index: usize, job: &JobSpec, io: JobIo) -> Termination;
}

/// Launcher spawning real child processes through `tokio::process`.
///
/// The program is looked up on `PATH`, stderr goes to the null device and
/// the child is left running if its termination future is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl JobLauncher for ProcessLauncher {
    fn launch(&mut self, index: usize, job: &JobSpec, io: JobIo) -> Termination {
        let mut cmd = Command::new(&job.program);
        cmd.args(&job.args).stderr(Stdio::null());

        if let Some(file) = io.stdin {
            cmd.stdin(Stdio::from(file));
        }
        if let Some(file) = io.stdout {
            cmd.stdout(Stdio::from(file));
        }

        match cmd.spawn() {
            Ok(mut child) => {
                info!(job = index, pid = child.id(), program = %job.program, "job launched");
                Box::pin(async move { child.wait().await.map(JobStatus::from) })
            }
            Err(err) => {
                debug!(job = index, program = %job.program, error = %err, "job could not be executed");
                Box::pin(std::future::ready(Ok(JobStatus::ExecFailed)))
            }
        }
    }
}
