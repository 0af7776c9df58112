use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use jobrunner::exec::{JobIo, JobLauncher, JobStatus, Termination};
use jobrunner::manifest::JobSpec;

/// What the fake launcher was asked to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRecord {
    pub index: usize,
    pub program: String,
    pub args: Vec<String>,
    pub redirected_stdin: bool,
    pub redirected_stdout: bool,
}

/// A fake launcher that:
/// - records which jobs were "launched", with their launch index
/// - immediately reports a canned status per program (default: exit 0).
#[derive(Clone, Default)]
pub struct FakeLauncher {
    launched: Arc<Mutex<Vec<LaunchRecord>>>,
    statuses: HashMap<String, JobStatus>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every job running `program` finish with `status`.
    pub fn with_status(mut self, program: &str, status: JobStatus) -> Self {
        self.statuses.insert(program.to_string(), status);
        self
    }

    /// Shared view of the launch log; stays valid after the launcher moves.
    pub fn log(&self) -> Arc<Mutex<Vec<LaunchRecord>>> {
        Arc::clone(&self.launched)
    }

    pub fn launched(&self) -> Vec<LaunchRecord> {
        self.launched.lock().unwrap().clone()
    }
}

impl JobLauncher for FakeLauncher {
    fn launch(&mut self, index: usize, job: &JobSpec, io: JobIo) -> Termination {
        self.launched.lock().unwrap().push(LaunchRecord {
            index,
            program: job.program.clone(),
            args: job.args.clone(),
            redirected_stdin: io.stdin.is_some(),
            redirected_stdout: io.stdout.is_some(),
        });

        let status = self
            .statuses
            .get(&job.program)
            .copied()
            .unwrap_or(JobStatus::Exited(0));
        Box::pin(std::future::ready(Ok(status)))
    }
}
