// src/exec/supervisor.rs

//! Waiting for launched jobs and reporting how they ended.

use std::collections::HashMap;
use std::io;

use tokio::task::{Id, JoinSet};
use tracing::{debug, info};

use crate::diag::Diagnostics;
use crate::errors::{JobrunnerError, Result};
use crate::exec::launcher::Termination;
use crate::exec::status::{Completion, JobStatus};

/// Bookkeeping for every launched job.
///
/// Each termination future runs in its own task of a [`JoinSet`]; the task id
/// handed out at registration is the handle used to find the job's launch
/// index again when it completes.
#[derive(Default)]
pub struct Supervisor {
    waiters: JoinSet<io::Result<JobStatus>>,
    index_of: HashMap<Id, usize>,
    launched: usize,
}

impl Supervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of jobs registered so far.
    pub fn launched(&self) -> usize {
        self.launched
    }

    /// Start waiting on a launched job.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn register(&mut self, index: usize, termination: Termination) {
        let handle = self.waiters.spawn(termination);
        self.index_of.insert(handle.id(), index);
        self.launched += 1;
    }

    /// Wait for every registered job, in completion order.
    ///
    /// One `Job <n> exited with status <code>` line is written to `diag` per
    /// job as it finishes. Any failure to collect a status is fatal.
    pub async fn wait_all(mut self, diag: &Diagnostics) -> Result<Vec<Completion>> {
        let mut completions = Vec::with_capacity(self.launched);

        for _ in 0..self.launched {
            let (id, status) = match self.waiters.join_next_with_id().await {
                Some(Ok((id, Ok(status)))) => (id, status),
                Some(Ok((id, Err(err)))) => {
                    return Err(JobrunnerError::WaitFailed(format!("task {id}: {err}")));
                }
                Some(Err(err)) => return Err(JobrunnerError::WaitFailed(err.to_string())),
                None => {
                    return Err(JobrunnerError::WaitFailed(
                        "no launched jobs left to wait for".to_string(),
                    ));
                }
            };

            let index = self.index_of.remove(&id).ok_or_else(|| {
                JobrunnerError::WaitFailed(format!("completion from unknown task {id}"))
            })?;

            let completion = Completion { index, status };
            debug!(job = index, ?status, "job finished");
            diag.line(completion);
            completions.push(completion);
        }

        info!(jobs = completions.len(), "all launched jobs finished");
        Ok(completions)
    }
}
