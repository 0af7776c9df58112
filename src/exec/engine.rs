// src/exec/engine.rs

use tracing::{debug, info};

use crate::channels::EligibleLines;
use crate::diag::Diagnostics;
use crate::exec::launcher::{JobIo, JobLauncher};
use crate::exec::supervisor::Supervisor;
use crate::manifest::{JobSpec, Manifest};

/// Walks the manifest and launches every eligible job, in manifest order.
pub struct Engine<L> {
    launcher: L,
    diag: Diagnostics,
    verbose: bool,
}

impl<L: JobLauncher> Engine<L> {
    pub fn new(launcher: L, diag: Diagnostics) -> Self {
        Self {
            launcher,
            diag,
            verbose: false,
        }
    }

    /// Emit a trace line for each job right before it is launched.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Launch the eligible jobs and return the supervisor tracking them.
    ///
    /// For each eligible line, the job's input and output are opened first;
    /// if either fails the job is skipped with an `Unable to open` line and
    /// takes no launch index. Launch indices are handed out 1, 2, 3... in
    /// launch order.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn launch_eligible(&mut self, manifest: &Manifest, eligible: &EligibleLines) -> Supervisor {
        let mut supervisor = Supervisor::new();

        for line in manifest.lines() {
            if !eligible.contains(line.number) {
                debug!(line = line.number, "line not eligible; skipping");
                continue;
            }

            let io = match JobIo::open(&line.job) {
                Ok(io) => io,
                Err(failures) => {
                    for failure in &failures {
                        debug!(line = line.number, error = %failure.source, "job file not openable");
                        self.diag.line(failure);
                    }
                    continue;
                }
            };

            let index = supervisor.launched() + 1;
            if self.verbose {
                self.diag.line(trace_line(index, &line.job));
            }

            let termination = self.launcher.launch(index, &line.job, io);
            supervisor.register(index, termination);
        }

        info!(launched = supervisor.launched(), "launch phase complete");
        supervisor
    }
}

/// `<seq>:<program>:<input>:<output>:<timeout>[:<arg>]*`
pub fn trace_line(seq: usize, job: &JobSpec) -> String {
    let mut line = format!(
        "{seq}:{}:{}:{}:{}",
        job.program, job.input, job.output, job.timeout
    );
    for arg in &job.args {
        line.push(':');
        line.push_str(arg);
    }
    line
}
