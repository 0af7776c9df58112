// src/lib.rs

pub mod channels;
pub mod cli;
pub mod diag;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod manifest;

use tracing::info;

use crate::channels::{analyze_channels, resolve_eligible};
use crate::cli::CliArgs;
use crate::diag::Diagnostics;
use crate::errors::{JobrunnerError, Result};
use crate::exec::{Completion, Engine, JobLauncher, ProcessLauncher};
use crate::manifest::{check_files, load_manifests};

/// What a successful run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of jobs actually launched.
    pub launched: usize,
    /// One entry per launched job, in completion order.
    pub completions: Vec<Completion>,
}

/// High-level entry point used by `main.rs`.
///
/// Spawns real processes and writes diagnostics to stderr.
pub async fn run(args: &CliArgs) -> Result<RunSummary> {
    run_with(args, ProcessLauncher::new(), Diagnostics::stderr()).await
}

/// Run the whole pipeline with an explicit launcher and diagnostic sink.
///
/// This wires together:
/// - manifest openability check and parsing
/// - channel analysis and runnability resolution
/// - the launch loop
/// - waiting for and reporting every launched job
pub async fn run_with<L: JobLauncher>(
    args: &CliArgs,
    launcher: L,
    diag: Diagnostics,
) -> Result<RunSummary> {
    check_files(&args.jobfiles)?;
    let manifest = load_manifests(&args.jobfiles)?;

    let valid = analyze_channels(&manifest, &diag);
    let eligible = resolve_eligible(&manifest, &valid);

    let supervisor = Engine::new(launcher, diag.clone())
        .verbose(args.is_verbose())
        .launch_eligible(&manifest, &eligible);

    let launched = supervisor.launched();
    if launched == 0 {
        return Err(JobrunnerError::NoRunnableJobs);
    }

    let completions = supervisor.wait_all(&diag).await?;
    info!(launched, "run complete");

    Ok(RunSummary {
        launched,
        completions,
    })
}
