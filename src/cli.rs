// src/cli.rs

//! CLI argument parsing using `clap`.
//!
//! Any argument that is not one of our own flags is a jobfile, even when it
//! starts with `-`, so the vector is split into flags and files before `clap`
//! sees it. The rules `clap` cannot express (`-v` given twice, `-v` as the
//! very last argument) are checked on top and reported as
//! [`JobrunnerError::Usage`] like any other parse failure.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser, ValueEnum};

use crate::errors::{JobrunnerError, Result};

/// Command-line arguments for `jobrunner`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jobrunner",
    version,
    about = "Run the jobs listed in one or more manifest files.",
    long_about = None
)]
pub struct CliArgs {
    /// Print a trace line for every job before it is launched.
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `JOBRUNNER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Manifest files, processed in the order given.
    #[arg(required = true, value_name = "JOBFILE")]
    pub jobfiles: Vec<PathBuf>,
}

impl CliArgs {
    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Parse the process arguments.
///
/// `--help` and `--version` print and exit here, like a plain
/// `CliArgs::parse()` would.
pub fn parse() -> Result<CliArgs> {
    parse_from(std::env::args_os())
}

/// Parse an explicit argument vector (element 0 is the program name).
pub fn parse_from<I, T>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    if args.len() > 1 && args.last().is_some_and(|a| a == "-v") {
        return Err(JobrunnerError::Usage);
    }

    let parsed = match CliArgs::try_parse_from(flags_then_files(args)) {
        Ok(parsed) => parsed,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            tracing::debug!(error = %err, "rejected command line");
            return Err(JobrunnerError::Usage);
        }
    };

    if parsed.verbose > 1 {
        return Err(JobrunnerError::Usage);
    }

    Ok(parsed)
}

/// Reorder `args` as `program, flags.., --, files..`.
fn flags_then_files(args: Vec<OsString>) -> Vec<OsString> {
    let mut args = args.into_iter();
    let mut flags: Vec<OsString> = args.next().into_iter().collect();
    let mut files = Vec::new();

    while let Some(arg) = args.next() {
        let Some(text) = arg.to_str() else {
            files.push(arg);
            continue;
        };
        match text {
            "-v" | "-h" | "--help" | "-V" | "--version" => flags.push(arg),
            "--log-level" => {
                flags.push(arg);
                flags.extend(args.next());
            }
            t if t.starts_with("--log-level=") => flags.push(arg),
            _ => files.push(arg),
        }
    }

    flags.push("--".into());
    flags.extend(files);
    flags
}
