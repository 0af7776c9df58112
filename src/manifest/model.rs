// src/manifest/model.rs

use std::fmt;
use std::path::PathBuf;

/// Marker that turns an input/output field into a channel reference.
pub const CHANNEL_MARKER: char = '@';

/// Where a job reads its standard input from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobInput {
    /// Inherit the supervisor's stdin.
    Stdin,
    File(String),
    /// `@name` reference; opened as a literal path once validated.
    Channel(String),
}

/// Where a job writes its standard output to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutput {
    /// Inherit the supervisor's stdout.
    Stdout,
    File(String),
    /// `@name` reference; opened as a literal path once validated.
    Channel(String),
}

impl JobInput {
    /// Classify a raw input field (`-` and `stdin` both mean inherit).
    pub fn from_field(field: &str) -> Self {
        match field {
            "-" | "stdin" => JobInput::Stdin,
            f if f.starts_with(CHANNEL_MARKER) => JobInput::Channel(f.to_string()),
            f => JobInput::File(f.to_string()),
        }
    }

    pub fn channel(&self) -> Option<&str> {
        match self {
            JobInput::Channel(token) => Some(token.as_str()),
            _ => None,
        }
    }

    /// Path to open for reading, or `None` when stdin is inherited.
    pub fn path(&self) -> Option<&str> {
        match self {
            JobInput::Stdin => None,
            JobInput::File(p) | JobInput::Channel(p) => Some(p.as_str()),
        }
    }
}

impl JobOutput {
    /// Classify a raw output field (`-` and `stdout` both mean inherit).
    pub fn from_field(field: &str) -> Self {
        match field {
            "-" | "stdout" => JobOutput::Stdout,
            f if f.starts_with(CHANNEL_MARKER) => JobOutput::Channel(f.to_string()),
            f => JobOutput::File(f.to_string()),
        }
    }

    pub fn channel(&self) -> Option<&str> {
        match self {
            JobOutput::Channel(token) => Some(token.as_str()),
            _ => None,
        }
    }

    /// Path to open for writing, or `None` when stdout is inherited.
    pub fn path(&self) -> Option<&str> {
        match self {
            JobOutput::Stdout => None,
            JobOutput::File(p) | JobOutput::Channel(p) => Some(p.as_str()),
        }
    }
}

impl fmt::Display for JobInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path().unwrap_or("stdin"))
    }
}

impl fmt::Display for JobOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path().unwrap_or("stdout"))
    }
}

/// One parsed job description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub program: String,
    pub input: JobInput,
    pub output: JobOutput,
    /// Seconds. Parsed and traced, never enforced.
    pub timeout: u64,
    pub args: Vec<String>,
}

/// A job together with where it came from.
#[derive(Debug, Clone)]
pub struct ManifestLine {
    /// 1-based position among all job lines of all manifests.
    pub number: usize,
    pub file: PathBuf,
    /// 1-based raw line within `file`, comments and blanks included.
    pub raw_line: usize,
    pub job: JobSpec,
}

/// Every job line of every manifest, in command-line then file order.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    lines: Vec<ManifestLine>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a job; its line number is the next free one.
    pub fn push(&mut self, file: PathBuf, raw_line: usize, job: JobSpec) -> usize {
        let number = self.lines.len() + 1;
        self.lines.push(ManifestLine {
            number,
            file,
            raw_line,
            job,
        });
        number
    }

    pub fn lines(&self) -> &[ManifestLine] {
        &self.lines
    }

    pub fn jobs(&self) -> impl Iterator<Item = &JobSpec> {
        self.lines.iter().map(|l| &l.job)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl FromIterator<JobSpec> for Manifest {
    /// Build a manifest from bare specs, as if they came from one anonymous
    /// file with no comments.
    fn from_iter<T: IntoIterator<Item = JobSpec>>(iter: T) -> Self {
        let mut manifest = Manifest::new();
        for (i, job) in iter.into_iter().enumerate() {
            manifest.push(PathBuf::new(), i + 1, job);
        }
        manifest
    }
}
