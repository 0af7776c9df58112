#![allow(dead_code)]

use std::path::{Path, PathBuf};

use jobrunner::cli::{self, CliArgs};

/// Builder for manifest file contents.
#[derive(Debug, Clone, Default)]
pub struct ManifestBuilder {
    lines: Vec<String>,
}

impl ManifestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw job line, e.g. `"cat,-,-"`.
    pub fn job(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn comment(mut self, text: &str) -> Self {
        self.lines.push(format!("# {text}"));
        self
    }

    pub fn blank(mut self) -> Self {
        self.lines.push(String::new());
        self
    }

    pub fn contents(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    /// Write the manifest as `dir/name` and return its path.
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.contents()).expect("failed to write manifest");
        path
    }
}

/// Parsed `CliArgs` for the given manifests.
pub fn cli_args(verbose: bool, files: &[PathBuf]) -> CliArgs {
    let mut argv = vec!["jobrunner".to_string()];
    if verbose {
        argv.push("-v".to_string());
    }
    argv.extend(files.iter().map(|p| p.display().to_string()));
    cli::parse_from(argv).expect("test arguments must be valid")
}
