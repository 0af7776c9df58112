// src/manifest/loader.rs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::{JobrunnerError, Result};
use crate::manifest::model::Manifest;
use crate::manifest::parse::parse_job;
use crate::manifest::reader::{is_blank, is_comment, read_line, split_fields};

/// Check that every manifest can be opened for reading.
///
/// Stops at the first failure, before anything is parsed.
pub fn check_files(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        File::open(path).map_err(|source| JobrunnerError::ManifestUnreadable {
            path: path.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Load and parse all manifests, in order, into one [`Manifest`].
///
/// The first malformed job line aborts the whole load.
pub fn load_manifests(paths: &[PathBuf]) -> Result<Manifest> {
    let mut manifest = Manifest::new();

    for path in paths {
        let file = File::open(path).map_err(|source| JobrunnerError::ManifestUnreadable {
            path: path.clone(),
            source,
        })?;
        let before = manifest.len();
        read_manifest(path, BufReader::new(file), &mut manifest)?;
        debug!(file = %path.display(), jobs = manifest.len() - before, "manifest parsed");
    }

    info!(files = paths.len(), jobs = manifest.len(), "manifests loaded");
    Ok(manifest)
}

/// Parse the job lines of one manifest into `manifest`.
///
/// `path` is only used to label the lines and the error.
pub fn read_manifest<R: BufRead>(path: &Path, mut reader: R, manifest: &mut Manifest) -> Result<()> {
    let mut raw_line = 0;

    // A read error mid-file is reported like an unopenable manifest.
    let unreadable = |source: std::io::Error| JobrunnerError::ManifestUnreadable {
        path: path.to_path_buf(),
        source,
    };

    while let Some(line) = read_line(&mut reader).map_err(unreadable)? {
        raw_line += 1;
        if is_comment(&line) || is_blank(&line) {
            continue;
        }

        let fields = split_fields(&line);
        let job = parse_job(&fields).map_err(|err| {
            debug!(file = %path.display(), line = raw_line, error = %err, "rejected job line");
            JobrunnerError::InvalidJobSpec {
                path: path.to_path_buf(),
                line: raw_line,
            }
        })?;

        manifest.push(path.to_path_buf(), raw_line, job);
    }

    Ok(())
}
