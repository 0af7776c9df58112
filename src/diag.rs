// src/diag.rs

//! The diagnostic stream.
//!
//! Trace lines, channel warnings, openability failures and completion reports
//! all end up here. Production code writes to stderr; tests hand in any other
//! writer and inspect what was written.

use std::fmt::Display;
use std::io::Write;
use std::sync::{Arc, Mutex};

/// Cloneable handle to a shared line-oriented writer.
///
/// Each call to [`Diagnostics::line`] writes one complete line under the lock,
/// so lines from different jobs never interleave mid-line.
#[derive(Clone)]
pub struct Diagnostics {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Diagnostics {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Diagnostics going to the process' stderr.
    pub fn stderr() -> Self {
        Self::new(std::io::stderr())
    }

    /// Write `msg` followed by a newline.
    ///
    /// Write failures are ignored; there is nowhere left to report them.
    pub fn line(&self, msg: impl Display) {
        let mut sink = match self.sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let _ = writeln!(sink, "{msg}");
        let _ = sink.flush();
    }
}

impl std::fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Diagnostics").finish_non_exhaustive()
    }
}
