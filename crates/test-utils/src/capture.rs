use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use jobrunner::diag::Diagnostics;

/// In-memory diagnostic stream for assertions.
#[derive(Clone, Default)]
pub struct CapturedDiagnostics {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CapturedDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A `Diagnostics` handle writing into this capture.
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics::new(self.clone())
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.text().lines().map(str::to_string).collect()
    }
}

impl Write for CapturedDiagnostics {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
