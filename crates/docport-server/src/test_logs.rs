//! Error-level log capture for tests.

use std::io;
use std::sync::{Arc, Mutex};

use tracing::subscriber::DefaultGuard;

/// Shared buffer collecting formatted log output.
#[derive(Clone, Default)]
pub(crate) struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Captured output, one entry per log line.
    pub(crate) fn lines(&self) -> Vec<String> {
        let output = String::from_utf8(self.0.lock().unwrap().clone()).unwrap();
        output.lines().map(str::to_owned).collect()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Capture error-level events on the current thread until the guard drops.
pub(crate) fn capture_error_logs() -> (DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::ERROR)
        .with_ansi(false)
        .without_time()
        .finish();

    (tracing::subscriber::set_default(subscriber), buffer)
}
