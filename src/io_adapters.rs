use std::io::{Result as IoResult, Write};
use std::sync::{Arc, Mutex};

/// Memory-backed writer for capturing everything a [`crate::Renderer`]
/// emits.
///
/// Public so tests in other modules (and embedders) can construct one and
/// inspect the collected bytes. The buffer is shared behind `Arc<Mutex<..>>`
/// because background tasks may still be writing while the test thread
/// reads.
pub struct MemWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemWriter {
    pub fn new() -> Self {
        Self {
            buf: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Convenience: create a writer and return (writer, shared handle) so the
    /// caller can read the collected bytes after the writer has been handed
    /// off to a renderer.
    pub fn with_handle() -> (Self, Arc<Mutex<Vec<u8>>>) {
        let mw = MemWriter::new();
        let handle = mw.buf.clone();
        (mw, handle)
    }
}

impl Default for MemWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> IoResult<usize> {
        if let Ok(mut buf) = self.buf.lock() {
            buf.extend_from_slice(data);
        }
        Ok(data.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}
