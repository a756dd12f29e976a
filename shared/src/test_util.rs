//! Helpers shared by unit tests.

use std::io::Write;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a scoped fmt subscriber and returns its result together
/// with everything the local logger wrote.
pub(crate) fn capture_local_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let writer = CaptureWriter::default();
    let sink = writer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || sink.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);

    let bytes = writer.0.lock().unwrap().clone();
    (result, String::from_utf8(bytes).unwrap())
}
