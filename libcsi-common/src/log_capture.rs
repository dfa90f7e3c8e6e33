//! Collects `tracing` output emitted while a closure runs, for tests that
//! assert on diagnostics.

use std::io;
use std::sync::{Arc, Mutex};

use tracing::Level;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Formatted records, one per line, as `LEVEL target: message fields`.
pub(crate) struct Records(Vec<String>);

impl Records {
    /// Lines recorded at `level`.
    pub(crate) fn at(&self, level: Level) -> Vec<&str> {
        let tag = level.as_str();
        self.0
            .iter()
            .map(|l| l.trim_start())
            .filter(|l| l.starts_with(tag))
            .collect()
    }
}

/// Run `f` with a thread-local subscriber and return its result together
/// with every record emitted.
pub(crate) fn capture<T>(f: impl FnOnce() -> T) -> (T, Records) {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .without_time()
        .with_max_level(Level::TRACE)
        .finish();

    let out = tracing::subscriber::with_default(subscriber, f);
    let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
    let lines = text.lines().map(str::to_owned).collect();
    (out, Records(lines))
}
