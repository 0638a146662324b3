//! Shared terminal output stream.
//!
//! Every write that reaches the user's terminal (prompt repaints, command
//! output rendered by the console, and log lines when logging targets stdout)
//! goes through one `Terminal`. A write batch holds the lock for its whole
//! duration, so two batches never interleave at the byte level.

use parking_lot::{Mutex, MutexGuard};
use std::io::{self, Write};
use std::sync::Arc;
use tracing_subscriber::fmt::MakeWriter;

type Sink = Box<dyn Write + Send>;

/// Cloneable handle to the exclusive terminal writer.
#[derive(Clone)]
pub struct Terminal {
    sink: Arc<Mutex<Sink>>,
}

impl Terminal {
    /// Terminal backed by the process stdout.
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    /// Terminal backed by an arbitrary writer (tests use an in-memory buffer).
    pub fn from_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Acquire the terminal for a multi-part write.
    ///
    /// Do not log while holding the guard: a stdout log layer writes through
    /// this same lock.
    pub fn lock(&self) -> TerminalGuard<'_> {
        TerminalGuard {
            inner: self.sink.lock(),
        }
    }

    /// Write all parts and flush as one uninterrupted batch.
    pub fn write_atomic(&self, parts: &[&str]) -> io::Result<()> {
        let mut out = self.lock();
        for part in parts {
            out.write_all(part.as_bytes())?;
        }
        out.flush()
    }

    /// Write a block of text followed by a newline.
    pub fn write_line(&self, text: &str) -> io::Result<()> {
        self.write_atomic(&[text, "\n"])
    }
}

/// Exclusive access to the terminal for the lifetime of the guard.
pub struct TerminalGuard<'a> {
    inner: MutexGuard<'a, Sink>,
}

impl Write for TerminalGuard<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

impl<'a> MakeWriter<'a> for Terminal {
    type Writer = TerminalGuard<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        self.lock()
    }
}

/// In-memory writer whose contents can be inspected after the fact.
#[derive(Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
