//! Redisplay coordinator.
//!
//! Remote sessions never paint the prompt themselves. They hold a
//! [`RefreshHandle`] and signal "output ready"; a single writer thread turns
//! each signal into one complete repaint (line break, prompt, unsent input)
//! handed to a [`PromptRepainter`]. The default repainter writes under the
//! terminal lock; a line editor that redraws its own line supplies its own.

use crate::console::prompt::render_prompt;
use crate::console::terminal::Terminal;
use crate::ports::{InputBuffer, PromptRepainter, PromptSource};
use std::io;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Bytes emitted before the prompt on every repaint.
pub const LINE_BREAK: &str = "\r\n";

enum Signal {
    Repaint,
    Stop,
}

/// Cloneable, thread-safe callback handed to the session multiplexer.
#[derive(Clone)]
pub struct RefreshHandle {
    sender: Sender<Signal>,
}

impl RefreshHandle {
    /// Request a repaint. Safe to call from any thread.
    pub fn on_output_ready(&self) {
        if self.sender.send(Signal::Repaint).is_err() {
            debug!("Redisplay requested after coordinator shutdown");
        }
    }
}

/// Repaints as one atomic batch on the shared terminal.
pub struct TerminalRepainter {
    terminal: Terminal,
}

impl TerminalRepainter {
    pub fn new(terminal: Terminal) -> Self {
        Self { terminal }
    }
}

impl PromptRepainter for TerminalRepainter {
    fn repaint(&mut self, prompt: &str, pending: &str) -> io::Result<()> {
        self.terminal.write_atomic(&[LINE_BREAK, prompt, pending])
    }
}

/// Owns the repaint writer thread.
pub struct RedisplayCoordinator {
    handle: Option<RefreshHandle>,
    worker: Option<JoinHandle<()>>,
}

impl RedisplayCoordinator {
    /// Start the writer thread, repainting on `terminal`.
    pub fn spawn(
        terminal: Terminal,
        prompt: Arc<dyn PromptSource>,
        input: Arc<dyn InputBuffer>,
    ) -> io::Result<Self> {
        Self::spawn_with(Box::new(TerminalRepainter::new(terminal)), prompt, input)
    }

    /// Start the writer thread with a custom repainter. The thread logs to the
    /// subscriber current at spawn time.
    pub fn spawn_with(
        repainter: Box<dyn PromptRepainter>,
        prompt: Arc<dyn PromptSource>,
        input: Arc<dyn InputBuffer>,
    ) -> io::Result<Self> {
        let (sender, receiver) = channel();
        let painter = Painter {
            repainter,
            prompt,
            input,
        };
        let dispatch = tracing::dispatcher::get_default(|current| current.clone());
        let worker = thread::Builder::new()
            .name("dust-redisplay".to_string())
            .spawn(move || {
                tracing::dispatcher::with_default(&dispatch, || painter.run(receiver))
            })?;
        Ok(Self {
            handle: Some(RefreshHandle { sender }),
            worker: Some(worker),
        })
    }

    /// A new handle for a session multiplexer.
    pub fn handle(&self) -> Option<RefreshHandle> {
        self.handle.clone()
    }

    /// Paint every repaint queued so far, then stop and join the writer.
    /// Signals sent afterwards through outstanding handles are dropped.
    pub fn shutdown(&mut self) {
        self.stop();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("Redisplay thread panicked");
            }
        }
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.sender.send(Signal::Stop);
        }
    }
}

impl Drop for RedisplayCoordinator {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Painter {
    repainter: Box<dyn PromptRepainter>,
    prompt: Arc<dyn PromptSource>,
    input: Arc<dyn InputBuffer>,
}

impl Painter {
    fn run(mut self, receiver: Receiver<Signal>) {
        while let Ok(Signal::Repaint) = receiver.recv() {
            self.repaint();
        }
        // Stop received, or every sender is gone.
        debug!("Redisplay thread stopped");
    }

    fn repaint(&mut self) {
        let prompt = render_prompt(self.prompt.as_ref());
        let pending = self.input.pending();
        // Any terminal guard is released before logging; a stdout log layer shares it.
        let result = self.repainter.repaint(&prompt, &pending);
        if let Err(e) = result {
            warn!("Failed to repaint prompt: {}", e);
        }
    }
}
