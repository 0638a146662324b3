//! Collaborator ports.
//!
//! The console only orchestrates text in and text out. Cloud access, remote
//! sessions, command modules and line editing live behind these traits.

use crate::console::redisplay::RefreshHandle;
use crate::console::registry::CommandRegistry;
use crate::error::ConsoleError;
use std::io;
use std::sync::Arc;

/// Executes registered cluster commands.
pub trait ClusterExecutor: Send {
    /// Run `verb` with its argument string. Returns `false` when the verb is not
    /// one this executor knows, which sends the line on to the host shell.
    ///
    /// Failures inside a recognized command are reported by the executor
    /// itself; they are still "recognized".
    fn handle_command(&mut self, verb: &str, args: &str) -> bool;

    /// Called once when the user leaves the shell.
    fn logout(&mut self) {}
}

/// Populates the registry with dynamic commands. Invoked once at startup.
pub trait CommandLoader {
    fn load_commands(&mut self, registry: &mut CommandRegistry) -> Result<(), ConsoleError>;
}

/// Owner of remote sessions that emit output asynchronously.
pub trait SessionMultiplexer {
    /// Install the callback fired whenever session output has been flushed to
    /// the terminal.
    fn set_refresh_callback(&mut self, handle: RefreshHandle);
}

/// Current routing context, used to render the prompt.
pub trait PromptSource: Send + Sync {
    /// Active region, if connected to one.
    fn region(&self) -> Option<String>;
}

/// Runs a raw line through the host shell.
pub trait HostShell: Send {
    /// Returns the shell's exit code (`None` when terminated by a signal).
    fn run(&self, line: &str) -> io::Result<Option<i32>>;
}

/// Writes one prompt repaint. Implementations own the ordering of that write
/// against every other writer of the same line.
pub trait PromptRepainter: Send {
    fn repaint(&mut self, prompt: &str, pending: &str) -> io::Result<()>;
}

/// Read-only view of the line the user is typing but has not sent.
pub trait InputBuffer: Send + Sync {
    fn pending(&self) -> String;
}

/// Result of one blocking read from the line editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C: the current line was discarded.
    Interrupted,
    /// Ctrl-D or closed input.
    EndOfInput,
}

/// Line-editing collaborator owning keystroke intake and the unsent buffer.
pub trait LineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ConsoleError>;

    /// Record a submitted line in history.
    fn record(&mut self, _line: &str) {}

    /// The buffer the redisplay coordinator repaints from.
    fn input_buffer(&self) -> Arc<dyn InputBuffer>;

    /// Repaint path owned by the editor, for editors that redraw their own
    /// line. `None` repaints through the shared terminal.
    fn repainter(&mut self) -> Option<Box<dyn PromptRepainter>> {
        None
    }

    fn persist_history(&mut self) -> Result<(), ConsoleError> {
        Ok(())
    }
}
