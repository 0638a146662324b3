//! Dispatcher: built-ins, then cluster commands, then the host shell.

use crate::console::builtins::Builtin;
use crate::console::help::HelpRenderer;
use crate::console::line::ParsedCommand;
use crate::console::registry::CommandRegistry;
use crate::console::terminal::Terminal;
use crate::ports::{ClusterExecutor, HostShell};
use crate::style::Palette;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of dispatching one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Handled,
    /// No tier took the command (only possible with host fallback disabled).
    Unhandled,
}

/// One-shot Running -> Exiting transition shared with the read loop.
#[derive(Debug, Clone, Default)]
pub struct ExitFlag(Arc<AtomicBool>);

impl ExitFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag. Returns `true` only for the call that set it.
    pub fn trigger(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Routes parsed commands to the tier that handles them.
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    executor: Box<dyn ClusterExecutor>,
    shell: Box<dyn HostShell>,
    terminal: Terminal,
    palette: Palette,
    host_fallback: bool,
    exit: ExitFlag,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<CommandRegistry>,
        executor: Box<dyn ClusterExecutor>,
        shell: Box<dyn HostShell>,
        terminal: Terminal,
        palette: Palette,
    ) -> Self {
        Self {
            registry,
            executor,
            shell,
            terminal,
            palette,
            host_fallback: true,
            exit: ExitFlag::new(),
        }
    }

    /// Enable or disable tier 3 (host shell).
    pub fn with_host_fallback(mut self, enabled: bool) -> Self {
        self.host_fallback = enabled;
        self
    }

    pub fn exit_flag(&self) -> ExitFlag {
        self.exit.clone()
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Dispatch one command. Each call is independent apart from the exit flag.
    pub fn dispatch(&mut self, command: &ParsedCommand) -> Dispatch {
        if command.is_empty() {
            return Dispatch::Handled;
        }

        if let Some(builtin) = Builtin::from_verb(&command.verb) {
            self.run_builtin(builtin, &command.args);
            return Dispatch::Handled;
        }

        if self.executor.handle_command(&command.verb, &command.args) {
            debug!(verb = %command.verb, "Handled by cluster executor");
            return Dispatch::Handled;
        }

        if !self.host_fallback {
            warn!("unknown command: {}", command.verb);
            return Dispatch::Unhandled;
        }

        info!(
            "dust: [{}] unrecognized, trying system shell...",
            command.line.trim()
        );
        match self.shell.run(&command.line) {
            Ok(Some(0)) => {}
            Ok(code) => debug!(?code, "Host shell returned non-zero status"),
            Err(e) => warn!("Failed to run host shell: {}", e),
        }
        Dispatch::Handled
    }

    fn run_builtin(&mut self, builtin: Builtin, args: &str) {
        match builtin {
            Builtin::Help => {
                let renderer = HelpRenderer::new(&self.registry, &self.palette);
                let text = if args.is_empty() {
                    renderer.render_summary()
                } else {
                    renderer.render_detail(args)
                };
                self.emit(&text);
            }
            Builtin::Exit | Builtin::EndOfInput => self.exit(),
        }
    }

    fn exit(&mut self) {
        if !self.exit.trigger() {
            return;
        }
        info!("Exiting dust console. Find updates, file bugs at http://github.com/carlsborg/dust.");
        info!(
            "{}",
            self.palette.usage(
                "This is an early beta release. Consider updating to the latest dust release."
            )
        );
        self.executor.logout();
    }

    fn emit(&self, text: &str) {
        if let Err(e) = self.terminal.write_line(text) {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}
