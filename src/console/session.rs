//! Console session: the foreground read-eval loop.

use crate::console::dispatch::{Dispatch, Dispatcher, ExitFlag};
use crate::console::help::banner;
use crate::console::line::{parse, ParsedCommand};
use crate::console::prompt::render_prompt;
use crate::console::redisplay::{RedisplayCoordinator, RefreshHandle, TerminalRepainter};
use crate::console::terminal::Terminal;
use crate::error::ConsoleError;
use crate::ports::{LineEditor, PromptRepainter, PromptSource, ReadOutcome, SessionMultiplexer};
use crate::style::Palette;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Everything a console needs, assembled by the caller.
pub struct ConsoleParts {
    pub dispatcher: Dispatcher,
    pub editor: Box<dyn LineEditor>,
    pub prompt: Arc<dyn PromptSource>,
    pub terminal: Terminal,
    pub palette: Palette,
}

/// Interactive console: one foreground loop plus the redisplay writer.
pub struct Console {
    dispatcher: Dispatcher,
    editor: Box<dyn LineEditor>,
    prompt: Arc<dyn PromptSource>,
    redisplay: RedisplayCoordinator,
    exit: ExitFlag,
}

impl Console {
    /// Start the redisplay writer and print the banner. Repaints go through
    /// the editor's own repainter when it has one, otherwise the terminal.
    pub fn start(parts: ConsoleParts) -> Result<Self, ConsoleError> {
        let mut editor = parts.editor;
        let repainter = editor
            .repainter()
            .unwrap_or_else(|| {
                Box::new(TerminalRepainter::new(parts.terminal.clone())) as Box<dyn PromptRepainter>
            });
        let redisplay = RedisplayCoordinator::spawn_with(
            repainter,
            Arc::clone(&parts.prompt),
            editor.input_buffer(),
        )?;
        let exit = parts.dispatcher.exit_flag();

        if let Err(e) = parts.terminal.write_line(&parts.palette.accent(&banner())) {
            warn!("Failed to write banner: {}", e);
        }

        Ok(Self {
            dispatcher: parts.dispatcher,
            editor,
            prompt: parts.prompt,
            redisplay,
            exit,
        })
    }

    /// Handle for collaborators that produce asynchronous output.
    pub fn refresh_handle(&self) -> Option<RefreshHandle> {
        self.redisplay.handle()
    }

    /// Register this console's redisplay callback with a session multiplexer.
    pub fn attach(&self, multiplexer: &mut dyn SessionMultiplexer) {
        if let Some(handle) = self.refresh_handle() {
            multiplexer.set_refresh_callback(handle);
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.exit.is_set()
    }

    /// Parse and dispatch one line.
    pub fn run_line(&mut self, line: &str) -> Dispatch {
        self.dispatcher.dispatch(&parse(line))
    }

    /// Read and dispatch lines until the exit flag is set.
    pub fn run(&mut self) {
        while !self.exit.is_set() {
            let prompt = render_prompt(self.prompt.as_ref());
            match self.editor.read_line(&prompt) {
                Ok(ReadOutcome::Line(line)) => {
                    if !line.trim().is_empty() {
                        self.editor.record(&line);
                    }
                    self.run_line(&line);
                }
                Ok(ReadOutcome::Interrupted) => continue,
                Ok(ReadOutcome::EndOfInput) => {
                    self.dispatcher.dispatch(&ParsedCommand::end_of_input());
                }
                Err(e) => {
                    error!("Failed to read input: {}", e);
                    self.dispatcher.dispatch(&ParsedCommand::end_of_input());
                }
            }
        }
        info!("Console loop finished");
    }

    /// Persist history and stop the redisplay writer.
    pub fn finish(mut self) {
        if let Err(e) = self.editor.persist_history() {
            warn!("Failed to save command history: {}", e);
        }
        self.redisplay.shutdown();
    }
}
