//! CLI route: run context. Wires configuration, persisted user data, and
//! collaborators into a console, runs it, and persists session state on exit.

use crate::cli::parse::Cli;
use crate::config::{ShellConfig, UserData};
use crate::console::dispatch::Dispatcher;
use crate::console::prompt::RoutingContext;
use crate::console::registry::CommandRegistry;
use crate::console::session::{Console, ConsoleParts};
use crate::console::terminal::Terminal;
use crate::editor::RustylineEditor;
use crate::error::ConsoleError;
use crate::local::LocalCommands;
use crate::logging::{normalize_level, LogLevelHandle};
use crate::ports::{ClusterExecutor, CommandLoader, HostShell, LineEditor, PromptSource};
use crate::shell::SystemShell;
use crate::style::Palette;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runtime context for one shell process.
pub struct RunContext {
    config: ShellConfig,
    user_data: UserData,
    user_data_path: PathBuf,
    routing: RoutingContext,
    terminal: Terminal,
    palette: Palette,
    log_level: LogLevelHandle,
    /// Level chosen outside user data (CLI flag, `DUST_LOG`, or logging disabled).
    log_level_pinned: bool,
    /// Level in effect once the console starts; compared on exit.
    session_level: String,
}

impl RunContext {
    /// Apply CLI overrides to `config` and load persisted user data.
    /// Unreadable user data is a startup error.
    pub fn new(
        cli: &Cli,
        mut config: ShellConfig,
        terminal: Terminal,
        log_level: LogLevelHandle,
    ) -> Result<Self, ConsoleError> {
        if cli.no_color {
            config.shell.color = false;
        }
        if cli.no_shell_fallback {
            config.shell.host_fallback = false;
        }

        let user_data_path = config.shell.user_data_path()?;
        let user_data = UserData::load(&user_data_path)?;
        let routing = RoutingContext::new(user_data.region.clone());
        let palette = Palette::new(config.shell.color);

        let log_level_pinned = cli.verbose
            || cli.quiet
            || cli.log_level.is_some()
            || !config.logging.enabled
            || std::env::var_os("DUST_LOG").is_some();
        let session_level = match (&user_data.loglevel, log_level_pinned) {
            (Some(saved), false) => normalize_level(saved)
                .map(str::to_string)
                .unwrap_or_else(|_| log_level.current_level()),
            _ => log_level.current_level(),
        };

        Ok(Self {
            config,
            user_data,
            user_data_path,
            routing,
            terminal,
            palette,
            log_level,
            log_level_pinned,
            session_level,
        })
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn routing(&self) -> &RoutingContext {
        &self.routing
    }

    /// Build the console: built-ins, then command modules, then collaborators.
    pub fn build_console(
        &self,
        editor: Box<dyn LineEditor>,
        shell: Box<dyn HostShell>,
    ) -> Result<Console, ConsoleError> {
        let mut registry = CommandRegistry::with_builtins()?;
        let mut local = LocalCommands::new(
            self.routing.clone(),
            self.log_level.clone(),
            self.terminal.clone(),
        );
        local.load_commands(&mut registry)?;
        debug!(commands = registry.len(), "Command registry loaded");

        // A saved level replaces the configured one unless something pinned it
        if let (Some(level), false) = (&self.user_data.loglevel, self.log_level_pinned) {
            local.handle_command("loglevel", level);
        }

        let dispatcher = Dispatcher::new(
            Arc::new(registry),
            Box::new(local),
            shell,
            self.terminal.clone(),
            self.palette,
        )
        .with_host_fallback(self.config.shell.host_fallback);

        Console::start(ConsoleParts {
            dispatcher,
            editor,
            prompt: Arc::new(self.routing.clone()),
            terminal: self.terminal.clone(),
            palette: self.palette,
        })
    }

    /// Run the interactive shell until exit.
    pub fn execute(&mut self) -> Result<(), ConsoleError> {
        let editor = RustylineEditor::new(
            Some(self.config.shell.history_path()?),
            self.config.shell.history_size,
        )?;
        self.run_with(Box::new(editor), Box::new(SystemShell::new()))
    }

    /// Run with the given editor and host shell, then persist session state.
    pub fn run_with(
        &mut self,
        editor: Box<dyn LineEditor>,
        shell: Box<dyn HostShell>,
    ) -> Result<(), ConsoleError> {
        let mut console = self.build_console(editor, shell)?;
        console.run();
        console.finish();
        if let Err(e) = self.persist_session() {
            warn!("Failed to save user data: {}", e);
        }
        Ok(())
    }

    /// Write the active region and log level back to user data when either
    /// changed during the session. A pinned level is never persisted.
    pub fn persist_session(&mut self) -> Result<(), ConsoleError> {
        let mut changed = false;

        let region = self.routing.region();
        if region != self.user_data.region {
            self.user_data.region = region;
            changed = true;
        }

        if !self.log_level_pinned {
            let level = self.log_level.current_level();
            if normalize_level(&level).ok() != normalize_level(&self.session_level).ok() {
                self.user_data.loglevel = Some(level);
                changed = true;
            }
        }

        if !changed {
            return Ok(());
        }
        self.user_data.save(&self.user_data_path)?;
        info!("Saved session settings to {}", self.user_data_path.display());
        Ok(())
    }
}
