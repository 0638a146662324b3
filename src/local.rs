//! Local command module: session commands that need no cluster connection.

use crate::console::prompt::RoutingContext;
use crate::console::registry::{CommandRegistry, GroupId};
use crate::console::terminal::Terminal;
use crate::error::ConsoleError;
use crate::logging::LogLevelHandle;
use crate::ports::{ClusterExecutor, CommandLoader, PromptSource};
use tracing::{info, warn};

/// Group name shown in help.
pub const LOCAL_GROUP: &str = "local";

const REGION_HELP: &str = "region [name] - show or set the active region\n\
    With a name, makes it the routing context shown in the prompt.\n\
    `region none` clears it.";

const LOGLEVEL_HELP: &str = "loglevel [level] - show or set the log level\n\
    Levels: trace, debug, info, warning, error, off.";

/// `region` and `loglevel`.
pub struct LocalCommands {
    routing: RoutingContext,
    log_level: LogLevelHandle,
    terminal: Terminal,
}

impl LocalCommands {
    pub fn new(routing: RoutingContext, log_level: LogLevelHandle, terminal: Terminal) -> Self {
        Self {
            routing,
            log_level,
            terminal,
        }
    }

    fn region(&self, args: &str) {
        match args {
            "" => match self.routing.region() {
                Some(region) => self.say(&format!("Active region: {}", region)),
                None => self.say("No active region"),
            },
            "none" => {
                self.routing.set_region(None);
                info!("Cleared active region");
            }
            region => {
                self.routing.set_region(Some(region.to_string()));
                info!("Active region set to {}", region);
            }
        }
    }

    fn loglevel(&self, args: &str) {
        if args.is_empty() {
            self.say(&format!("Log level: {}", self.log_level.current_level()));
            return;
        }
        match self.log_level.set_level(args) {
            Ok(()) => info!("Log level set to {}", self.log_level.current_level()),
            Err(e) => self.say(&e.to_string()),
        }
    }

    fn say(&self, text: &str) {
        if let Err(e) = self.terminal.write_line(text) {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl CommandLoader for LocalCommands {
    fn load_commands(&mut self, registry: &mut CommandRegistry) -> Result<(), ConsoleError> {
        let group = GroupId::new(LOCAL_GROUP);
        registry.register_dynamic(&group, "region", Some(REGION_HELP))?;
        registry.register_dynamic(&group, "loglevel", Some(LOGLEVEL_HELP))?;
        Ok(())
    }
}

impl ClusterExecutor for LocalCommands {
    fn handle_command(&mut self, verb: &str, args: &str) -> bool {
        match verb {
            "region" => self.region(args),
            "loglevel" => self.loglevel(args),
            _ => return false,
        }
        true
    }
}
