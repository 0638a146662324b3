//! Command registry: built-in verbs merged with dynamically registered commands.
//!
//! Built-ins are registered first and dynamic commands are added once at
//! startup by command loaders. After startup the registry is shared read-only.
//! Every verb is unique across both sets; a collision is a startup error.

use crate::console::builtins::BUILTINS;
use crate::error::ConsoleError;
use std::collections::HashMap;
use std::fmt;

/// Identifier of the command module that contributed a dynamic command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered command. `group` is `None` for built-ins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    pub name: String,
    pub help: Option<String>,
    pub group: Option<GroupId>,
}

/// Usage line of a help text split into synopsis and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage<'a> {
    pub synopsis: &'a str,
    pub description: &'a str,
}

impl CommandEntry {
    pub fn is_builtin(&self) -> bool {
        self.group.is_none()
    }

    /// First non-blank line of the help text.
    pub fn usage_line(&self) -> Option<&str> {
        self.help
            .as_deref()?
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
    }

    /// Usage line split at its last `-`. `None` when there is no help text or
    /// the usage line carries no separator.
    pub fn usage(&self) -> Option<Usage<'_>> {
        let (synopsis, description) = self.usage_line()?.rsplit_once('-')?;
        Some(Usage {
            synopsis: synopsis.trim(),
            description: description.trim(),
        })
    }

    /// Full help text with surrounding blank lines and indentation removed.
    pub fn detail(&self) -> Option<String> {
        let help = self.help.as_deref()?;
        let lines: Vec<&str> = help
            .lines()
            .map(str::trim)
            .skip_while(|line| line.is_empty())
            .collect();
        let end = lines
            .iter()
            .rposition(|line| !line.is_empty())
            .map(|i| i + 1)
            .unwrap_or(0);
        if end == 0 {
            return None;
        }
        Some(lines[..end].join("\n"))
    }
}

/// Dynamic commands of one group, in registration order.
#[derive(Debug)]
pub struct CommandGroup<'a> {
    pub id: &'a GroupId,
    pub commands: Vec<&'a CommandEntry>,
}

/// Registry contents arranged for help rendering.
#[derive(Debug)]
pub struct GroupedCommands<'a> {
    pub builtins: &'a [CommandEntry],
    pub groups: Vec<CommandGroup<'a>>,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Static(usize),
    Dynamic(usize),
}

/// The merged command table.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    builtins: Vec<CommandEntry>,
    dynamic: Vec<CommandEntry>,
    groups: Vec<GroupId>,
    index: HashMap<String, Slot>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in verb table.
    pub fn with_builtins() -> Result<Self, ConsoleError> {
        let mut registry = Self::new();
        for entry in BUILTINS {
            registry.register_static(entry.name, Some(entry.help))?;
        }
        Ok(registry)
    }

    /// Register a built-in verb.
    pub fn register_static(&mut self, verb: &str, help: Option<&str>) -> Result<(), ConsoleError> {
        self.ensure_unique(verb)?;
        self.index
            .insert(verb.to_string(), Slot::Static(self.builtins.len()));
        self.builtins.push(CommandEntry {
            name: verb.to_string(),
            help: help.map(str::to_string),
            group: None,
        });
        Ok(())
    }

    /// Register a command contributed by a command module.
    pub fn register_dynamic(
        &mut self,
        group: &GroupId,
        verb: &str,
        help: Option<&str>,
    ) -> Result<(), ConsoleError> {
        self.ensure_unique(verb)?;
        if !self.groups.contains(group) {
            self.groups.push(group.clone());
        }
        self.index
            .insert(verb.to_string(), Slot::Dynamic(self.dynamic.len()));
        self.dynamic.push(CommandEntry {
            name: verb.to_string(),
            help: help.map(str::to_string),
            group: Some(group.clone()),
        });
        tracing::debug!(verb, group = %group, "Registered command");
        Ok(())
    }

    /// Look up a verb among built-ins and dynamic commands.
    pub fn lookup(&self, verb: &str) -> Option<&CommandEntry> {
        match self.index.get(verb)? {
            Slot::Static(i) => self.builtins.get(*i),
            Slot::Dynamic(i) => self.dynamic.get(*i),
        }
    }

    /// Look up a verb among dynamic commands only.
    pub fn lookup_dynamic(&self, verb: &str) -> Option<&CommandEntry> {
        self.lookup(verb).filter(|entry| !entry.is_builtin())
    }

    pub fn builtins(&self) -> &[CommandEntry] {
        &self.builtins
    }

    /// Built-ins, then dynamic commands grouped by module in first-registration
    /// order.
    pub fn all_grouped(&self) -> GroupedCommands<'_> {
        let groups = self
            .groups
            .iter()
            .map(|id| CommandGroup {
                id,
                commands: self
                    .dynamic
                    .iter()
                    .filter(|entry| entry.group.as_ref() == Some(id))
                    .collect(),
            })
            .collect();
        GroupedCommands {
            builtins: &self.builtins,
            groups,
        }
    }

    pub fn len(&self) -> usize {
        self.builtins.len() + self.dynamic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn ensure_unique(&self, verb: &str) -> Result<(), ConsoleError> {
        match self.lookup(verb) {
            None => Ok(()),
            Some(existing) => Err(ConsoleError::DuplicateCommand {
                verb: verb.to_string(),
                existing: match &existing.group {
                    None => "as a built-in".to_string(),
                    Some(group) => format!("by module '{}'", group),
                },
            }),
        }
    }
}
