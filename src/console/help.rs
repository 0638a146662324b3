//! Help rendering: summary listing and per-verb detail.

use crate::console::registry::{CommandEntry, CommandRegistry};
use crate::style::Palette;

/// Width of the usage column in the summary listing.
pub const USAGE_COLUMN_WIDTH: usize = 40;

const FOOTER: &[&str] = &[
    "",
    "Type help [command] for detailed help on a command",
    "",
    "For most commands, [target] can be a node name, regular expression, or filter expression",
    "A node \"name\" in these commands is the Name tag in the cloud node metadata or in the cluster definition.",
    "",
];

/// Shell banner.
pub fn banner() -> String {
    format!(
        "Dust cluster shell, version {}. Type ? for help.",
        env!("CARGO_PKG_VERSION")
    )
}

/// Formats help from registry data.
pub struct HelpRenderer<'a> {
    registry: &'a CommandRegistry,
    palette: &'a Palette,
}

impl<'a> HelpRenderer<'a> {
    pub fn new(registry: &'a CommandRegistry, palette: &'a Palette) -> Self {
        Self { registry, palette }
    }

    /// Banner, built-ins, then one section per command module.
    pub fn render_summary(&self) -> String {
        let grouped = self.registry.all_grouped();
        let mut lines = vec![banner(), String::new(), "Available commands:".to_string(), String::new()];

        for entry in grouped.builtins {
            lines.push(self.summary_line(entry));
        }

        for group in &grouped.groups {
            lines.push(String::new());
            lines.push(format!("== From {}:", group.id));
            for entry in &group.commands {
                lines.push(self.summary_line(entry));
            }
        }

        lines.extend(FOOTER.iter().map(|line| line.to_string()));
        lines.join("\n")
    }

    /// Full help text for one verb.
    pub fn render_detail(&self, verb: &str) -> String {
        if let Some(entry) = self.registry.lookup_dynamic(verb) {
            return match entry.detail() {
                Some(detail) => self.palette.usage(&detail),
                None => no_help(verb),
            };
        }
        self.registry
            .lookup(verb)
            .and_then(CommandEntry::detail)
            .unwrap_or_else(|| no_help(verb))
    }

    fn summary_line(&self, entry: &CommandEntry) -> String {
        match entry.usage() {
            Some(usage) if !usage.description.is_empty() => format!(
                "{:<width$}{}",
                usage.synopsis,
                self.palette.usage(usage.description),
                width = USAGE_COLUMN_WIDTH
            ),
            Some(usage) => format!("{:<width$}", usage.synopsis, width = USAGE_COLUMN_WIDTH),
            None => entry.name.clone(),
        }
    }
}

fn no_help(verb: &str) -> String {
    format!("*** No help available for {}", verb)
}
