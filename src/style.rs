//! Color palette passed to everything that renders user-facing text.

use owo_colors::{OwoColorize, Style};

/// Colors used by the console. Built once at startup.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
    usage: Style,
    accent: Style,
}

impl Palette {
    /// Palette honoring the `color` setting. Terminals advertising `COLORTERM`
    /// get truecolor variants.
    pub fn new(enabled: bool) -> Self {
        let rich = std::env::var_os("COLORTERM").is_some();
        Self::with_depth(enabled, rich)
    }

    /// Palette that never emits escape sequences.
    pub fn plain() -> Self {
        Self::with_depth(false, false)
    }

    fn with_depth(enabled: bool, rich: bool) -> Self {
        let (usage, accent) = if rich {
            (
                Style::new().truecolor(95, 215, 0),
                Style::new().truecolor(95, 175, 255),
            )
        } else {
            (Style::new().green(), Style::new().cyan())
        };
        Self {
            enabled,
            usage,
            accent,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Usage descriptions and detailed help.
    pub fn usage(&self, text: &str) -> String {
        self.paint(text, self.usage)
    }

    /// Banners and notices.
    pub fn accent(&self, text: &str) -> String {
        self.paint(text, self.accent)
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.enabled {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::plain()
    }
}
