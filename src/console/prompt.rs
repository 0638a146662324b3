//! Prompt rendering and the shared routing context behind it.

use crate::ports::PromptSource;
use parking_lot::RwLock;
use std::sync::Arc;

/// Prompt shown when no region is active.
pub const DEFAULT_PROMPT: &str = "[dust]$ ";

/// Render the prompt for the current routing context.
pub fn render_prompt(source: &dyn PromptSource) -> String {
    match source.region() {
        Some(region) if !region.is_empty() => format!("[{}]$ ", region),
        _ => DEFAULT_PROMPT.to_string(),
    }
}

/// Active region shared between the command modules that change it and the
/// prompt/redisplay path that reads it.
#[derive(Debug, Clone, Default)]
pub struct RoutingContext {
    region: Arc<RwLock<Option<String>>>,
}

impl RoutingContext {
    pub fn new(region: Option<String>) -> Self {
        Self {
            region: Arc::new(RwLock::new(region)),
        }
    }

    pub fn set_region(&self, region: Option<String>) {
        *self.region.write() = region;
    }
}

impl PromptSource for RoutingContext {
    fn region(&self) -> Option<String> {
        self.region.read().clone()
    }
}
