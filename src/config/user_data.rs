//! Persisted per-user state: last active region and log level.

use crate::error::ConsoleError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loglevel: Option<String>,
}

impl UserData {
    /// Read user data. A missing file yields defaults; an unreadable or
    /// malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConsoleError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            ConsoleError::ConfigError(format!(
                "Failed to read user data {}: {}",
                path.display(),
                e
            ))
        })?;
        toml::from_str(&text).map_err(|e| {
            ConsoleError::ConfigError(format!(
                "Failed to parse user data {}: {}",
                path.display(),
                e
            ))
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConsoleError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string_pretty(self).map_err(|e| {
            ConsoleError::ConfigError(format!("Failed to serialize user data: {}", e))
        })?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
