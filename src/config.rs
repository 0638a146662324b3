//! Configuration System
//!
//! Layered configuration for the shell: merge-policy defaults, the global user
//! file (or an explicit `--config` file), then `DUST__*` environment overrides.
//! Persisted user state lives separately in [`UserData`].

use crate::error::ConsoleError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
pub mod paths;
mod sources;
mod user_data;

pub use facade::ConfigLoader;
pub use user_data::UserData;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Console behaviour
    #[serde(default)]
    pub shell: ShellSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Console behaviour settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellSettings {
    /// Run unrecognized lines through the host shell
    #[serde(default = "default_true")]
    pub host_fallback: bool,

    /// History file (default: `<data dir>/history`)
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    /// Maximum number of history entries kept
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Colorize help and banners
    #[serde(default = "default_true")]
    pub color: bool,

    /// User data file (default: `<data dir>/userdata.toml`)
    #[serde(default)]
    pub user_data_file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_history_size() -> usize {
    1000
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            host_fallback: default_true(),
            history_file: None,
            history_size: default_history_size(),
            color: default_true(),
            user_data_file: None,
        }
    }
}

impl ShellSettings {
    /// Configured history path, or the default under the data directory.
    pub fn history_path(&self) -> Result<PathBuf, ConsoleError> {
        match &self.history_file {
            Some(path) => Ok(path.clone()),
            None => paths::default_history_path(),
        }
    }

    /// Configured user data path, or the default under the data directory.
    pub fn user_data_path(&self) -> Result<PathBuf, ConsoleError> {
        match &self.user_data_file {
            Some(path) => Ok(path.clone()),
            None => paths::default_user_data_path(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Shell(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Shell(msg) => write!(f, "Shell: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ShellConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.shell.history_size == 0 {
            errors.push(ValidationError::Shell(
                "history_size must be greater than zero".to_string(),
            ));
        }
        if matches!(&self.shell.history_file, Some(p) if p.as_os_str().is_empty()) {
            errors.push(ValidationError::Shell(
                "history_file cannot be empty".to_string(),
            ));
        }
        if matches!(&self.shell.user_data_file, Some(p) if p.as_os_str().is_empty()) {
            errors.push(ValidationError::Shell(
                "user_data_file cannot be empty".to_string(),
            ));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
