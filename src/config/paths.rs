//! Per-user paths: `$XDG_CONFIG_HOME/dust` and `$XDG_DATA_HOME/dust` on Linux,
//! the platform equivalents elsewhere.

use crate::error::ConsoleError;
use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "dust";

fn project_dirs() -> Result<ProjectDirs, ConsoleError> {
    ProjectDirs::from("", "", APP_NAME).ok_or_else(|| {
        ConsoleError::ConfigError("Cannot determine home directory for dust paths".to_string())
    })
}

/// Directory holding `config.toml`.
pub fn config_dir() -> Result<PathBuf, ConsoleError> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Directory holding history, user data and the log file.
pub fn data_dir() -> Result<PathBuf, ConsoleError> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

pub fn global_config_path() -> Result<PathBuf, ConsoleError> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn default_history_path() -> Result<PathBuf, ConsoleError> {
    Ok(data_dir()?.join("history"))
}

pub fn default_user_data_path() -> Result<PathBuf, ConsoleError> {
    Ok(data_dir()?.join("userdata.toml"))
}

pub fn default_log_path() -> Result<PathBuf, ConsoleError> {
    Ok(data_dir()?.join("dust.log"))
}
