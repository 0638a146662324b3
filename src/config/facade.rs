//! Config loading entry point.

use crate::config::{merge, sources, ShellConfig};
use crate::error::ConsoleError;
use std::path::Path;

/// Loads [`ShellConfig`] from defaults, files and environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults, then the global user file, then environment.
    pub fn load() -> Result<ShellConfig, ConsoleError> {
        let builder = merge::builder_with_defaults()?;
        let builder = sources::add_global_file(builder)?;
        let builder = sources::add_environment(builder)?;
        Self::finish(builder.build()?)
    }

    /// Defaults, then `path` in place of the global file, then environment.
    pub fn load_from_file(path: &Path) -> Result<ShellConfig, ConsoleError> {
        let builder = merge::builder_with_defaults()?;
        let builder = sources::add_explicit_file(builder, path)?;
        let builder = sources::add_environment(builder)?;
        Self::finish(builder.build()?)
    }

    /// Load from `path` when given, otherwise from the default locations.
    pub fn load_optional(path: Option<&Path>) -> Result<ShellConfig, ConsoleError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    fn finish(raw: config::Config) -> Result<ShellConfig, ConsoleError> {
        let config: ShellConfig = raw.try_deserialize()?;
        config.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ConsoleError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
