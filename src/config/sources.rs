//! Config sources: the global user file, an explicit file, and the environment.

use crate::config::paths;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, File, FileFormat};
use std::path::Path;
use tracing::debug;

/// Environment prefix: `DUST__SHELL__HOST_FALLBACK=false`.
pub const ENV_PREFIX: &str = "DUST";

/// Add the global config file (`<config dir>/dust/config.toml`) if it exists.
pub fn add_global_file(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Ok(path) = paths::global_config_path() else {
        return Ok(builder);
    };
    if !path.exists() {
        debug!(config_path = %path.display(), "No global config file");
        return Ok(builder);
    }
    Ok(builder.add_source(File::from(path.as_path()).format(FileFormat::Toml).required(false)))
}

/// Add an explicitly named config file. Missing files are an error.
pub fn add_explicit_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(File::from(path).format(FileFormat::Toml).required(true)))
}

/// Add `DUST__SECTION__KEY` environment overrides.
pub fn add_environment(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    ))
}
