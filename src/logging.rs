//! Logging System
//!
//! Structured logging implementation using the `tracing` crate. Provides
//! configurable log levels, output formats, and destinations. Terminal output
//! is written through the shared [`Terminal`] so log lines never split a
//! prompt repaint. The level filter sits behind a reload layer so the
//! `loglevel` command can change it at runtime.

use crate::console::terminal::Terminal;
use crate::error::ConsoleError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Master switch; disabled logging installs an `off` filter
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output is "file"; default: `<data dir>/dust.log`)
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stdout".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        normalize_level(&self.level).map_err(|e| e.to_string())?;
        if self.format != "json" && self.format != "text" {
            return Err(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                self.format
            ));
        }
        parse_output(&self.output).map_err(|e| e.to_string())?;
        Ok(())
    }
}

/// Map user-facing level names (including `warning`) to filter directives.
pub fn normalize_level(level: &str) -> Result<&'static str, ConsoleError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(ConsoleError::LoggingError(format!(
            "Invalid log level: {} (must be trace, debug, info, warning, error, or off)",
            other
        ))),
    }
}

/// Runtime control over the active level filter.
#[derive(Clone)]
pub struct LogLevelHandle {
    reload: Option<reload::Handle<EnvFilter, Registry>>,
    modules: Arc<HashMap<String, String>>,
    current: Arc<RwLock<String>>,
}

impl LogLevelHandle {
    /// Handle not connected to any subscriber. Level changes are recorded only.
    pub fn detached(level: &str) -> Self {
        Self {
            reload: None,
            modules: Arc::new(HashMap::new()),
            current: Arc::new(RwLock::new(level.to_string())),
        }
    }

    /// Currently configured level.
    pub fn current_level(&self) -> String {
        self.current.read().clone()
    }

    /// Replace the level filter. Module-specific levels from config are kept.
    pub fn set_level(&self, level: &str) -> Result<(), ConsoleError> {
        let level = normalize_level(level)?;
        if let Some(reload) = &self.reload {
            let filter = build_filter(level, &self.modules)?;
            reload
                .reload(filter)
                .map_err(|e| ConsoleError::LoggingError(e.to_string()))?;
        }
        *self.current.write() = level.to_string();
        Ok(())
    }
}

fn build_filter(level: &str, modules: &HashMap<String, String>) -> Result<EnvFilter, ConsoleError> {
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(level);
    for (module, module_level) in modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| ConsoleError::LoggingError(format!("Invalid log directive: {}", e)))?,
        );
    }
    Ok(filter)
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. CLI arguments (already merged into `config` by the caller)
/// 2. Environment variables (DUST_LOG, DUST_LOG_MODULES, DUST_LOG_FORMAT, DUST_LOG_OUTPUT)
/// 3. Configuration file
/// 4. Defaults
pub fn init_logging(
    config: Option<&LoggingConfig>,
    terminal: &Terminal,
) -> Result<LogLevelHandle, ConsoleError> {
    let defaults = LoggingConfig::default();
    let config = config.unwrap_or(&defaults);

    let mut modules = config.modules.clone();
    modules.extend(env_modules());

    let level = if config.enabled {
        normalize_level(&config.level)?
    } else {
        "off"
    };
    let filter = match EnvFilter::try_from_env("DUST_LOG") {
        Ok(filter) => filter,
        Err(_) => build_filter(level, &modules)?,
    };
    let format = determine_format(config)?;
    let output = determine_output(config)?;

    let (filter_layer, reload_handle) = reload::Layer::new(filter);
    let base_subscriber = Registry::default().with(filter_layer);

    let open_log_file = || -> Result<std::fs::File, ConsoleError> {
        let log_file = match &config.file {
            Some(path) => path.clone(),
            None => crate::config::paths::default_log_path()?,
        };
        if let Some(parent) = log_file.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConsoleError::LoggingError(format!("Failed to create log directory: {}", e))
            })?;
        }
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .map_err(|e| {
                ConsoleError::LoggingError(format!(
                    "Failed to open log file {:?}: {}",
                    log_file, e
                ))
            })
    };

    let result = match (format.as_str(), output) {
        ("json", Output::File) => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(Mutex::new(open_log_file()?)),
            )
            .try_init(),
        ("json", Output::Stderr) => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        ("json", Output::Stdout) => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(terminal.clone()),
            )
            .try_init(),
        (_, Output::File) => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(Mutex::new(open_log_file()?)),
            )
            .try_init(),
        (_, Output::Stderr) => base_subscriber
            .with(
                fmt::layer()
                    .without_time()
                    .with_target(false)
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        // Console lines: no timestamp or target, like plain shell output.
        (_, Output::Stdout) => base_subscriber
            .with(
                fmt::layer()
                    .without_time()
                    .with_target(false)
                    .with_ansi(config.color)
                    .with_writer(terminal.clone()),
            )
            .try_init(),
    };
    result.map_err(|e| ConsoleError::LoggingError(e.to_string()))?;

    Ok(LogLevelHandle {
        reload: Some(reload_handle),
        modules: Arc::new(modules),
        current: Arc::new(RwLock::new(level.to_string())),
    })
}

/// Module directives from DUST_LOG_MODULES (`module=level,module=level`).
fn env_modules() -> HashMap<String, String> {
    let mut modules = HashMap::new();
    if let Ok(modules_str) = std::env::var("DUST_LOG_MODULES") {
        for module_spec in modules_str.split(',') {
            if let Some((module, level)) = module_spec.split_once('=') {
                modules.insert(module.trim().to_string(), level.trim().to_string());
            }
        }
    }
    modules
}

/// Determine output format from config or environment
fn determine_format(config: &LoggingConfig) -> Result<String, ConsoleError> {
    if let Ok(format) = std::env::var("DUST_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.format.as_str();
    if format != "json" && format != "text" {
        return Err(ConsoleError::LoggingError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }
    Ok(format.to_string())
}

/// Output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
    File,
}

/// Determine output destination from config or environment
fn determine_output(config: &LoggingConfig) -> Result<Output, ConsoleError> {
    if let Ok(output) = std::env::var("DUST_LOG_OUTPUT") {
        return parse_output(&output);
    }
    parse_output(&config.output)
}

fn parse_output(output: &str) -> Result<Output, ConsoleError> {
    match output {
        "stdout" => Ok(Output::Stdout),
        "stderr" => Ok(Output::Stderr),
        "file" => Ok(Output::File),
        _ => Err(ConsoleError::LoggingError(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            output
        ))),
    }
}
