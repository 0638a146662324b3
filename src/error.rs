//! Error types for the dust console.

use thiserror::Error;

/// Console errors.
///
/// Only startup failures (registration, configuration, logging) are meant to
/// stop the process. Everything raised while the read loop is running is
/// logged and the console returns to the prompt.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("Duplicate command '{verb}': already registered {existing}")]
    DuplicateCommand { verb: String, existing: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Terminal I/O error: {0}")]
    TerminalError(#[from] std::io::Error),

    #[error("Line editor error: {0}")]
    EditorError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

impl From<config::ConfigError> for ConsoleError {
    fn from(err: config::ConfigError) -> Self {
        ConsoleError::ConfigError(err.to_string())
    }
}
