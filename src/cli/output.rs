//! CLI output: error mapping from console errors to stable CLI surface.

use crate::error::ConsoleError;

/// Map console errors to a string for CLI output.
pub fn map_error(e: &ConsoleError) -> String {
    match e {
        ConsoleError::DuplicateCommand { .. } => {
            format!("{}\nCommand modules must not register overlapping verbs.", e)
        }
        _ => e.to_string(),
    }
}
