//! Dust: interactive cluster shell
//!
//! The console engine reads command lines, expands `@target` routing
//! shorthand, dispatches to built-ins, registered cluster commands, or the
//! host shell, and repaints the prompt when remote sessions write output
//! while the user is typing.

pub mod cli;
pub mod config;
pub mod console;
pub mod editor;
pub mod error;
pub mod local;
pub mod logging;
pub mod ports;
pub mod shell;
pub mod style;
