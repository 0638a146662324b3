//! Host shell used for the last dispatch tier.

use crate::ports::HostShell;
use std::io;
use std::process::Command;

/// Runs lines with the platform shell, inheriting the console's stdio.
#[derive(Debug, Clone)]
pub struct SystemShell {
    program: String,
    flag: String,
}

impl SystemShell {
    pub fn new() -> Self {
        if cfg!(windows) {
            Self::with_program("cmd", "/C")
        } else {
            Self::with_program("sh", "-c")
        }
    }

    pub fn with_program(program: impl Into<String>, flag: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            flag: flag.into(),
        }
    }
}

impl Default for SystemShell {
    fn default() -> Self {
        Self::new()
    }
}

impl HostShell for SystemShell {
    fn run(&self, line: &str) -> io::Result<Option<i32>> {
        let status = Command::new(&self.program)
            .arg(&self.flag)
            .arg(line)
            .status()?;
        Ok(status.code())
    }
}
