//! CLI parse: clap types for dust. No behavior; definitions only.

use clap::Parser;
use std::path::PathBuf;

/// Dust - interactive cluster operations shell
#[derive(Parser, Debug)]
#[command(name = "dust")]
#[command(version)]
#[command(about = "Interactive shell for operating cloud clusters")]
pub struct Cli {
    /// Configuration file path (replaces the global config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warning, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Disable colored help and banners
    #[arg(long)]
    pub no_color: bool,

    /// Do not run unrecognized commands through the host shell
    #[arg(long)]
    pub no_shell_fallback: bool,
}
