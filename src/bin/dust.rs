//! Dust CLI Binary
//!
//! Interactive shell for operating cloud clusters.

use clap::Parser;
use dust::cli::{Cli, RunContext};
use dust::config::{ConfigLoader, ShellConfig};
use dust::console::Terminal;
use dust::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();

    // Configuration must be readable before anything else starts
    let config = match ConfigLoader::load_optional(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", dust::cli::map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(&cli, &config);
    let terminal = Terminal::stdout();

    // Initialize logging early
    let log_level = match init_logging(Some(&logging_config), &terminal) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    debug!("Dust shell starting");

    let mut context = match RunContext::new(&cli, config, terminal, log_level) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing shell: {}", e);
            eprintln!("{}", dust::cli::map_error(&e));
            process::exit(1);
        }
    };

    if let Err(e) = context.execute() {
        error!("Shell failed: {}", e);
        eprintln!("{}", dust::cli::map_error(&e));
        process::exit(1);
    }
}

/// Build logging configuration from CLI args and the loaded config.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli, config: &ShellConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    if cli.quiet {
        logging.enabled = false;
    }
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
    }
    if cli.no_color {
        logging.color = false;
    }

    logging
}
