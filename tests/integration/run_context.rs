//! Run context wiring: user data round trip and CLI overrides.

use super::test_utils::{CallLog, FakeShell, ScriptedEditor};
use clap::Parser;
use dust::cli::{Cli, RunContext};
use dust::config::{ShellConfig, UserData};
use dust::console::terminal::CaptureBuffer;
use dust::console::Terminal;
use dust::logging::LogLevelHandle;
use dust::ports::PromptSource;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn config_with_user_data(path: &Path) -> ShellConfig {
    let mut config = ShellConfig::default();
    config.shell.user_data_file = Some(path.to_path_buf());
    config
}

fn context(args: &[&str], config: ShellConfig, level: &LogLevelHandle) -> RunContext {
    let cli = Cli::try_parse_from(args).unwrap();
    RunContext::new(
        &cli,
        config,
        Terminal::from_writer(CaptureBuffer::new()),
        level.clone(),
    )
    .unwrap()
}

fn run_script(context: &mut RunContext, lines: &[&str]) -> CallLog {
    let log = CallLog::default();
    context
        .run_with(
            Box::new(ScriptedEditor::new(lines, log.clone())),
            Box::new(FakeShell { log: log.clone() }),
        )
        .unwrap();
    log
}

#[test]
fn test_region_is_persisted_on_exit() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state").join("userdata.toml");
    let level = LogLevelHandle::detached("info");

    let mut ctx = context(&["dust"], config_with_user_data(&path), &level);
    run_script(&mut ctx, &["region eu-west-1", "exit"]);

    let saved = UserData::load(&path).unwrap();
    assert_eq!(saved.region.as_deref(), Some("eu-west-1"));

    // Next start picks the region back up
    let ctx = context(&["dust"], config_with_user_data(&path), &level);
    assert_eq!(ctx.routing().region().as_deref(), Some("eu-west-1"));
}

#[test]
fn test_unchanged_session_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("userdata.toml");
    let level = LogLevelHandle::detached("info");

    let mut ctx = context(&["dust"], config_with_user_data(&path), &level);
    run_script(&mut ctx, &["exit"]);
    assert!(!path.exists());
}

#[test]
fn test_persisted_loglevel_applied_at_startup() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("userdata.toml");
    fs::write(&path, "loglevel = \"warning\"\n").unwrap();
    let level = LogLevelHandle::detached("info");

    let mut ctx = context(&["dust"], config_with_user_data(&path), &level);
    run_script(&mut ctx, &["exit"]);
    assert_eq!(level.current_level(), "warn");
}

#[test]
fn test_cli_level_overrides_persisted_loglevel() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("userdata.toml");
    fs::write(&path, "loglevel = \"error\"\n").unwrap();
    let level = LogLevelHandle::detached("debug");

    let mut ctx = context(
        &["dust", "--log-level", "debug"],
        config_with_user_data(&path),
        &level,
    );
    run_script(&mut ctx, &["exit"]);
    assert_eq!(level.current_level(), "debug");
    let saved = UserData::load(&path).unwrap();
    assert_eq!(saved.loglevel.as_deref(), Some("error"));
}

#[test]
fn test_loglevel_change_is_persisted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("userdata.toml");
    let level = LogLevelHandle::detached("info");

    let mut ctx = context(&["dust"], config_with_user_data(&path), &level);
    run_script(&mut ctx, &["loglevel debug", "exit"]);
    let saved = UserData::load(&path).unwrap();
    assert_eq!(saved.loglevel.as_deref(), Some("debug"));
}

#[test]
fn test_no_shell_fallback_flag_disables_host_shell() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("userdata.toml");
    let level = LogLevelHandle::detached("info");

    let mut ctx = context(
        &["dust", "--no-shell-fallback"],
        config_with_user_data(&path),
        &level,
    );
    assert!(!ctx.config().shell.host_fallback);
    let log = run_script(&mut ctx, &["lsxyz", "exit"]);
    assert!(!log.entries().iter().any(|e| e.starts_with("shell:")));
}

#[test]
fn test_unknown_command_reaches_host_shell_by_default() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("userdata.toml");
    let level = LogLevelHandle::detached("info");

    let mut ctx = context(&["dust"], config_with_user_data(&path), &level);
    let log = run_script(&mut ctx, &["lsxyz -a", "exit"]);
    assert!(log.entries().contains(&"shell:lsxyz -a".to_string()));
}

#[test]
fn test_malformed_user_data_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("userdata.toml");
    fs::write(&path, "region = [unterminated").unwrap();

    let cli = Cli::try_parse_from(["dust"]).unwrap();
    let result = RunContext::new(
        &cli,
        config_with_user_data(&path),
        Terminal::from_writer(CaptureBuffer::new()),
        LogLevelHandle::detached("info"),
    );
    assert!(result.is_err());
}

#[test]
fn test_configured_level_survives_startup_without_saved_level() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("userdata.toml");
    let mut config = config_with_user_data(&path);
    config.logging.level = "debug".to_string();
    let level = LogLevelHandle::detached("debug");

    let mut ctx = context(&["dust"], config, &level);
    run_script(&mut ctx, &["exit"]);
    assert_eq!(level.current_level(), "debug");
    assert!(!path.exists(), "an untouched configured level is not saved");
}

#[test]
fn test_disabled_logging_ignores_saved_level() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("userdata.toml");
    fs::write(&path, "loglevel = \"debug\"\n").unwrap();
    let mut config = config_with_user_data(&path);
    config.logging.enabled = false;
    let level = LogLevelHandle::detached("off");

    let mut ctx = context(&["dust"], config, &level);
    run_script(&mut ctx, &["exit"]);
    assert_eq!(level.current_level(), "off");
    let saved = UserData::load(&path).unwrap();
    assert_eq!(saved.loglevel.as_deref(), Some("debug"));
}
