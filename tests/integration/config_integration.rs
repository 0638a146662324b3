//! Integration tests for the configuration system

use dust::config::{ConfigLoader, ShellConfig};
use dust::console::CommandRegistry;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_config_file_drives_shell_settings() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("dust.toml");
    let history = temp_dir.path().join("history");
    let user_data = temp_dir.path().join("userdata.toml");

    std::fs::write(
        &config_file,
        format!(
            r#"
[shell]
host_fallback = false
color = false
history_file = "{}"
user_data_file = "{}"

[logging]
level = "warning"
format = "json"
output = "file"
file = "{}"

[logging.modules]
rustyline = "warn"
"#,
            history.display(),
            user_data.display(),
            temp_dir.path().join("dust.log").display(),
        ),
    )
    .unwrap();

    let config = ConfigLoader::load_optional(Some(&config_file)).unwrap();
    assert!(!config.shell.host_fallback);
    assert!(!config.shell.color);
    assert_eq!(config.shell.history_path().unwrap(), history);
    assert_eq!(config.shell.user_data_path().unwrap(), user_data);
    assert_eq!(config.logging.format, "json");
    assert_eq!(
        config.logging.modules.get("rustyline"),
        Some(&"warn".to_string())
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_file_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("dust.toml");
    std::fs::write(&config_file, "[logging]\noutput = \"stderr\"\n").unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let defaults = ShellConfig::default();
    assert_eq!(config.shell.host_fallback, defaults.shell.host_fallback);
    assert_eq!(config.shell.color, defaults.shell.color);
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.logging.output, "stderr");
}

#[test]
fn test_environment_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("dust.toml");
    std::fs::write(&config_file, "[shell]\nhistory_size = 50\n").unwrap();

    std::env::set_var("DUST__SHELL__HISTORY_SIZE", "75");
    let result = ConfigLoader::load_from_file(&config_file);
    std::env::remove_var("DUST__SHELL__HISTORY_SIZE");

    assert_eq!(result.unwrap().shell.history_size, 75);
}

#[test]
fn test_unknown_log_level_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("dust.toml");
    std::fs::write(&config_file, "[logging]\nlevel = \"chatty\"\n").unwrap();

    let err = ConfigLoader::load_from_file(&config_file).unwrap_err();
    assert!(err.to_string().contains("Configuration validation failed"));
}

#[test]
fn test_malformed_toml_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("dust.toml");
    std::fs::write(&config_file, "[shell\nhost_fallback = ").unwrap();
    assert!(ConfigLoader::load_from_file(&config_file).is_err());
}

#[test]
fn test_default_paths_resolve() {
    let config = ShellConfig::default();
    let history = config.shell.history_path().unwrap();
    let user_data = config.shell.user_data_path().unwrap();
    assert_eq!(history.file_name(), Some(PathBuf::from("history").as_os_str()));
    assert_eq!(history.parent(), user_data.parent());
}

#[test]
fn test_builtin_registry_is_independent_of_config() {
    let registry = CommandRegistry::with_builtins().unwrap();
    assert_eq!(registry.len(), 3);
}
