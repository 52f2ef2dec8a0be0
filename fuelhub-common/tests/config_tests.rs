//! Tests for configuration loading and database path resolution
//!
//! Covers:
//! - Missing config files fall back to defaults
//! - Explicitly named config files must exist
//! - Priority order: CLI argument, FUELHUB_DATABASE, TOML, default data folder
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.

use fuelhub_common::config::{
    default_data_folder, resolve_database_path, TomlConfig, CONFIG_ENV_VAR, DATABASE_ENV_VAR,
    DATABASE_FILE_NAME,
};
use fuelhub_common::Error;
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};

#[test]
#[serial]
fn test_missing_discovered_config_uses_defaults() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/fuelhub-test-no-such-config.toml");

    let config = TomlConfig::load(None).expect("missing config should not be fatal");
    assert_eq!(config.port, 3000);
    assert_eq!(config.site.name, "AI Fuel Hub");

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
fn test_missing_explicit_config_is_error() {
    let result = TomlConfig::load(Some(Path::new("/tmp/fuelhub-test-explicit-missing.toml")));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_load_explicit_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
        port = 4100
        [site]
        base_url = "https://staging.aifuelhub.com"
        "#,
    )
    .unwrap();

    let config = TomlConfig::load(Some(&path)).unwrap();
    assert_eq!(config.port, 4100);
    assert_eq!(config.site.base(), "https://staging.aifuelhub.com");
}

#[test]
#[serial]
fn test_database_path_cli_has_priority() {
    env::set_var(DATABASE_ENV_VAR, "/tmp/fuelhub-env.db");
    let config = TomlConfig {
        database_path: Some(PathBuf::from("/tmp/fuelhub-toml.db")),
        ..Default::default()
    };

    let path = resolve_database_path(Some(Path::new("/tmp/fuelhub-cli.db")), &config);
    assert_eq!(path, PathBuf::from("/tmp/fuelhub-cli.db"));

    env::remove_var(DATABASE_ENV_VAR);
}

#[test]
#[serial]
fn test_database_path_env_over_toml() {
    env::set_var(DATABASE_ENV_VAR, "/tmp/fuelhub-env.db");
    let config = TomlConfig {
        database_path: Some(PathBuf::from("/tmp/fuelhub-toml.db")),
        ..Default::default()
    };

    assert_eq!(resolve_database_path(None, &config), PathBuf::from("/tmp/fuelhub-env.db"));

    env::remove_var(DATABASE_ENV_VAR);
}

#[test]
#[serial]
fn test_database_path_toml_then_default() {
    env::remove_var(DATABASE_ENV_VAR);

    let config = TomlConfig {
        database_path: Some(PathBuf::from("/tmp/fuelhub-toml.db")),
        ..Default::default()
    };
    assert_eq!(resolve_database_path(None, &config), PathBuf::from("/tmp/fuelhub-toml.db"));

    let path = resolve_database_path(None, &TomlConfig::default());
    assert_eq!(path, default_data_folder().join(DATABASE_FILE_NAME));
}
