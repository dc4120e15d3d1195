//! Configuration resolution tests
//!
//! Covers the root folder priority order (CLI → env → TOML → default) and
//! graceful handling of a missing or broken config file.
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that touch CLOSET_ROOT_FOLDER or CLOSET_CONFIG are marked #[serial].

use closet_common::config::{
    config_file_path, resolve_root_folder, ConfigSource, TomlConfig, ENV_CONFIG_FILE, ENV_ROOT_FOLDER,
};
use closet_common::Error;
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_default() {
    env::remove_var(ENV_ROOT_FOLDER);

    let root_folder = resolve_root_folder(None, &TomlConfig::default());

    assert!(!root_folder.as_os_str().is_empty());
    assert!(root_folder.to_string_lossy().contains("closet"));
}

#[test]
#[serial]
fn test_cli_argument_wins() {
    env::set_var(ENV_ROOT_FOLDER, "/tmp/closet-env");
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/closet-toml")),
        ..Default::default()
    };

    let root_folder = resolve_root_folder(Some(Path::new("/tmp/closet-cli")), &toml);
    assert_eq!(root_folder, PathBuf::from("/tmp/closet-cli"));

    env::remove_var(ENV_ROOT_FOLDER);
}

#[test]
#[serial]
fn test_env_var_beats_toml() {
    env::set_var(ENV_ROOT_FOLDER, "/tmp/closet-env");
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/closet-toml")),
        ..Default::default()
    };

    assert_eq!(resolve_root_folder(None, &toml), PathBuf::from("/tmp/closet-env"));

    env::remove_var(ENV_ROOT_FOLDER);
}

#[test]
#[serial]
fn test_toml_used_when_env_unset() {
    env::remove_var(ENV_ROOT_FOLDER);
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/closet-toml")),
        ..Default::default()
    };

    assert_eq!(resolve_root_folder(None, &toml), PathBuf::from("/tmp/closet-toml"));
}

#[test]
#[serial]
fn test_config_file_env_override() {
    env::set_var(ENV_CONFIG_FILE, "/tmp/closet-config/config.toml");
    assert_eq!(
        config_file_path(),
        Some(PathBuf::from("/tmp/closet-config/config.toml"))
    );
    env::remove_var(ENV_CONFIG_FILE);
}

#[test]
#[serial]
fn test_missing_config_file_does_not_error() {
    let dir = TempDir::new().unwrap();
    env::set_var(ENV_CONFIG_FILE, dir.path().join("absent.toml"));

    let (config, source) = TomlConfig::load().expect("missing config should fall back to defaults");
    assert_eq!(source, ConfigSource::Missing(dir.path().join("absent.toml")));
    assert!(config.root_folder.is_none());
    assert_eq!(config.logging.level, "info");

    env::remove_var(ENV_CONFIG_FILE);
}

#[test]
#[serial]
fn test_load_reads_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "root_folder = \"/srv/closet\"\n[weather]\napi_key = \"k\"\n",
    )
    .unwrap();
    env::set_var(ENV_CONFIG_FILE, &path);

    let (config, source) = TomlConfig::load().unwrap();
    assert_eq!(source, ConfigSource::File(path.clone()));
    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/closet")));
    assert_eq!(config.weather.api_key.as_deref(), Some("k"));

    env::remove_var(ENV_CONFIG_FILE);
}

#[test]
fn test_malformed_config_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = \"not a number\"\n").unwrap();

    assert!(matches!(TomlConfig::from_file(&path), Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_zero_timeout_in_config_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[weather]\ntimeout_secs = 0\n").unwrap();
    env::set_var(ENV_CONFIG_FILE, &path);

    assert!(matches!(TomlConfig::load(), Err(Error::Config(_))));

    env::remove_var(ENV_CONFIG_FILE);
}
