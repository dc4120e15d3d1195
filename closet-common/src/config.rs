//! Configuration loading and root folder resolution
//!
//! Settings resolve in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing config file is not an error; defaults apply.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::filter::WeatherMatch;
use crate::{Error, Result};

/// Overrides the root folder
pub const ENV_ROOT_FOLDER: &str = "CLOSET_ROOT_FOLDER";

/// Overrides the config file location
pub const ENV_CONFIG_FILE: &str = "CLOSET_CONFIG";

/// Inventory file name inside the root folder
pub const INVENTORY_FILE_NAME: &str = "closet_items.csv";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5730;

const MIN_TIMEOUT_SECS: u64 = 1;

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Folder holding the inventory file
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    /// Inventory CSV path; relative paths resolve against the root folder
    #[serde(default)]
    pub inventory_file: Option<PathBuf>,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub matching: MatchingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    /// Provider credential, sent on every call
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_geo_base_url")]
    pub geo_base_url: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            geo_base_url: default_geo_base_url(),
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Filter matching settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingConfig {
    /// Match weather by parsed condition set instead of raw substring
    #[serde(default)]
    pub strict_weather: bool,
}

impl MatchingConfig {
    pub fn weather_match(&self) -> WeatherMatch {
        if self.strict_weather {
            WeatherMatch::Strict
        } else {
            WeatherMatch::Substring
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_geo_base_url() -> String {
    "http://api.openweathermap.org".to_string()
}

fn default_api_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where the loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// No file at this path; defaults apply
    Missing(PathBuf),
    /// No config directory on this platform; defaults apply
    NoConfigDir,
}

impl ConfigSource {
    /// Report the outcome; call once the subscriber is installed
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded config file: {}", path.display()),
            ConfigSource::Missing(path) => {
                warn!("Config file not found at {}, using defaults", path.display())
            }
            ConfigSource::NoConfigDir => warn!("Could not determine config directory, using defaults"),
        }
    }
}

impl TomlConfig {
    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.validate().map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })?;
        Ok(config)
    }

    /// Load the config file from its default location, falling back to
    /// defaults when there is none
    ///
    /// Nothing is logged here since this runs before tracing is set up;
    /// the caller reports the returned source.
    pub fn load() -> Result<(Self, ConfigSource)> {
        match config_file_path() {
            Some(path) if path.exists() => {
                let config = Self::from_file(&path)?;
                Ok((config, ConfigSource::File(path)))
            }
            Some(path) => Ok((Self::default(), ConfigSource::Missing(path))),
            None => Ok((Self::default(), ConfigSource::NoConfigDir)),
        }
    }

    /// Reject values that parse but cannot work
    pub fn validate(&self) -> Result<()> {
        if self.weather.timeout_secs == 0 {
            return Err(Error::Config("weather.timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl WeatherConfig {
    /// Per-request timeout, never below one second
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(MIN_TIMEOUT_SECS))
    }
}

/// Config file location: `CLOSET_CONFIG`, else `<config_dir>/closet/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(ENV_CONFIG_FILE) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("closet").join("config.toml"))
}

/// Resolve the root folder: CLI → `CLOSET_ROOT_FOLDER` → TOML → OS default
pub fn resolve_root_folder(cli_arg: Option<&Path>, toml: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(ENV_ROOT_FOLDER) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &toml.root_folder {
        return path.clone();
    }

    default_root_folder()
}

/// Resolve the inventory file: CLI → TOML → `<root>/closet_items.csv`
pub fn resolve_inventory_path(cli_arg: Option<&Path>, toml: &TomlConfig, root_folder: &Path) -> PathBuf {
    let chosen = cli_arg
        .map(Path::to_path_buf)
        .or_else(|| toml.inventory_file.clone());

    match chosen {
        Some(path) if path.is_absolute() => path,
        Some(path) => root_folder.join(path),
        None => root_folder.join(INVENTORY_FILE_NAME),
    }
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    // ~/.local/share/closet, ~/Library/Application Support/closet, %LOCALAPPDATA%\closet
    dirs::data_local_dir()
        .map(|d| d.join("closet"))
        .unwrap_or_else(|| PathBuf::from("./closet_data"))
}
