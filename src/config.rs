//! Configuration stored on disk
//!
//! A small TOML file under the XDG config directory holds the
//! OpenWeatherMap API key and an optional startup place. The
//! `OPENWEATHER_API_KEY` environment variable and the `--api-key` flag
//! both override the file; the precedence lives in [`resolve_api_key`] so
//! it can be tested without touching the environment.

use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable consulted for the API key.
pub const API_KEY_ENV_VAR: &str = "OPENWEATHER_API_KEY";

/// Errors from loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine platform config directory")]
    NoConfigDir,
    #[error("Failed to read config file: {0}")]
    ReadFailed(std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseFailed(#[from] toml::de::Error),
}

/// On-disk configuration (`~/.config/skycast/config.toml` on Linux).
///
/// ```toml
/// api_key = "0123abcd"
/// default_place = "Lutsk"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,
    /// Place queried at startup when none is given on the command line
    pub default_place: Option<String>,
}

impl Config {
    /// Loads the config from disk, or returns an empty default when no
    /// file exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(ConfigError::ReadFailed)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        let dirs = ProjectDirs::from("", "", "skycast").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Resolves the API key from its three sources.
///
/// Precedence: command-line flag, then environment variable, then config
/// file. Returns `None` when no source provides a key.
pub fn resolve_api_key(
    cli_key: Option<String>,
    env_key: Option<String>,
    file_key: Option<String>,
) -> Option<String> {
    cli_key.or(env_key).or(file_key)
}
