//! Command-line interface parsing for skycast
//!
//! This module parses CLI arguments with clap and merges them with the
//! environment and the config file into the resolved startup state: which
//! place to query first, and which API key to query it with.

use clap::Parser;
use thiserror::Error;

use crate::config::{resolve_api_key, Config, ConfigError, API_KEY_ENV_VAR};

/// Place queried when neither the command line nor the config names one.
pub const DEFAULT_PLACE: &str = "Lutsk";

/// Error types for startup configuration
#[derive(Debug, Error)]
pub enum CliError {
    /// No API key could be resolved from any source
    #[error(
        "No API key configured. Pass --api-key <KEY>, set OPENWEATHER_API_KEY, or put api_key in the skycast config file"
    )]
    MissingApiKey,
    /// The config file exists but could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Skycast - city weather forecasts in the terminal
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "OpenWeatherMap city forecasts in the terminal")]
#[command(version)]
pub struct Cli {
    /// City to show at startup, e.g. "Lutsk" or "Vancouver,CA"
    ///
    /// Falls back to default_place from the config file, then to Lutsk.
    #[arg(value_name = "PLACE")]
    pub place: Option<String>,

    /// OpenWeatherMap API key (overrides OPENWEATHER_API_KEY and the config file)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,
}

/// Resolved application startup state
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Place queried on launch
    pub place: String,
    /// OpenWeatherMap API key
    pub api_key: String,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments, the environment,
    /// and the config file.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with the merged settings
    /// * `Err(CliError)` when the config file is broken or no API key is
    ///   available from any source
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let file = Config::load()?;
        let env_key = std::env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|key| !key.is_empty());
        Self::resolve(cli, env_key, file)
    }

    /// Pure merge of the three configuration sources.
    ///
    /// Kept separate from [`StartupConfig::from_cli`] so precedence can be
    /// tested without touching the process environment or the filesystem.
    pub fn resolve(cli: &Cli, env_key: Option<String>, file: Config) -> Result<Self, CliError> {
        let api_key = resolve_api_key(cli.api_key.clone(), env_key, file.api_key)
            .ok_or(CliError::MissingApiKey)?;

        let place = cli
            .place
            .clone()
            .or(file.default_place)
            .unwrap_or_else(|| DEFAULT_PLACE.to_string());

        Ok(StartupConfig { place, api_key })
    }
}
