//! services/player/src/config.rs
//!
//! Defines the player's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Where snapshots are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageKind {
    /// One JSON file per snapshot under `data_dir`.
    File,
    /// Nothing survives the process. Handy for demos and tests.
    Memory,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage: StorageKind,
    pub log_level: Level,
    /// Period of the simulated playback clock.
    pub tick_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            storage: StorageKind::File,
            log_level: Level::INFO,
            tick_interval: Duration::from_millis(250),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = lookup("PLAYER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let storage = match lookup("PLAYER_STORAGE") {
            None => defaults.storage,
            Some(value) => match value.to_lowercase().as_str() {
                "file" => StorageKind::File,
                "memory" => StorageKind::Memory,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        "PLAYER_STORAGE".to_string(),
                        format!("'{}' is not one of 'file' or 'memory'", value),
                    ))
                }
            },
        };

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let tick_interval = match lookup("PLAYER_TICK_MS") {
            None => defaults.tick_interval,
            Some(value) => {
                let millis = value.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidValue("PLAYER_TICK_MS".to_string(), e.to_string())
                })?;
                if millis == 0 {
                    return Err(ConfigError::InvalidValue(
                        "PLAYER_TICK_MS".to_string(),
                        "must be greater than zero".to_string(),
                    ));
                }
                Duration::from_millis(millis)
            }
        };

        Ok(Self {
            data_dir,
            storage,
            log_level,
            tick_interval,
        })
    }
}
