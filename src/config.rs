//! Configuration management for powledger
//!
//! Only presentation and logging are configurable. Block capacity and puzzle
//! difficulty are fixed constants of the ledger.

use crate::error::{ChainError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::Level;

pub const DEFAULT_CONFIG_PATH: &str = "powledger.toml";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default = "default_enabled")]
    pub show_hashes: bool,
    #[serde(default = "default_enabled")]
    pub show_transactions: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_hashes: default_enabled(),
            show_transactions: default_enabled(),
        }
    }
}

impl LoggingConfig {
    pub fn max_level(&self) -> Result<Level> {
        parse_level(&self.level)
    }
}

fn default_level() -> String {
    "warn".to_string()
}

fn default_enabled() -> bool {
    true
}

pub fn parse_level(level: &str) -> Result<Level> {
    level
        .trim()
        .parse::<Level>()
        .map_err(|_| ChainError::ConfigError(format!("unknown log level '{}'", level)))
}

/// Loads configuration from `path`, or from [`DEFAULT_CONFIG_PATH`] when no
/// path is given.
///
/// A missing default file yields the defaults. A path that was asked for
/// explicitly must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_str = match path {
        Some(path) => fs::read_to_string(path).map_err(|e| {
            ChainError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?,
        None => fs::read_to_string(DEFAULT_CONFIG_PATH).unwrap_or_default(),
    };

    let config: Config = if config_str.trim().is_empty() {
        Config::default()
    } else {
        toml::from_str(&config_str)?
    };

    // Validate critical values
    config.logging.max_level()?;

    Ok(config)
}
