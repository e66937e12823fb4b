//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use super::listen::BridgeConfig;
use super::presence::PresenceConfig;
use super::purge::PurgeConfig;
use super::validation::{ValidationError, validate};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Daemon configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bot identity and command syntax.
    #[serde(default)]
    pub bot: BotConfig,
    /// Where platform bridges connect.
    pub bridge: BridgeConfig,
    /// Away-status notices.
    #[serde(default)]
    pub presence: PresenceConfig,
    /// Purge notices.
    #[serde(default)]
    pub purge: PurgeConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }
}

/// Bot identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Display name used in notice headings (e.g., "Bitzxier").
    #[serde(default = "default_bot_name")]
    pub name: String,
    /// Prefix that marks a message as a command (default: "?").
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            command_prefix: default_command_prefix(),
        }
    }
}

fn default_bot_name() -> String {
    "afkd".to_string()
}

fn default_command_prefix() -> String {
    "?".to_string()
}
