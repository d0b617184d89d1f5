//! Configuration file loading for the replay tool.
//!
//! Scenarios and the default log filter live in a TOML file, `replay.toml`
//! in the current directory unless `--config` names another.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading or querying configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Requested scenario was not found in the configuration.
    #[error("Scenario not found: {0}")]
    ScenarioNotFound(String),
}

/// A sequence of moves to replay from a starting position.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ScenarioConfig {
    /// Starting position in FEN. Defaults to the standard start.
    #[serde(default)]
    pub fen: Option<String>,
    /// Moves in long coordinate notation ("e2e4", "e7e8q").
    #[serde(default)]
    pub moves: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Top-level replay configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    /// Defaults to "info".
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Scenarios by name.
    #[serde(default)]
    pub scenarios: BTreeMap<String, ScenarioConfig>,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            log_filter: default_log_filter(),
            scenarios: BTreeMap::new(),
        }
    }
}

impl ReplayConfig {
    /// Loads the configuration from `path`.
    ///
    /// Returns the default configuration if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Retrieves a scenario by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ScenarioNotFound`] if no scenario has that name.
    pub fn scenario(&self, name: &str) -> Result<&ScenarioConfig, ConfigError> {
        self.scenarios
            .get(name)
            .ok_or_else(|| ConfigError::ScenarioNotFound(name.to_string()))
    }
}
