//! Configuration management for ussd-engine.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file (JSON)
//! 3. Default values
//!
//! There is no CLI layer; the embedding transport owns its own arguments.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::interpreter::DEFAULT_STEP_LIMIT;

/// Engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Interpreter settings.
    pub engine: EngineSection,
    /// Session housekeeping settings.
    pub session: SessionSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Interpreter configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Maximum dispatches per request before a redirect cycle is assumed.
    pub step_limit: usize,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }
}

/// Session housekeeping section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSection {
    /// Seconds of inactivity after which a session is purged.
    pub max_idle_secs: u64,
}

impl Default for SessionSection {
    fn default() -> Self {
        // USSD gateways themselves give up after well under a minute
        Self { max_idle_secs: 120 }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(limit) = std::env::var("USSD_ENGINE_STEP_LIMIT") {
            if let Ok(limit) = limit.parse() {
                self.engine.step_limit = limit;
            }
        }

        if let Ok(secs) = std::env::var("USSD_ENGINE_MAX_IDLE_SECS") {
            if let Ok(secs) = secs.parse() {
                self.session.max_idle_secs = secs;
            }
        }

        if let Ok(level) = std::env::var("USSD_ENGINE_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Load configuration with the full priority chain.
    ///
    /// Priority: env vars > config file > defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        config.apply_env();
        Ok(config)
    }

    /// The idle budget as a [`Duration`], ready for
    /// [`SessionStore::purge`](crate::session::SessionStore::purge).
    pub fn max_idle(&self) -> Duration {
        Duration::from_secs(self.session.max_idle_secs)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
