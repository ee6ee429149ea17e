//! Configuration for rmb-verifier.
//!
//! Precedence, lowest first: built-in defaults, environment variables,
//! the TOML file named by `--config` or `RMB_VERIFIER_CONFIG`, CLI flags.
//!
//! ```toml
//! registry_path = "twins.toml"
//! log_level = "info"
//! lookup_timeout_secs = 10
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_CONFIG: &str = "RMB_VERIFIER_CONFIG";
pub const ENV_REGISTRY: &str = "RMB_VERIFIER_REGISTRY";
pub const ENV_LOG_LEVEL: &str = "RMB_VERIFIER_LOG_LEVEL";
pub const ENV_LOOKUP_TIMEOUT: &str = "RMB_VERIFIER_LOOKUP_TIMEOUT_SECS";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Twin directory file (TOML or JSON).
    pub registry_path: Option<PathBuf>,
    pub log_level: String,
    /// Upper bound on a whole verification, registry lookup included.
    pub lookup_timeout_secs: u64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            registry_path: None,
            log_level: "warn".to_string(),
            lookup_timeout_secs: 10,
        }
    }
}

/// Values given on the command line. `None` leaves the config untouched.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub registry_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub lookup_timeout_secs: Option<u64>,
}

impl VerifierConfig {
    /// Defaults, then environment, then the TOML file (`custom_path` or
    /// `RMB_VERIFIER_CONFIG`).
    pub fn load(custom_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env(|key| std::env::var(key).ok())?;

        let path = custom_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(ENV_CONFIG).ok().map(PathBuf::from));
        if let Some(path) = path {
            config.merge_toml(&std::fs::read_to_string(path)?)?;
        }

        Ok(config)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(path) = var(ENV_REGISTRY) {
            self.registry_path = Some(PathBuf::from(path));
        }
        if let Some(level) = var(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(secs) = var(ENV_LOOKUP_TIMEOUT) {
            self.lookup_timeout_secs = secs.parse().map_err(|e| {
                ConfigError::ValidationError(format!("Invalid {}: {}", ENV_LOOKUP_TIMEOUT, e))
            })?;
        }
        Ok(())
    }

    /// Overlay the keys present in `content` onto this config.
    fn merge_toml(&mut self, content: &str) -> Result<(), ConfigError> {
        let value: toml::Value = toml::from_str(content)?;

        if let Some(path) = value.get("registry_path").and_then(|v| v.as_str()) {
            self.registry_path = Some(PathBuf::from(path));
        }
        if let Some(level) = value.get("log_level").and_then(|v| v.as_str()) {
            self.log_level = level.to_string();
        }
        if let Some(secs) = value.get("lookup_timeout_secs").and_then(|v| v.as_integer()) {
            self.lookup_timeout_secs = u64::try_from(secs).map_err(|_| {
                ConfigError::ValidationError("lookup_timeout_secs must not be negative".to_string())
            })?;
        }
        Ok(())
    }

    pub fn with_overrides(mut self, overrides: &CliOverrides) -> Self {
        if let Some(path) = &overrides.registry_path {
            self.registry_path = Some(path.clone());
        }
        if let Some(level) = &overrides.log_level {
            self.log_level = level.clone();
        }
        if let Some(secs) = overrides.lookup_timeout_secs {
            self.lookup_timeout_secs = secs;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookup_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "lookup_timeout_secs must be > 0".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(self.lookup_timeout_secs)
    }
}
