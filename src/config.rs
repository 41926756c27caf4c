//! Runtime configuration.
//!
//! Loaded from TOML; every section and field is optional.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! format = "json"
//!
//! [actors]
//! catalog_buffer = 64
//! sales_buffer = 64
//!
//! [commit]
//! append_timeout_ms = 500
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

/// Mailbox capacities for the two actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    pub catalog_buffer: usize,
    pub sales_buffer: usize,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            catalog_buffer: 32,
            sales_buffer: 32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommitConfig {
    /// How long a commit waits for its sale record before the outcome counts as unknown.
    pub append_timeout_ms: u64,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            append_timeout_ms: 2000,
        }
    }
}

impl CommitConfig {
    pub fn append_timeout(&self) -> Duration {
        Duration::from_millis(self.append_timeout_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StockroomConfig {
    pub logging: LoggingConfig,
    pub actors: ActorConfig,
    pub commit: CommitConfig,
}

impl StockroomConfig {
    /// Parses and validates TOML content.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::InvalidValue`] for out-of-range values.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.actors.catalog_buffer == 0 {
            return Err(ConfigError::InvalidValue {
                field: "catalog_buffer",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.actors.sales_buffer == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sales_buffer",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.commit.append_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "append_timeout_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "level",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
