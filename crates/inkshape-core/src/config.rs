//! Session configuration.

use crate::animation::DEFAULT_SPIN_PERIOD_MS;
use crate::scheduler::DEFAULT_DEBOUNCE_MS;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for an [`InkSession`](crate::InkSession).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Quiet period after the last stroke before analysis, in milliseconds.
    pub debounce_ms: u64,
    /// Duration of one full animation turn, in milliseconds.
    pub spin_period_ms: u64,
    /// Seed for fills and spin directions. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Hit-test slack around shapes when starting a drag, in canvas units.
    pub hit_tolerance: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            spin_period_ms: DEFAULT_SPIN_PERIOD_MS,
            seed: None,
            hit_tolerance: 4,
        }
    }
}

impl SessionConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn spin_period(&self) -> Duration {
        Duration::from_millis(self.spin_period_ms)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.spin_period_ms == 0 {
            return Err(ConfigError::Invalid("spin_period_ms must be positive".to_string()));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
