//! Runtime configuration.
//!
//! Fixes the size of every table up front and sets the tick length.
//! Configurations are plain serde values, so they can be embedded in a
//! larger settings document or loaded from JSON directly.

use crate::timer::TICK_MS;
use serde::{Deserialize, Serialize};

pub mod error;

pub use error::ConfigError;

/// Tunables for a [`Runtime`](crate::Runtime).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Length of one timer tick in milliseconds
    pub tick_ms: u32,

    /// Regions the state tables can hold; larger region indices are ignored
    pub region_capacity: usize,

    /// States per region that can carry entry/exit actions
    pub state_capacity: usize,

    /// Events the handler and timer tables can hold
    pub event_capacity: usize,

    /// Most recent state changes to keep; zero disables the history
    pub history_limit: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            region_capacity: 4,
            state_capacity: 16,
            event_capacity: 16,
            history_limit: 0,
        }
    }
}

impl RuntimeConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tickstate::config::RuntimeConfig;
    ///
    /// let config = RuntimeConfig::from_json(r#"{ "tick_ms": 10 }"#).unwrap();
    /// assert_eq!(config.tick_ms, 10);
    /// assert_eq!(config.history_limit, 0);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(())
    }
}
