//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or validating a runtime configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The tick length must be at least one millisecond
    #[error("tick_ms must be greater than zero")]
    ZeroTick,

    /// The configuration document could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}
