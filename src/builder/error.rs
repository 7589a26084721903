//! Build errors for the runtime builder.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a runtime.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Application state not specified. Call .app(state) before .build()")]
    MissingApp,

    #[error("Region '{region}' given more than one initial state")]
    DuplicateInitial { region: String },
}
