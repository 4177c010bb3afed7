//! Build errors for the controller builder.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a controller.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Clock not specified. Call .clock(clock) before .build()")]
    MissingClock,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
