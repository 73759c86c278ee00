//! Error types for the movement core.

use std::path::PathBuf;

use thiserror::Error;

use crate::body::PlatformId;

/// Errors raised by movement operations that depend on caller-supplied data.
#[derive(Debug, Error, PartialEq)]
pub enum MovementError {
    /// The platform being detached from has no rigid body, so there is no
    /// velocity to hand over to the character.
    #[error("platform {0} has no rigid body to inherit velocity from")]
    PlatformWithoutBody(PlatformId),
}

/// Errors that can occur while loading or validating movement tuning.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tuning: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid tuning: {field} must be {requirement}")]
    Invalid {
        field: &'static str,
        requirement: &'static str,
    },
}
