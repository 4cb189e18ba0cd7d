//! Error types for loading game configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a [`crate::config::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Failed to read config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// RON parsing failed.
    #[error("Parse error in '{}': {details}", path.display())]
    Parse { path: PathBuf, details: String },

    /// Values parsed but break an invariant the simulation relies on.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
