//! Error types for the diff crate.
//!
//! Comparisons themselves never fail; only loading comparison options can.

use std::path::PathBuf;

/// Errors that can occur while loading [`CompareOptions`](crate::CompareOptions).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The options file could not be read.
    #[error("failed to read options file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The options document is not valid TOML for this schema.
    #[error("invalid options: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Convenience alias for option loading results.
pub type ConfigResult<T> = Result<T, ConfigError>;
