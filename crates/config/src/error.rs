//! Configuration error types

use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for config operations
pub type Result<T> = std::result::Result<T, ConfigError>;
