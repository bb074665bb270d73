//! VoiceForge configuration
//!
//! TOML-based configuration loading with sensible defaults. A missing or
//! empty config file just works - only specify what you need to change.
//!
//! # Example
//!
//! ```toml
//! [server]
//! port = 8080
//!
//! [database]
//! path = "~/.voiceforge/voiceforge.db"
//!
//! [auth]
//! dev_sessions = true
//!
//! [log]
//! level = "debug"
//! ```

mod auth;
mod database;
mod error;
mod logging;
mod server;

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, Result};
pub use logging::{LogConfig, LogLevel};
pub use server::ServerConfig;

/// Main configuration structure
///
/// All sections are optional with sensible defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings
    pub server: ServerConfig,

    /// Database settings
    pub database: DatabaseConfig,

    /// Session/authentication settings
    pub auth: AuthConfig,

    /// Logging configuration
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or contains invalid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_str(&contents)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(!config.auth.dev_sessions);
        assert_eq!(config.log.level, LogLevel::Info);
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[database]
path = "/tmp/vf.db"

[auth]
dev_sessions = true

[log]
level = "warn"
"#;
        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.server.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.database.db_path().to_str().unwrap(), "/tmp/vf.db");
        assert!(config.auth.dev_sessions);
        assert_eq!(config.log.level, LogLevel::Warn);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_str("server = [").is_err());
    }
}
