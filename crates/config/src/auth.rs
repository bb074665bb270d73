//! Authentication configuration

use serde::Deserialize;

/// Authentication configuration
///
/// VoiceForge does not authenticate users itself; an external identity
/// provider resolves requests to identities and this service only manages
/// sessions. These settings control the session layer.
///
/// # Example
///
/// ```toml
/// [auth]
/// dev_sessions = false       # default
/// session_ttl_hours = 24     # default
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Enable the development session endpoint (`POST /api/auth/session`),
    /// which mints a session directly from identity claims in the request
    /// body. Never enable in production.
    /// Default: false
    pub dev_sessions: bool,

    /// Session time-to-live in hours
    /// Default: 24
    pub session_ttl_hours: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            dev_sessions: false,
            session_ttl_hours: 24,
        }
    }
}

impl AuthConfig {
    /// Session TTL as a duration
    pub fn session_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.session_ttl_hours * 60 * 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert!(!config.dev_sessions);
        assert_eq!(config.session_ttl_hours, 24);
        assert_eq!(config.session_ttl().as_secs(), 24 * 60 * 60);
    }

    #[test]
    fn test_dev_sessions_enabled() {
        let toml = r#"
dev_sessions = true
session_ttl_hours = 1
"#;
        let config: AuthConfig = toml::from_str(toml).unwrap();
        assert!(config.dev_sessions);
        assert_eq!(config.session_ttl().as_secs(), 3600);
    }
}
