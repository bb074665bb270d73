//! Database configuration

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Database configuration
///
/// # Example
///
/// ```toml
/// [database]
/// path = "~/.voiceforge/voiceforge.db"   # default
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    /// Default: "~/.voiceforge/voiceforge.db" (expanded at runtime)
    pub path: Option<PathBuf>,
}

impl DatabaseConfig {
    /// Get the database path, expanding ~ to the home directory
    pub fn db_path(&self) -> PathBuf {
        if let Some(ref path) = self.path {
            expand_tilde(path)
        } else {
            dirs::home_dir()
                .map(|h| h.join(".voiceforge").join("voiceforge.db"))
                .unwrap_or_else(|| PathBuf::from("./data/voiceforge.db"))
        }
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    path.to_str()
        .and_then(|s| s.strip_prefix("~/"))
        .and_then(|stripped| dirs::home_dir().map(|home| home.join(stripped)))
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_is_resolved() {
        let config = DatabaseConfig::default();
        assert!(config.path.is_none());
        assert!(config.db_path().ends_with("voiceforge.db"));
    }

    #[test]
    fn test_custom_path() {
        let toml = r#"
path = "/var/lib/voiceforge/app.db"
"#;
        let config: DatabaseConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.db_path(), PathBuf::from("/var/lib/voiceforge/app.db"));
    }

    #[test]
    fn test_expand_tilde() {
        let path = PathBuf::from("~/test/path.db");
        let expanded = expand_tilde(&path);
        assert!(!expanded.to_str().unwrap().starts_with('~'));
    }
}
