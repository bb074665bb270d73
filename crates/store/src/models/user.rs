//! User models
//!
//! Users are identified by an opaque id issued by the external identity
//! provider. Everything else is optional display metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile data for a user upsert
///
/// The id is the external identity; the remaining fields overwrite the
/// stored row on conflict.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

impl UserProfile {
    /// Create a profile with just an id
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }

    /// Set the email
    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    /// Set first and last name
    pub fn with_name(mut self, first: &str, last: &str) -> Self {
        self.first_name = Some(first.to_string());
        self.last_name = Some(last.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_builder() {
        let profile = UserProfile::new("u1")
            .with_email("u1@example.com")
            .with_name("Ada", "Lovelace");
        assert_eq!(profile.id, "u1");
        assert_eq!(profile.email.as_deref(), Some("u1@example.com"));
        assert_eq!(profile.first_name.as_deref(), Some("Ada"));
        assert!(profile.profile_image_url.is_none());
    }
}
