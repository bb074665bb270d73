//! Shared helpers for auth tests

use crate::identity::Identity;

/// A fully populated identity for tests
pub fn test_identity(id: &str) -> Identity {
    Identity {
        id: id.to_string(),
        email: Some(format!("{id}@example.com")),
        first_name: Some("Test".to_string()),
        last_name: Some("User".to_string()),
        profile_image_url: None,
    }
}
