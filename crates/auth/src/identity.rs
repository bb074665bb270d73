//! Resolved identity
//!
//! The claims an external identity provider supplies for a caller. The id is
//! the only required field and is stable across requests; everything else is
//! display metadata that may be refreshed on each resolution.

use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// A resolved caller identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable, externally issued id
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

impl Identity {
    /// Create an identity with just an id
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            email: None,
            first_name: None,
            last_name: None,
            profile_image_url: None,
        }
    }

    /// Set the email
    pub fn with_email(mut self, email: &str) -> Self {
        self.email = Some(email.to_string());
        self
    }

    /// Reject identities an upstream provider should never emit
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(AuthError::InvalidIdentity("empty id".to_string()));
        }
        if self.id.len() > 255 {
            return Err(AuthError::InvalidIdentity("id too long".to_string()));
        }
        Ok(())
    }
}
