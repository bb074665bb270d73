//! Session store capability
//!
//! An injected capability mapping opaque session tokens to resolved
//! identities. The HTTP layer depends only on the trait; deployments choose
//! the backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::identity::Identity;

/// Prefix on all session tokens
pub const TOKEN_PREFIX: &str = "vf_";

/// Mint a fresh opaque session token
pub(crate) fn new_token() -> String {
    format!("{}{}", TOKEN_PREFIX, Uuid::new_v4().simple())
}

/// Session store capability
///
/// `resolve` returns `None` for unknown, revoked, or expired tokens - the
/// caller cannot distinguish these cases.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Resolve a token to an identity
    async fn resolve(&self, token: &str) -> Result<Option<Identity>>;

    /// Create a session for an identity, returning the token
    async fn create(&self, identity: &Identity) -> Result<String>;

    /// Revoke a session token (no-op if unknown)
    async fn revoke(&self, token: &str) -> Result<()>;
}

/// In-memory session store
///
/// Process-local, no expiry. For development and tests only; restarts drop
/// all sessions.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Identity>>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True when no sessions exist
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>> {
        Ok(self.sessions.read().await.get(token).cloned())
    }

    async fn create(&self, identity: &Identity) -> Result<String> {
        identity.validate()?;
        let token = new_token();
        self.sessions
            .write()
            .await
            .insert(token.clone(), identity.clone());
        debug!(user_id = %identity.id, "session created");
        Ok(token)
    }

    async fn revoke(&self, token: &str) -> Result<()> {
        self.sessions.write().await.remove(token);
        Ok(())
    }
}
