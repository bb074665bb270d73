//! Application state
//!
//! Shared state for API handlers: the persistence store and the session
//! store capability.

use std::sync::Arc;

use voiceforge_auth::{MemorySessionStore, SessionStore};
use voiceforge_store::Store;

use crate::auth::HasSessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Persistence store (users, voice agents)
    pub store: Store,
    /// Session store capability for identity resolution
    pub sessions: Arc<dyn SessionStore>,
    /// Allow the dev session endpoints (POST /api/auth/session)
    pub dev_sessions: bool,
}

impl AppState {
    /// Create application state with an explicit session backend
    pub fn new(store: Store, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            sessions,
            dev_sessions: false,
        }
    }

    /// Create application state with an in-memory session store
    ///
    /// Dev session endpoints are enabled; this is the configuration used by
    /// local development and tests.
    pub fn with_memory_sessions(store: Store) -> Self {
        Self {
            store,
            sessions: Arc::new(MemorySessionStore::new()),
            dev_sessions: true,
        }
    }

    /// Enable or disable the dev session endpoints
    pub fn with_dev_sessions(mut self, enabled: bool) -> Self {
        self.dev_sessions = enabled;
        self
    }
}

impl HasSessionStore for AppState {
    fn session_store(&self) -> Arc<dyn SessionStore> {
        Arc::clone(&self.sessions)
    }
}
