//! Session-based authentication for VoiceForge
//!
//! Identity resolution is a capability: callers hold a [`SessionStore`] and
//! never care which backend is behind it. [`MemorySessionStore`] backs
//! development and tests; [`SqliteSessionStore`] persists sessions across
//! restarts with optional expiry.

mod error;
mod identity;
mod session;
mod sqlite_store;

pub mod test_utils;

pub use error::{AuthError, Result};
pub use identity::Identity;
pub use session::{MemorySessionStore, SessionStore, TOKEN_PREFIX};
pub use sqlite_store::SqliteSessionStore;
