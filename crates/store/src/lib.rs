//! VoiceForge storage
//!
//! SQLite-backed persistence for users and voice agents.
//!
//! # Usage
//!
//! ```ignore
//! use voiceforge_store::{NewVoiceAgent, Store, UserProfile};
//!
//! // File-based (production)
//! let store = Store::open("data/voiceforge.db").await?;
//!
//! // In-memory (testing)
//! let store = Store::open_memory().await?;
//!
//! // Access repositories
//! let user = store.users().upsert(&UserProfile::new("u1")).await?;
//! let agent = store
//!     .agents()
//!     .create(&NewVoiceAgent::new(&user.id, "Support Bot"))
//!     .await?;
//! ```
//!
//! # Ownership
//!
//! `VoiceAgentRepo::get_by_id` returns the row regardless of owner; the HTTP
//! layer compares the owner id so absence and ownership mismatch produce the
//! same not-found response.

mod db;
mod error;
mod models;
mod repos;

pub use db::Store;
pub use error::{Result, StoreError};
pub use models::{AgentStatus, NewVoiceAgent, User, UserProfile, VoiceAgent, VoiceAgentPatch};
pub use repos::{UserRepo, VoiceAgentRepo};

impl Store {
    /// Get the user repository
    pub fn users(&self) -> UserRepo<'_> {
        UserRepo::new(self.pool())
    }

    /// Get the voice agent repository
    pub fn agents(&self) -> VoiceAgentRepo<'_> {
        VoiceAgentRepo::new(self.pool())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_full_lifecycle() {
        let store = Store::open_memory().await.unwrap();

        // Upsert user, create agent, patch it, read it back
        let user = store
            .users()
            .upsert(&UserProfile::new("u1").with_email("u1@example.com"))
            .await
            .unwrap();
        assert_eq!(user.id, "u1");

        let agent = store
            .agents()
            .create(&NewVoiceAgent::new("u1", "Bot A"))
            .await
            .unwrap();
        assert_eq!(agent.status, AgentStatus::Draft);

        let patch = VoiceAgentPatch {
            status: Some(AgentStatus::Ready),
            ..Default::default()
        };
        let updated = store.agents().update(agent.id, &patch).await.unwrap();
        assert_eq!(updated.status, AgentStatus::Ready);
        assert_eq!(updated.name, "Bot A");

        let listed = store.agents().list_for_user("u1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, agent.id);
    }
}
