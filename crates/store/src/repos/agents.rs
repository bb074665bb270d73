//! Voice agent repository
//!
//! CRUD operations for voice agents. Lookups by id intentionally do not
//! filter by owner: the HTTP layer performs the ownership check so it can
//! fold "not yours" into "not found".

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::models::{AgentStatus, NewVoiceAgent, VoiceAgent, VoiceAgentPatch};
use crate::repos::users::parse_timestamp;

/// Voice agent repository
pub struct VoiceAgentRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> VoiceAgentRepo<'a> {
    /// Create a new voice agent repository
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all agents owned by a user, oldest first
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<VoiceAgent>> {
        let rows = sqlx::query(
            "SELECT * FROM voice_agents WHERE user_id = ? ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.iter().map(row_to_agent).collect())
    }

    /// Get an agent by id, regardless of owner
    pub async fn get_by_id(&self, id: i64) -> Result<Option<VoiceAgent>> {
        let row = sqlx::query("SELECT * FROM voice_agents WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.as_ref().map(row_to_agent))
    }

    /// Create a new agent
    ///
    /// Assigns a fresh id and sets status to draft unless overridden. Fails
    /// if the name is empty or the owner does not exist.
    pub async fn create(&self, agent: &NewVoiceAgent) -> Result<VoiceAgent> {
        if agent.name.trim().is_empty() {
            return Err(StoreError::invalid("name", "must not be empty"));
        }

        let status = agent.status.unwrap_or_default();
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO voice_agents (user_id, name, goal, voice_model, knowledge_base, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&agent.user_id)
        .bind(&agent.name)
        .bind(&agent.goal)
        .bind(&agent.voice_model)
        .bind(&agent.knowledge_base)
        .bind(status.as_str())
        .bind(&now)
        .bind(&now)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("FOREIGN KEY constraint") {
                StoreError::invalid("user_id", format!("unknown user: {}", agent.user_id))
            } else {
                StoreError::Database(e)
            }
        })?;

        let id = result.last_insert_rowid();
        debug!(agent_id = id, user_id = %agent.user_id, "voice agent created");

        self.get_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found("voice agent", id.to_string()))
    }

    /// Apply a partial patch to an agent
    ///
    /// Only fields present in the patch change; updated_at is refreshed.
    /// Fails with not-found if the id does not exist.
    pub async fn update(&self, id: i64, patch: &VoiceAgentPatch) -> Result<VoiceAgent> {
        if let Some(ref name) = patch.name {
            if name.trim().is_empty() {
                return Err(StoreError::invalid("name", "must not be empty"));
            }
        }

        let current = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found("voice agent", id.to_string()))?;

        let name = patch.name.as_ref().unwrap_or(&current.name);
        let goal = patch.goal.as_ref().or(current.goal.as_ref());
        let voice_model = patch.voice_model.as_ref().or(current.voice_model.as_ref());
        let knowledge_base = patch
            .knowledge_base
            .as_ref()
            .or(current.knowledge_base.as_ref());
        let status = patch.status.unwrap_or(current.status);
        let updated_at = Utc::now().to_rfc3339();

        let affected = sqlx::query(
            r#"
            UPDATE voice_agents
            SET name = ?, goal = ?, voice_model = ?, knowledge_base = ?, status = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(goal)
        .bind(voice_model)
        .bind(knowledge_base)
        .bind(status.as_str())
        .bind(&updated_at)
        .bind(id)
        .execute(self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(StoreError::not_found("voice agent", id.to_string()));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| StoreError::not_found("voice agent", id.to_string()))
    }

    /// Delete an agent
    pub async fn delete(&self, id: i64) -> Result<()> {
        let affected = sqlx::query("DELETE FROM voice_agents WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(StoreError::not_found("voice agent", id.to_string()));
        }

        debug!(agent_id = id, "voice agent deleted");
        Ok(())
    }
}

fn row_to_agent(row: &SqliteRow) -> VoiceAgent {
    let status_str: String = row.get("status");

    VoiceAgent {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        goal: row.get("goal"),
        voice_model: row.get("voice_model"),
        knowledge_base: row.get("knowledge_base"),
        status: AgentStatus::parse(&status_str).unwrap_or_default(),
        created_at: parse_timestamp(row.get("created_at")),
        updated_at: parse_timestamp(row.get("updated_at")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;
    use crate::models::UserProfile;
    use crate::repos::users::UserRepo;

    async fn store_with_user(id: &str) -> Store {
        let store = Store::open_memory().await.unwrap();
        UserRepo::new(store.pool())
            .upsert(&UserProfile::new(id))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_create_defaults_to_draft() {
        let store = store_with_user("u1").await;
        let repo = VoiceAgentRepo::new(store.pool());

        let agent = repo
            .create(&NewVoiceAgent::new("u1", "Support Bot"))
            .await
            .unwrap();
        assert_eq!(agent.user_id, "u1");
        assert_eq!(agent.name, "Support Bot");
        assert_eq!(agent.status, AgentStatus::Draft);

        let second = repo
            .create(&NewVoiceAgent::new("u1", "Sales Bot"))
            .await
            .unwrap();
        assert_ne!(agent.id, second.id);
    }

    #[tokio::test]
    async fn test_create_with_explicit_status() {
        let store = store_with_user("u1").await;
        let repo = VoiceAgentRepo::new(store.pool());

        let mut new_agent = NewVoiceAgent::new("u1", "Bot");
        new_agent.status = Some(AgentStatus::Ready);
        let agent = repo.create(&new_agent).await.unwrap();
        assert_eq!(agent.status, AgentStatus::Ready);
    }

    #[tokio::test]
    async fn test_create_empty_name_rejected() {
        let store = store_with_user("u1").await;
        let repo = VoiceAgentRepo::new(store.pool());

        let err = repo
            .create(&NewVoiceAgent::new("u1", "   "))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Invalid { field: "name", .. }));

        // Nothing persisted
        assert!(repo.list_for_user("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_unknown_owner_rejected() {
        let store = Store::open_memory().await.unwrap();
        let repo = VoiceAgentRepo::new(store.pool());

        let err = repo
            .create(&NewVoiceAgent::new("ghost", "Bot"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Invalid { field: "user_id", .. }));
    }

    #[tokio::test]
    async fn test_create_get_roundtrip() {
        let store = store_with_user("u1").await;
        let repo = VoiceAgentRepo::new(store.pool());

        let created = repo
            .create(
                &NewVoiceAgent::new("u1", "Scheduler")
                    .with_goal("Book appointments")
                    .with_voice_model("en-US-Wavenet-C"),
            )
            .await
            .unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_partial_update_touches_only_patched_fields() {
        let store = store_with_user("u1").await;
        let repo = VoiceAgentRepo::new(store.pool());

        let created = repo
            .create(&NewVoiceAgent::new("u1", "Bot").with_goal("Old goal"))
            .await
            .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        let patch = VoiceAgentPatch {
            goal: Some("X".to_string()),
            ..Default::default()
        };
        let updated = repo.update(created.id, &patch).await.unwrap();

        assert_eq!(updated.goal.as_deref(), Some("X"));
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.voice_model, created.voice_model);
        assert_eq!(updated.status, created.status);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_update_status_accepts_any_value() {
        // Transition legality is not enforced: draft → ready is allowed
        let store = store_with_user("u1").await;
        let repo = VoiceAgentRepo::new(store.pool());

        let created = repo.create(&NewVoiceAgent::new("u1", "Bot")).await.unwrap();
        let patch = VoiceAgentPatch {
            status: Some(AgentStatus::Ready),
            ..Default::default()
        };
        let updated = repo.update(created.id, &patch).await.unwrap();
        assert_eq!(updated.status, AgentStatus::Ready);

        let back = VoiceAgentPatch {
            status: Some(AgentStatus::Draft),
            ..Default::default()
        };
        assert_eq!(
            repo.update(created.id, &back).await.unwrap().status,
            AgentStatus::Draft
        );
    }

    #[tokio::test]
    async fn test_update_missing_id() {
        let store = store_with_user("u1").await;
        let repo = VoiceAgentRepo::new(store.pool());

        let err = repo
            .update(999, &VoiceAgentPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_is_owner_scoped() {
        let store = store_with_user("u1").await;
        UserRepo::new(store.pool())
            .upsert(&UserProfile::new("u2"))
            .await
            .unwrap();
        let repo = VoiceAgentRepo::new(store.pool());

        repo.create(&NewVoiceAgent::new("u1", "A")).await.unwrap();
        repo.create(&NewVoiceAgent::new("u1", "B")).await.unwrap();
        repo.create(&NewVoiceAgent::new("u2", "C")).await.unwrap();

        let u1_agents = repo.list_for_user("u1").await.unwrap();
        assert_eq!(u1_agents.len(), 2);
        assert!(u1_agents.iter().all(|a| a.user_id == "u1"));
        assert_eq!(repo.list_for_user("u2").await.unwrap().len(), 1);
        assert!(repo.list_for_user("u3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = store_with_user("u1").await;
        let repo = VoiceAgentRepo::new(store.pool());

        let agent = repo.create(&NewVoiceAgent::new("u1", "Bot")).await.unwrap();
        repo.delete(agent.id).await.unwrap();
        assert!(repo.get_by_id(agent.id).await.unwrap().is_none());

        let err = repo.delete(agent.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
