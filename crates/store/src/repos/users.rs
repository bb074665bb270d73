//! User repository
//!
//! Lookup and upsert for user rows. The upsert is a single
//! `INSERT .. ON CONFLICT DO UPDATE` - never a read-then-write race.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::models::{User, UserProfile};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepo<'a> {
    /// Create a new user repository
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a user by id
    pub async fn get(&self, id: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, first_name, last_name, profile_image_url, created_at, updated_at
            FROM users WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| row_to_user(&r)))
    }

    /// Insert or update a user keyed by id
    ///
    /// On conflict all profile fields are overwritten and updated_at is
    /// refreshed; created_at keeps its original value. Returns the stored
    /// row.
    pub async fn upsert(&self, profile: &UserProfile) -> Result<User> {
        if profile.id.is_empty() {
            return Err(StoreError::invalid("id", "must not be empty"));
        }

        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO users (id, email, first_name, last_name, profile_image_url, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                email = excluded.email,
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                profile_image_url = excluded.profile_image_url,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.profile_image_url)
        .bind(&now)
        .bind(&now)
        .execute(self.pool)
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE constraint") {
                StoreError::already_exists(
                    "user email",
                    profile.email.clone().unwrap_or_default(),
                )
            } else {
                StoreError::Database(e)
            }
        })?;

        debug!(user_id = %profile.id, "user upserted");

        self.get(&profile.id)
            .await?
            .ok_or_else(|| StoreError::not_found("user", &profile.id))
    }
}

pub(crate) fn row_to_user(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        profile_image_url: row.get("profile_image_url"),
        created_at: parse_timestamp(row.get("created_at")),
        updated_at: parse_timestamp(row.get("updated_at")),
    }
}

/// Parse an RFC 3339 timestamp column, falling back to now on corrupt data
pub(crate) fn parse_timestamp(s: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    #[tokio::test]
    async fn test_get_missing_user() {
        let store = Store::open_memory().await.unwrap();
        let repo = UserRepo::new(store.pool());
        assert!(repo.get("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_inserts_then_updates() {
        let store = Store::open_memory().await.unwrap();
        let repo = UserRepo::new(store.pool());

        let created = repo
            .upsert(&UserProfile::new("u1").with_email("a@example.com"))
            .await
            .unwrap();
        assert_eq!(created.id, "u1");
        assert_eq!(created.email.as_deref(), Some("a@example.com"));

        // Same id, changed profile: one row, fields overwritten
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let updated = repo
            .upsert(
                &UserProfile::new("u1")
                    .with_email("a@example.com")
                    .with_name("Ada", "Lovelace"),
            )
            .await
            .unwrap();
        assert_eq!(updated.id, "u1");
        assert_eq!(updated.first_name.as_deref(), Some("Ada"));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent_on_identity() {
        let store = Store::open_memory().await.unwrap();
        let repo = UserRepo::new(store.pool());

        let profile = UserProfile::new("u1").with_email("a@example.com");
        let first = repo.upsert(&profile).await.unwrap();
        let second = repo.upsert(&profile).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(first.email, second.email);
        assert_eq!(first.created_at, second.created_at);
    }

    #[tokio::test]
    async fn test_duplicate_email_across_users_rejected() {
        let store = Store::open_memory().await.unwrap();
        let repo = UserRepo::new(store.pool());

        repo.upsert(&UserProfile::new("u1").with_email("a@example.com"))
            .await
            .unwrap();
        let err = repo
            .upsert(&UserProfile::new("u2").with_email("a@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_empty_id_rejected() {
        let store = Store::open_memory().await.unwrap();
        let repo = UserRepo::new(store.pool());
        let err = repo.upsert(&UserProfile::new("")).await.unwrap_err();
        assert!(matches!(err, StoreError::Invalid { field: "id", .. }));
    }
}
