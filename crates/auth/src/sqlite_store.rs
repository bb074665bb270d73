//! SQLite-backed session store
//!
//! Sessions survive restarts; identities are stored as JSON. Expiry is
//! checked on resolve, so a stale row behaves exactly like an unknown token
//! until the next purge.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Result;
use crate::identity::Identity;
use crate::session::{new_token, SessionStore};

const SCHEMA_SESSIONS: &str = r#"
CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    token TEXT NOT NULL UNIQUE,
    identity TEXT NOT NULL,
    created_at TEXT NOT NULL,
    expires_at TEXT
)
"#;

const INDEX_SESSIONS_TOKEN: &str =
    "CREATE INDEX IF NOT EXISTS idx_sessions_token ON sessions(token)";

/// SQLite-backed session store
pub struct SqliteSessionStore {
    pool: SqlitePool,
    ttl: Option<Duration>,
}

impl SqliteSessionStore {
    /// Create a session store on an existing pool
    ///
    /// Sessions never expire when `ttl` is `None`.
    pub async fn new(pool: SqlitePool, ttl: Option<Duration>) -> Result<Self> {
        sqlx::query(SCHEMA_SESSIONS).execute(&pool).await?;
        sqlx::query(INDEX_SESSIONS_TOKEN).execute(&pool).await?;

        info!(ttl_secs = ttl.map(|t| t.as_secs()), "session store ready");
        Ok(Self { pool, ttl })
    }

    /// Delete all expired sessions, returning how many were removed
    pub async fn purge_expired(&self) -> Result<u64> {
        let now = Utc::now().to_rfc3339();
        let affected = sqlx::query(
            "DELETE FROM sessions WHERE expires_at IS NOT NULL AND expires_at < ?",
        )
        .bind(&now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected > 0 {
            debug!(purged = affected, "expired sessions removed");
        }
        Ok(affected)
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>> {
        let row = sqlx::query("SELECT identity, expires_at FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let expires_at: Option<String> = row.get("expires_at");
        if let Some(expires_at) = expires_at {
            let expired = DateTime::parse_from_rfc3339(&expires_at)
                .map(|dt| dt.with_timezone(&Utc) < Utc::now())
                .unwrap_or(true);
            if expired {
                return Ok(None);
            }
        }

        let identity_json: String = row.get("identity");
        let identity: Identity = serde_json::from_str(&identity_json)?;
        Ok(Some(identity))
    }

    async fn create(&self, identity: &Identity) -> Result<String> {
        identity.validate()?;

        let token = new_token();
        let now = Utc::now();
        let expires_at = self
            .ttl
            .and_then(|ttl| chrono::Duration::from_std(ttl).ok())
            .map(|ttl| (now + ttl).to_rfc3339());

        sqlx::query(
            r#"
            INSERT INTO sessions (id, token, identity, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(Uuid::new_v4().to_string())
        .bind(&token)
        .bind(serde_json::to_string(identity)?)
        .bind(now.to_rfc3339())
        .bind(&expires_at)
        .execute(&self.pool)
        .await?;

        debug!(user_id = %identity.id, "session created");
        Ok(token)
    }

    async fn revoke(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
