//! Database connection and schema management
//!
//! SQLite-backed storage for users and voice agents. The `Store` owns the
//! connection pool; repositories borrow it for individual operations.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::{Result, StoreError};

/// Storage backend
///
/// Sole access point to persisted rows. Clone is cheap (the pool is an Arc
/// internally).
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open or create a store at the given path
    ///
    /// Creates the database file and tables if they don't exist.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::invalid(
                    "path",
                    format!("failed to create directory {}: {}", parent.display(), e),
                )
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;

        info!("Store opened at {}", path.display());
        Ok(store)
    }

    /// Create an in-memory store (for testing and ephemeral runs)
    ///
    /// Uses a single connection: each in-memory SQLite connection is its own
    /// database, so the pool must not open a second one.
    pub async fn open_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize database schema
    async fn init_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA_USERS).execute(&self.pool).await?;
        sqlx::query(INDEX_USERS_EMAIL).execute(&self.pool).await?;

        sqlx::query(SCHEMA_VOICE_AGENTS).execute(&self.pool).await?;
        sqlx::query(INDEX_AGENTS_USER).execute(&self.pool).await?;

        debug!("Store schema initialized");
        Ok(())
    }
}

// =============================================================================
// Schema
// =============================================================================

const SCHEMA_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    email TEXT UNIQUE,
    first_name TEXT,
    last_name TEXT,
    profile_image_url TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
"#;

const SCHEMA_VOICE_AGENTS: &str = r#"
CREATE TABLE IF NOT EXISTS voice_agents (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    name TEXT NOT NULL,
    goal TEXT,
    voice_model TEXT,
    knowledge_base TEXT,
    status TEXT NOT NULL DEFAULT 'draft',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id)
)
"#;

const INDEX_USERS_EMAIL: &str = "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)";

const INDEX_AGENTS_USER: &str =
    "CREATE INDEX IF NOT EXISTS idx_voice_agents_user ON voice_agents(user_id)";
