//! Authentication error types

use thiserror::Error;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Session database error
    #[error("session store error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored identity could not be decoded
    #[error("corrupt session record: {0}")]
    CorruptSession(#[from] serde_json::Error),

    /// Identity claims are malformed
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),
}

/// Result type for auth operations
pub type Result<T> = std::result::Result<T, AuthError>;
