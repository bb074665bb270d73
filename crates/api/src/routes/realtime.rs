//! Realtime voice session routes
//!
//! Placeholder surface for the live-call integration. No media backend is
//! wired in, so token minting fails closed rather than handing out
//! credentials that connect to nothing.

use axum::{routing::post, Router};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::state::AppState;

/// Realtime routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/token", post(create_token))
}

/// Mint a realtime call token
///
/// POST /api/realtime/token
///
/// Always responds 501 until a media backend is configured.
async fn create_token(_user: AuthUser) -> Result<(), ApiError> {
    Err(ApiError::NotImplemented("realtime tokens"))
}
