//! Auth endpoints
//!
//! Identity lookup plus dev-only session management.
//!
//! `GET /user` always returns the same shape: the stored user row, created
//! on first sight from the resolved identity. There is no unauthenticated
//! fallback shape.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use voiceforge_auth::Identity;
use voiceforge_store::{User, UserProfile};

use crate::auth::{extract_token, AuthUser};
use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request/Response types
// =============================================================================

/// Canonical user response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_image_url: user.profile_image_url,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Create session request (dev only)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

/// Create session response (dev only)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub token: String,
    pub user: UserResponse,
}

// =============================================================================
// Routes
// =============================================================================

/// Auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(get_user))
        .route("/session", post(create_session).delete(delete_session))
}

// =============================================================================
// Handlers
// =============================================================================

/// Get the authenticated user
///
/// GET /api/auth/user
///
/// Upserts the resolved identity so the row always exists by the time it is
/// returned. First sight of a caller provisions them.
async fn get_user(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let profile = profile_from_identity(&user.0);
    let stored = state.store.users().upsert(&profile).await?;

    Ok(Json(UserResponse::from(stored)))
}

/// Create a dev session
///
/// POST /api/auth/session
///
/// Only available when dev sessions are enabled; otherwise the route
/// responds 404 as if it did not exist. Upserts the user and returns a
/// session token for it.
async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    if !state.dev_sessions {
        return Err(ApiError::not_found("resource"));
    }

    let identity = Identity {
        id: req.id,
        email: req.email,
        first_name: req.first_name,
        last_name: req.last_name,
        profile_image_url: req.profile_image_url,
    };
    identity
        .validate()
        .map_err(|e| ApiError::validation("id", e.to_string()))?;

    let stored = state
        .store
        .users()
        .upsert(&profile_from_identity(&identity))
        .await?;

    let token = state.sessions.create(&identity).await?;
    let cookie = format!("session_id={}; Path=/; HttpOnly; SameSite=Lax", token);

    Ok((
        StatusCode::CREATED,
        [(axum::http::header::SET_COOKIE, cookie)],
        Json(CreateSessionResponse {
            token,
            user: UserResponse::from(stored),
        }),
    ))
}

/// Revoke the current session
///
/// DELETE /api/auth/session
///
/// Revocation is idempotent: an already-revoked token still gets 204.
async fn delete_session(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = extract_token(&headers).ok_or(ApiError::Unauthorized)?;
    state.sessions.revoke(&token).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Map a resolved identity onto the stored user profile
pub(crate) fn profile_from_identity(identity: &Identity) -> UserProfile {
    UserProfile {
        id: identity.id.clone(),
        email: identity.email.clone(),
        first_name: identity.first_name.clone(),
        last_name: identity.last_name.clone(),
        profile_image_url: identity.profile_image_url.clone(),
    }
}
