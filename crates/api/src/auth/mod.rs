//! Authentication extractors for Axum
//!
//! Resolves the caller's identity through the injected session store. Tokens
//! arrive either as a bearer Authorization header or as a `session_id`
//! cookie.
//!
//! # Setup
//!
//! Your app state must implement `HasSessionStore`:
//!
//! ```ignore
//! use std::sync::Arc;
//! use voiceforge_auth::{MemorySessionStore, SessionStore};
//! use voiceforge_api::auth::HasSessionStore;
//!
//! struct AppState {
//!     sessions: Arc<dyn SessionStore>,
//! }
//!
//! impl HasSessionStore for AppState {
//!     fn session_store(&self) -> Arc<dyn SessionStore> {
//!         Arc::clone(&self.sessions)
//!     }
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use voiceforge_auth::{Identity, SessionStore};

/// Maximum token size (8KB) - prevents memory exhaustion attacks
const MAX_TOKEN_SIZE: usize = 8 * 1024;

/// Maximum cookie header size (16KB)
const MAX_COOKIE_SIZE: usize = 16 * 1024;

/// Cookie carrying the session token
const SESSION_COOKIE: &str = "session_id";

/// Trait for app state that provides a session store
///
/// Implement this trait on your app state to enable the `AuthUser` extractor.
pub trait HasSessionStore: Send + Sync {
    /// Get the session store
    fn session_store(&self) -> Arc<dyn SessionStore>;
}

/// Error returned when authentication fails
#[derive(Debug)]
pub enum AuthError {
    /// No token provided
    MissingToken,
    /// Token is unknown, revoked, or expired
    InvalidToken,
    /// Session store failure during resolution
    ResolveFailed,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "AUTH_REQUIRED",
                "Authentication required",
            ),
            Self::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid session token",
            ),
            Self::ResolveFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "internal server error",
            ),
        };

        let body = serde_json::json!({
            "error": code,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

/// Extract a session token from request headers with size limits
///
/// Checks in order:
/// 1. Authorization header (Bearer or raw)
/// 2. Cookie (session_id)
///
/// Returns None if the token exceeds MAX_TOKEN_SIZE.
pub(crate) fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_from_auth_header(headers) {
        return (token.len() <= MAX_TOKEN_SIZE).then_some(token);
    }

    if let Some(token) = extract_from_cookie(headers) {
        return (token.len() <= MAX_TOKEN_SIZE).then_some(token);
    }

    None
}

fn extract_from_auth_header(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get(AUTHORIZATION)?;

    // Check header size before converting to string
    if auth_header.len() > MAX_TOKEN_SIZE + 7 {
        // "Bearer " = 7 chars
        return None;
    }

    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn extract_from_cookie(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get("cookie")?;

    if cookie_header.len() > MAX_COOKIE_SIZE {
        return None;
    }

    let cookies = cookie_header.to_str().ok()?;

    for cookie in cookies.split(';') {
        let cookie = cookie.trim();

        if let Some(value) = cookie.strip_prefix(SESSION_COOKIE) {
            let Some(value) = value.strip_prefix('=') else {
                continue;
            };
            let value = value.trim();

            // Handle quoted values: session_id="value"
            let value = if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
                &value[1..value.len() - 1]
            } else {
                value
            };

            if !value.is_empty() && value.len() <= MAX_TOKEN_SIZE {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Authenticated user extractor
///
/// Resolves the caller's identity through the session store.
/// Returns `AuthError` if no token is present or the token does not resolve.
///
/// # Example
///
/// ```ignore
/// async fn handler(user: AuthUser) -> impl IntoResponse {
///     format!("Hello, {}!", user.id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl std::ops::Deref for AuthUser {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: HasSessionStore + Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers).ok_or(AuthError::MissingToken)?;

        let sessions = state.session_store();
        let identity = sessions.resolve(&token).await.map_err(|e| {
            tracing::error!(error = %e, "session resolution failed");
            AuthError::ResolveFailed
        })?;

        identity.map(AuthUser).ok_or(AuthError::InvalidToken)
    }
}

/// Optional authenticated user extractor
///
/// Like `AuthUser`, but returns `None` instead of an error when the request
/// carries no resolvable identity.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<Identity>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: HasSessionStore + Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = if let Some(token) = extract_token(&parts.headers) {
            state.session_store().resolve(&token).await.ok().flatten()
        } else {
            None
        };
        Ok(OptionalAuthUser(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                axum::http::HeaderName::try_from(*name).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_extract_bearer_token() {
        let h = headers(&[("authorization", "Bearer vf_abc123")]);
        assert_eq!(extract_token(&h).as_deref(), Some("vf_abc123"));
    }

    #[test]
    fn test_extract_raw_authorization_token() {
        let h = headers(&[("authorization", "vf_abc123")]);
        assert_eq!(extract_token(&h).as_deref(), Some("vf_abc123"));
    }

    #[test]
    fn test_extract_session_cookie() {
        let h = headers(&[("cookie", "theme=dark; session_id=vf_abc123; lang=en")]);
        assert_eq!(extract_token(&h).as_deref(), Some("vf_abc123"));
    }

    #[test]
    fn test_extract_quoted_cookie() {
        let h = headers(&[("cookie", "session_id=\"vf_abc123\"")]);
        assert_eq!(extract_token(&h).as_deref(), Some("vf_abc123"));
    }

    #[test]
    fn test_header_takes_precedence_over_cookie() {
        let h = headers(&[
            ("authorization", "Bearer vf_header"),
            ("cookie", "session_id=vf_cookie"),
        ]);
        assert_eq!(extract_token(&h).as_deref(), Some("vf_header"));
    }

    #[test]
    fn test_prefix_only_cookie_is_ignored() {
        // session_id_legacy must not match session_id
        let h = headers(&[("cookie", "session_id_legacy=vf_abc123")]);
        assert_eq!(extract_token(&h), None);
    }

    #[test]
    fn test_missing_and_empty_tokens() {
        assert_eq!(extract_token(&HeaderMap::new()), None);
        let h = headers(&[("authorization", "Bearer ")]);
        assert_eq!(extract_token(&h), None);
        let h = headers(&[("cookie", "session_id=")]);
        assert_eq!(extract_token(&h), None);
    }

    #[test]
    fn test_oversized_token_rejected() {
        let big = format!("Bearer {}", "x".repeat(MAX_TOKEN_SIZE + 1));
        let h = headers(&[("authorization", big.as_str())]);
        assert_eq!(extract_token(&h), None);
    }
}
