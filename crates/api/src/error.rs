//! API error types
//!
//! Provides structured error responses for the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use voiceforge_store::StoreError;

/// A single field-level validation failure
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request parameters
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Authentication required
    #[error("authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// One or more request fields failed validation
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    /// Endpoint is declared but not wired to a backend
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),

    /// Storage error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Session store error
    #[error(transparent)]
    Session(#[from] voiceforge_auth::AuthError),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Store(e) => match e {
                StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                StoreError::Invalid { .. } => StatusCode::BAD_REQUEST,
                StoreError::AlreadyExists { .. } => StatusCode::CONFLICT,
                StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotImplemented(_) => "NOT_IMPLEMENTED",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Store(e) => match e {
                StoreError::NotFound { .. } => "NOT_FOUND",
                StoreError::Invalid { .. } => "VALIDATION_ERROR",
                StoreError::AlreadyExists { .. } => "CONFLICT",
                StoreError::Database(_) => "INTERNAL_ERROR",
            },
            Self::Session(_) => "INTERNAL_ERROR",
        }
    }

    // Helper constructors

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create a not found error
    ///
    /// The message names only the entity, never the reason. Absent and
    /// not-owned must be indistinguishable to the caller.
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(entity.to_string())
    }

    /// Create a validation error for a single field
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code (machine-readable)
    pub error: &'static str,
    /// Error message (human-readable)
    pub message: String,
    /// Field-level details, present on validation errors only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal detail stays in the log, not the response body
        let message = match &self {
            Self::Internal(_) | Self::Store(StoreError::Database(_)) | Self::Session(_) => {
                "internal server error".to_string()
            }
            other => other.to_string(),
        };

        let errors = match &self {
            Self::Validation(errors) => Some(errors.clone()),
            Self::Store(StoreError::Invalid { field, message }) => {
                Some(vec![FieldError::new(field, message.clone())])
            }
            _ => None,
        };

        let body = ErrorResponse {
            error: self.code(),
            message,
            errors,
        };

        if status.is_server_error() {
            tracing::error!(error_code = body.error, detail = %self, "API error");
        } else {
            tracing::warn!(
                error_code = body.error,
                error_message = %body.message,
                status = %status,
                "API error"
            );
        }

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::not_found("voice agent").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::validation("name", "required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotImplemented("realtime tokens").status_code(),
            StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(
            ApiError::from(StoreError::not_found("voice agent", "7")).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StoreError::invalid("name", "empty")).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_message_is_generic() {
        let err = ApiError::not_found("voice agent");
        assert_eq!(err.to_string(), "voice agent not found");
    }
}
