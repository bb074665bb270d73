//! VoiceForge API
//!
//! HTTP API for the VoiceForge voice-agent dashboard.
//!
//! # Overview
//!
//! This crate provides the REST API for managing voice agents. It's built on
//! Axum and integrates with the `voiceforge-store` crate for persistence and
//! `voiceforge-auth` for session-based identity resolution.
//!
//! # Usage
//!
//! ```ignore
//! use voiceforge_api::{build_router, AppState};
//! use voiceforge_store::Store;
//!
//! let store = Store::open("voiceforge.db").await?;
//! let state = AppState::with_memory_sessions(store);
//!
//! let app = build_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! # Endpoints
//!
//! ## Auth
//! - `GET /api/auth/user` - Current user (auto-provisioned on first sight)
//! - `POST /api/auth/session` - Create a dev session (dev mode only)
//! - `DELETE /api/auth/session` - Revoke the current session
//!
//! ## Voice agents
//! - `GET /api/voice-agents` - List the caller's agents
//! - `POST /api/voice-agents` - Create an agent
//! - `GET /api/voice-agents/{id}` - Get an agent (owner only)
//! - `PATCH /api/voice-agents/{id}` - Update an agent (owner only)
//! - `DELETE /api/voice-agents/{id}` - Delete an agent (owner only)
//!
//! ## Other
//! - `POST /api/realtime/token` - Realtime call token (501 placeholder)
//! - `GET /health` - Health check
//!
//! All `/api` routes except dev session creation require a session token,
//! supplied either as a bearer Authorization header or a `session_id`
//! cookie.

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

// Re-exports
pub use auth::{AuthUser, HasSessionStore, OptionalAuthUser};
pub use error::{ApiError, FieldError, Result};
pub use routes::build_router;
pub use state::AppState;
