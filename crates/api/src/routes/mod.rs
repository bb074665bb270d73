//! API routes
//!
//! Domain-grouped HTTP route handlers.

pub mod agents;
pub mod auth;
pub mod ops;
pub mod realtime;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Operations routes (health - no auth)
        .merge(ops::routes())
        // Auth routes (current user, dev sessions)
        .nest("/api/auth", auth::routes())
        // Voice agent CRUD
        .nest("/api/voice-agents", agents::routes())
        // Realtime call tokens (placeholder)
        .nest("/api/realtime", realtime::routes())
        .with_state(state)
}
