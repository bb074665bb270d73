//! Voice agent endpoints
//!
//! CRUD endpoints for the caller's voice agents. Every route is scoped to
//! the resolved identity: the owner id always comes from the session, never
//! from the request body, and an agent that exists but belongs to someone
//! else is reported exactly like one that does not exist.
//!
//! | Endpoint | Auth | Notes |
//! |----------|------|-------|
//! | `GET /voice-agents` | Required | List caller's agents |
//! | `POST /voice-agents` | Required | Create, owner forced to caller |
//! | `GET /voice-agents/{id}` | Required | Owner only, else 404 |
//! | `PATCH /voice-agents/{id}` | Required | Owner only, else 404 |
//! | `DELETE /voice-agents/{id}` | Required | Owner only, else 404 |

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use voiceforge_store::{AgentStatus, NewVoiceAgent, Store, VoiceAgent, VoiceAgentPatch};

use crate::auth::AuthUser;
use crate::error::{ApiError, FieldError};
use crate::state::AppState;

/// Maximum agent name length
const MAX_NAME_LEN: usize = 200;

/// Maximum goal length
const MAX_GOAL_LEN: usize = 2000;

/// Maximum voice model identifier length
const MAX_VOICE_MODEL_LEN: usize = 200;

/// Maximum knowledge base length
const MAX_KNOWLEDGE_BASE_LEN: usize = 10_000;

// =============================================================================
// Request/Response types
// =============================================================================

/// Create voice agent request
///
/// There is no owner field: the owner is always the resolved caller, and
/// unknown fields (including any client-supplied owner id) are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVoiceAgentRequest {
    pub name: Option<String>,
    pub goal: Option<String>,
    pub voice_model: Option<String>,
    pub knowledge_base: Option<String>,
    pub status: Option<String>,
}

/// Update voice agent request
///
/// All fields optional; absent fields keep their stored value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVoiceAgentRequest {
    pub name: Option<String>,
    pub goal: Option<String>,
    pub voice_model: Option<String>,
    pub knowledge_base: Option<String>,
    pub status: Option<String>,
}

/// Voice agent response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceAgentResponse {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub goal: Option<String>,
    pub voice_model: Option<String>,
    pub knowledge_base: Option<String>,
    pub status: AgentStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<VoiceAgent> for VoiceAgentResponse {
    fn from(agent: VoiceAgent) -> Self {
        Self {
            id: agent.id,
            user_id: agent.user_id,
            name: agent.name,
            goal: agent.goal,
            voice_model: agent.voice_model,
            knowledge_base: agent.knowledge_base,
            status: agent.status,
            created_at: agent.created_at.to_rfc3339(),
            updated_at: agent.updated_at.to_rfc3339(),
        }
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Voice agent routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_agents).post(create_agent))
        .route(
            "/{id}",
            get(get_agent).patch(update_agent).delete(delete_agent),
        )
}

// =============================================================================
// Handlers
// =============================================================================

/// List the caller's voice agents
///
/// GET /api/voice-agents
///
/// Returns a JSON array, empty if the caller owns no agents.
async fn list_agents(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<VoiceAgentResponse>>, ApiError> {
    let agents = state.store.agents().list_for_user(&user.id).await?;

    Ok(Json(
        agents.into_iter().map(VoiceAgentResponse::from).collect(),
    ))
}

/// Create a voice agent
///
/// POST /api/voice-agents
async fn create_agent(
    user: AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateVoiceAgentRequest>,
) -> Result<(StatusCode, Json<VoiceAgentResponse>), ApiError> {
    let mut errors = Vec::new();

    let name = match req.name.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(FieldError::new("name", "is required"));
            None
        }
        Some(name) if name.len() > MAX_NAME_LEN => {
            errors.push(FieldError::new("name", "must be 1-200 characters"));
            None
        }
        Some(name) => Some(name.to_string()),
    };
    let status = validate_optional_status(req.status.as_deref(), &mut errors);
    validate_lengths(
        req.goal.as_deref(),
        req.voice_model.as_deref(),
        req.knowledge_base.as_deref(),
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    // The agents table references users; a caller whose session predates
    // their first /api/auth/user lookup has no row yet, so provision it here
    state
        .store
        .users()
        .upsert(&super::auth::profile_from_identity(&user.0))
        .await?;

    let new_agent = NewVoiceAgent {
        // Owner comes from the session, never from the body
        user_id: user.id.clone(),
        name: name.unwrap_or_default(),
        goal: req.goal,
        voice_model: req.voice_model,
        knowledge_base: req.knowledge_base,
        status,
    };

    let agent = state.store.agents().create(&new_agent).await?;

    Ok((StatusCode::CREATED, Json(VoiceAgentResponse::from(agent))))
}

/// Get a voice agent by id
///
/// GET /api/voice-agents/{id}
async fn get_agent(
    user: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<VoiceAgentResponse>, ApiError> {
    let agent = require_owned_agent(&state.store, id, &user.id).await?;

    Ok(Json(VoiceAgentResponse::from(agent)))
}

/// Update a voice agent
///
/// PATCH /api/voice-agents/{id}
async fn update_agent(
    user: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(req): Json<UpdateVoiceAgentRequest>,
) -> Result<Json<VoiceAgentResponse>, ApiError> {
    let mut errors = Vec::new();

    let name = match req.name.as_deref().map(str::trim) {
        None => None,
        Some("") => {
            errors.push(FieldError::new("name", "must not be empty"));
            None
        }
        Some(name) if name.len() > MAX_NAME_LEN => {
            errors.push(FieldError::new("name", "must be 1-200 characters"));
            None
        }
        Some(name) => Some(name.to_string()),
    };
    let status = validate_optional_status(req.status.as_deref(), &mut errors);
    validate_lengths(
        req.goal.as_deref(),
        req.voice_model.as_deref(),
        req.knowledge_base.as_deref(),
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    // Ownership check before any write; a mismatch must not mutate
    require_owned_agent(&state.store, id, &user.id).await?;

    let patch = VoiceAgentPatch {
        name,
        goal: req.goal,
        voice_model: req.voice_model,
        knowledge_base: req.knowledge_base,
        status,
    };

    let agent = state.store.agents().update(id, &patch).await?;

    Ok(Json(VoiceAgentResponse::from(agent)))
}

/// Delete a voice agent
///
/// DELETE /api/voice-agents/{id}
async fn delete_agent(
    user: AuthUser,
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    require_owned_agent(&state.store, id, &user.id).await?;

    state.store.agents().delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Helper functions
// =============================================================================

/// Fetch an agent the caller owns
///
/// Absent id and owner mismatch produce the same generic 404; callers of
/// this endpoint can never probe for other users' agent ids.
async fn require_owned_agent(
    store: &Store,
    id: i64,
    caller_id: &str,
) -> Result<VoiceAgent, ApiError> {
    let agent = store
        .agents()
        .get_by_id(id)
        .await?
        .filter(|agent| agent.user_id == caller_id)
        .ok_or_else(|| ApiError::not_found("voice agent"))?;

    Ok(agent)
}

/// Validate an optional status string, collecting an error if unparseable
fn validate_optional_status(
    status: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> Option<AgentStatus> {
    let status = status?;
    match AgentStatus::parse(status) {
        Some(status) => Some(status),
        None => {
            errors.push(FieldError::new(
                "status",
                "must be one of: draft, training, ready, deployed",
            ));
            None
        }
    }
}

/// Validate lengths of the free-text fields
fn validate_lengths(
    goal: Option<&str>,
    voice_model: Option<&str>,
    knowledge_base: Option<&str>,
    errors: &mut Vec<FieldError>,
) {
    if goal.is_some_and(|s| s.len() > MAX_GOAL_LEN) {
        errors.push(FieldError::new("goal", "must be at most 2000 characters"));
    }
    if voice_model.is_some_and(|s| s.len() > MAX_VOICE_MODEL_LEN) {
        errors.push(FieldError::new(
            "voiceModel",
            "must be at most 200 characters",
        ));
    }
    if knowledge_base.is_some_and(|s| s.len() > MAX_KNOWLEDGE_BASE_LEN) {
        errors.push(FieldError::new(
            "knowledgeBase",
            "must be at most 10000 characters",
        ));
    }
}
