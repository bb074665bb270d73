//! Voice agent models
//!
//! A voice agent is a user-configured conversational bot: name, goal, voice
//! model, knowledge base, and a lifecycle status. Every agent has exactly one
//! owner for its entire lifetime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a voice agent
///
/// The expected progression is draft → training → ready → deployed, but
/// transition legality is not enforced: any status may be written by an
/// update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    /// Initial configuration state
    #[default]
    Draft,
    /// Knowledge base / voice training in progress
    Training,
    /// Trained and ready to deploy
    Ready,
    /// Live
    Deployed,
}

impl AgentStatus {
    /// Parse status from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "training" => Some(Self::Training),
            "ready" => Some(Self::Ready),
            "deployed" => Some(Self::Deployed),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Training => "training",
            Self::Ready => "ready",
            Self::Deployed => "deployed",
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored voice agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceAgent {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    pub goal: Option<String>,
    pub voice_model: Option<String>,
    pub knowledge_base: Option<String>,
    pub status: AgentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a voice agent
#[derive(Debug, Clone)]
pub struct NewVoiceAgent {
    /// Owning user id (required, must reference an existing user)
    pub user_id: String,
    /// Display name (required, non-empty)
    pub name: String,
    pub goal: Option<String>,
    pub voice_model: Option<String>,
    pub knowledge_base: Option<String>,
    /// Initial status; defaults to draft when not set
    pub status: Option<AgentStatus>,
}

impl NewVoiceAgent {
    /// Create a new agent definition with required fields only
    pub fn new(user_id: &str, name: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: name.to_string(),
            goal: None,
            voice_model: None,
            knowledge_base: None,
            status: None,
        }
    }

    /// Set the goal
    pub fn with_goal(mut self, goal: &str) -> Self {
        self.goal = Some(goal.to_string());
        self
    }

    /// Set the voice model identifier
    pub fn with_voice_model(mut self, voice_model: &str) -> Self {
        self.voice_model = Some(voice_model.to_string());
        self
    }
}

/// Partial update for a voice agent
///
/// Only fields that are `Some` are written; everything else keeps its stored
/// value. The owner is not patchable - ownership never transfers.
#[derive(Debug, Clone, Default)]
pub struct VoiceAgentPatch {
    pub name: Option<String>,
    pub goal: Option<String>,
    pub voice_model: Option<String>,
    pub knowledge_base: Option<String>,
    pub status: Option<AgentStatus>,
}

impl VoiceAgentPatch {
    /// True when no fields are set
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.goal.is_none()
            && self.voice_model.is_none()
            && self.knowledge_base.is_none()
            && self.status.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_roundtrip() {
        for status in [
            AgentStatus::Draft,
            AgentStatus::Training,
            AgentStatus::Ready,
            AgentStatus::Deployed,
        ] {
            assert_eq!(AgentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AgentStatus::parse("archived"), None);
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&AgentStatus::Deployed).unwrap();
        assert_eq!(json, "\"deployed\"");
        let parsed: AgentStatus = serde_json::from_str("\"training\"").unwrap();
        assert_eq!(parsed, AgentStatus::Training);
    }

    #[test]
    fn test_new_agent_builder() {
        let agent = NewVoiceAgent::new("u1", "Support Bot").with_goal("Answer tickets");
        assert_eq!(agent.user_id, "u1");
        assert_eq!(agent.name, "Support Bot");
        assert_eq!(agent.goal.as_deref(), Some("Answer tickets"));
        assert!(agent.status.is_none());
    }

    #[test]
    fn test_empty_patch() {
        assert!(VoiceAgentPatch::default().is_empty());
        let patch = VoiceAgentPatch {
            goal: Some("X".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
