//! Storage models

mod agent;
mod user;

pub use agent::{AgentStatus, NewVoiceAgent, VoiceAgent, VoiceAgentPatch};
pub use user::{User, UserProfile};
