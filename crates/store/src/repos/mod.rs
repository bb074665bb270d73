//! Repositories

mod agents;
pub(crate) mod users;

pub use agents::VoiceAgentRepo;
pub use users::UserRepo;
