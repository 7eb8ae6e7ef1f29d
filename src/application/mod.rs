//! Application layer - orchestrates the dialogue core against the ports.
//!
//! - `dialogue_manager` - handles utterances for one session
//! - `chat_service` - session registry with per-session serialization

mod chat_service;
mod dialogue_manager;

pub use chat_service::{
    ChatError, ChatService, SessionLimits, SessionTranscript, DEFAULT_MAX_SESSIONS,
    DEFAULT_SESSION_IDLE_TIMEOUT,
};
pub use dialogue_manager::{
    DialogueManager, DialogueServices, DialogueSettings, DEFAULT_MAX_RESULTS,
};
