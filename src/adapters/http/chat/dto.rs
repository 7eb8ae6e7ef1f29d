//! Request and response DTOs for chat endpoints.

use serde::{Deserialize, Serialize};

use crate::application::SessionTranscript;
use crate::domain::dialogue::{DialoguePhase, Message, MessageKind, Sender};

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    /// Employee identity, usually an email address.
    pub identity: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: String,
    pub kind: MessageKind,
}

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            content: message.content.clone(),
            sender: message.sender,
            timestamp: message.timestamp.as_datetime().to_rfc3339(),
            kind: message.kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<MessageResponse>,
}

impl From<&[Message]> for MessagesResponse {
    fn from(messages: &[Message]) -> Self {
        Self {
            messages: messages.iter().map(MessageResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub session_id: String,
    pub identity: String,
    pub phase: DialoguePhase,
    pub messages: Vec<MessageResponse>,
}

impl From<SessionTranscript> for TranscriptResponse {
    fn from(transcript: SessionTranscript) -> Self {
        Self {
            session_id: transcript.session_id.to_string(),
            identity: transcript.identity.to_string(),
            phase: transcript.phase,
            messages: transcript.messages.iter().map(MessageResponse::from).collect(),
        }
    }
}

/// Error body for every non-2xx chat response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            code: "SERVICE_UNAVAILABLE".to_string(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
        }
    }
}
