//! HTTP handlers for chat endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{ChatError, ChatService};
use crate::domain::foundation::SessionId;

use super::dto::{
    CreateSessionRequest, CreateSessionResponse, ErrorResponse, MessagesResponse,
    SendMessageRequest, TranscriptResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ChatAppState {
    chat: Arc<ChatService>,
}

impl ChatAppState {
    pub fn new(chat: Arc<ChatService>) -> Self {
        Self { chat }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/chat/sessions - Open a chat session
pub async fn create_session(
    State(state): State<ChatAppState>,
    Json(req): Json<CreateSessionRequest>,
) -> Response {
    match state.chat.start_session(&req.identity).await {
        Ok(session_id) => {
            let response = CreateSessionResponse {
                session_id: session_id.to_string(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_chat_error(e),
    }
}

/// POST /api/chat/sessions/:id/messages - Send one utterance
pub async fn send_message(
    State(state): State<ChatAppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.chat.send_message(session_id, &req.content).await {
        Ok(messages) => {
            let response = MessagesResponse::from(messages.as_slice());
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_chat_error(e),
    }
}

/// DELETE /api/chat/sessions/:id - Close a chat session
pub async fn close_session(
    State(state): State<ChatAppState>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.chat.close_session(session_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_chat_error(e),
    }
}

/// GET /api/chat/sessions/:id/messages - Full transcript
pub async fn get_transcript(
    State(state): State<ChatAppState>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.chat.transcript(session_id).await {
        Ok(transcript) => {
            let response = TranscriptResponse::from(transcript);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_chat_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn handle_chat_error(error: ChatError) -> Response {
    match error {
        ChatError::EmptyContent => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(error.to_string())),
        )
            .into_response(),
        ChatError::Validation(e) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(e.to_string())),
        )
            .into_response(),
        ChatError::SessionNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", &id.to_string())),
        )
            .into_response(),
        ChatError::SessionBusy(_) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conflict(error.to_string())),
        )
            .into_response(),
        ChatError::SessionLimitReached(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::unavailable(error.to_string())),
        )
            .into_response(),
        ChatError::TurnFailed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal("Failed to handle message")),
        )
            .into_response(),
    }
}
