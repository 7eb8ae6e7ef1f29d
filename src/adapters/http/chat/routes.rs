//! HTTP routes for chat endpoints.

use axum::{
    routing::{delete, post},
    Router,
};

use super::handlers::{close_session, create_session, get_transcript, send_message, ChatAppState};

/// Creates the chat router. Mount under `/api/chat`.
pub fn chat_routes(state: ChatAppState) -> Router {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:id", delete(close_session))
        .route(
            "/sessions/:id/messages",
            post(send_message).get(get_transcript),
        )
        .with_state(state)
}
