//! HTTP adapter for chat endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateSessionRequest, CreateSessionResponse, ErrorResponse, MessageResponse,
    MessagesResponse, SendMessageRequest, TranscriptResponse,
};
pub use handlers::ChatAppState;
pub use routes::chat_routes;
