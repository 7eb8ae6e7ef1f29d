//! HTTP adapters - REST API implementations.
//!
//! `api_router` assembles the chat and health endpoints; `with_middleware`
//! adds tracing, request timeout and CORS layers from server configuration.

pub mod chat;
mod health;

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::application::ChatService;
use crate::config::ServerConfig;

pub use chat::{chat_routes, ChatAppState};
pub use health::{health_routes, HealthResponse, SERVICE_NAME};

/// Routes for the whole API, without middleware.
pub fn api_router(chat: Arc<ChatService>) -> Router {
    Router::new()
        .nest("/api/chat", chat_routes(ChatAppState::new(chat)))
        .merge(health_routes())
}

/// Wraps a router with request tracing, timeout and CORS.
///
/// With no configured origins any origin is allowed.
pub fn with_middleware(router: Router, server: &ServerConfig) -> Router {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = if origins.is_empty() {
        CorsLayer::new().allow_origin(Any)
    } else {
        CorsLayer::new().allow_origin(origins)
    }
    .allow_methods(Any)
    .allow_headers(Any);

    router
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
