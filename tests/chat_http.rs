//! HTTP integration tests for the chat API.
//!
//! Exercise the assembled router with `tower::ServiceExt::oneshot`, backed
//! by in-memory collaborators.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use buddy::adapters::http::{api_router, with_middleware};
use buddy::adapters::knowledge::FaqKnowledgeBase;
use buddy::adapters::leave::InMemoryLeaveStore;
use buddy::adapters::usage::InMemoryUsageLog;
use buddy::application::{ChatService, DialogueServices, DialogueSettings};
use buddy::config::ServerConfig;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app_with(store: InMemoryLeaveStore, settings: DialogueSettings, server: &ServerConfig) -> Router {
    let services = DialogueServices::new(
        Arc::new(store),
        Arc::new(FaqKnowledgeBase::with_default_entries()),
        Arc::new(InMemoryUsageLog::new()),
    );
    let chat = Arc::new(ChatService::new(services, settings));
    with_middleware(api_router(chat), server)
}

fn test_app() -> Router {
    app_with(
        InMemoryLeaveStore::default(),
        DialogueSettings::default(),
        &ServerConfig::default(),
    )
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn open_session(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/chat/sessions",
            json!({ "identity": "sam@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["session_id"]
        .as_str()
        .unwrap()
        .to_string()
}

async fn post_message(app: &Router, session_id: &str, content: &str) -> axum::response::Response {
    app.clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/chat/sessions/{}/messages", session_id),
            json!({ "content": content }),
        ))
        .await
        .unwrap()
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test]
async fn create_session_returns_created_with_id() {
    let app = test_app();

    let session_id = open_session(&app).await;

    assert!(session_id.parse::<uuid::Uuid>().is_ok());
}

#[tokio::test]
async fn create_session_rejects_blank_identity() {
    let app = test_app();

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/chat/sessions",
            json!({ "identity": "  " }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn delete_session_closes_it() {
    let app = test_app();
    let session_id = open_session(&app).await;
    let uri = format!("/api/chat/sessions/{}", session_id);

    let response = app.clone().oneshot(delete(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_message(&app, &session_id, "hello").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(delete(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Messages
// =============================================================================

#[tokio::test]
async fn send_message_returns_bot_reply() {
    let app = test_app();
    let session_id = open_session(&app).await;

    let response = post_message(&app, &session_id, "I need 3 days leave").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["sender"], "bot");
    assert_eq!(messages[0]["kind"], "leave-request");
    assert!(messages[0]["content"]
        .as_str()
        .unwrap()
        .contains("What date would you like your leave to start?"));
}

#[tokio::test]
async fn empty_content_is_bad_request() {
    let app = test_app();
    let session_id = open_session(&app).await;

    let response = post_message(&app, &session_id, "   ").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_session_id_is_bad_request() {
    let app = test_app();

    let response = post_message(&app, "not-a-uuid", "hello").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid session ID");
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let app = test_app();
    let unknown = uuid::Uuid::new_v4().to_string();

    let response = post_message(&app, &unknown, "hello").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn timed_out_request_still_records_the_turn() {
    let store = InMemoryLeaveStore::default();
    let server = ServerConfig {
        request_timeout_secs: 1,
        ..Default::default()
    };
    let settings = DialogueSettings {
        reply_delay: Duration::from_millis(1500),
        ..Default::default()
    };
    let app = app_with(store.clone(), settings, &server);
    let session_id = open_session(&app).await;
    let transcript_uri = format!("/api/chat/sessions/{}/messages", session_id);

    // Every turn outlives the request; reading the transcript waits for it.
    post_message(&app, &session_id, "I need 3 days leave starting 2025-09-15").await;
    app.clone().oneshot(get(&transcript_uri)).await.unwrap();

    let response = post_message(&app, &session_id, "yes").await;
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

    let response = app.oneshot(get(&transcript_uri)).await.unwrap();
    let body = body_json(response).await;
    let messages = body["messages"].as_array().unwrap();
    let last = messages.last().unwrap();
    assert_eq!(last["sender"], "bot");
    assert!(last["content"].as_str().unwrap().contains("approved"));
    assert_eq!(body["phase"], "idle");
    assert_eq!(store.submission_count().await, 1);
}

// =============================================================================
// Transcript
// =============================================================================

#[tokio::test]
async fn transcript_lists_both_sides_with_phase() {
    let app = test_app();
    let session_id = open_session(&app).await;
    post_message(&app, &session_id, "I need 3 days leave").await;

    let response = app
        .oneshot(get(&format!("/api/chat/sessions/{}/messages", session_id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["session_id"], session_id.as_str());
    assert_eq!(body["identity"], "sam@example.com");
    assert_eq!(body["phase"], "awaiting_start_date");
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["sender"], "user");
    assert_eq!(messages[0]["content"], "I need 3 days leave");
    assert_eq!(messages[1]["sender"], "bot");
}

#[tokio::test]
async fn transcript_of_unknown_session_is_not_found() {
    let app = test_app();

    let response = app
        .oneshot(get(&format!(
            "/api/chat/sessions/{}/messages",
            uuid::Uuid::new_v4()
        )))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_service_name() {
    let app = test_app();

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "buddy");
}
