mod common;

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use bloomflow::navigation::Route;
use bloomflow::{ApiError, MemorySession, SessionStore};
use serde_json::{json, Value};

use common::{raw_client, serve, session_with_roles};

fn router() -> Router {
    Router::new()
        .route(
            "/expired",
            get(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"error": "Token expired"}))) }),
        )
        .route("/boom", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }))
        .route(
            "/bad-budget",
            get(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Budget is required and must be positive"})),
                )
            }),
        )
        .route(
            "/missing",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"detail": "nope"}))) }),
        )
        .route("/empty", get(|| async { StatusCode::NO_CONTENT }))
        .route(
            "/whoami",
            get(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                Json(json!({ "auth": auth, "content_type": content_type }))
            }),
        )
}

#[tokio::test]
async fn unauthorized_clears_session_and_redirects_to_login() {
    let base = serve(router()).await;
    let session = session_with_roles(&["client"]);
    let (client, navigator) = raw_client(&base, session.clone());

    let err = client.get::<Value>("/expired").await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized));
    assert!(session.get_token().is_none());
    assert!(session.get_user_info().is_none());
    assert_eq!(navigator.visited(), vec![Route::Login]);
}

#[tokio::test]
async fn non_json_failure_reports_status() {
    let base = serve(router()).await;
    let (client, navigator) = raw_client(&base, Arc::new(MemorySession::new()));

    let err = client.get::<Value>("/boom").await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP error! status: 500");
    assert_eq!(err.status(), Some(500));
    assert!(navigator.visited().is_empty());
}

#[tokio::test]
async fn json_error_message_is_verbatim() {
    let base = serve(router()).await;
    let (client, _) = raw_client(&base, Arc::new(MemorySession::new()));

    let err = client.get::<Value>("/bad-budget").await.unwrap_err();
    assert_eq!(err.to_string(), "Budget is required and must be positive");

    let err = client.get::<Value>("/missing").await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! status: 404");
}

#[tokio::test]
async fn empty_success_body_decodes_as_null() {
    let base = serve(router()).await;
    let (client, _) = raw_client(&base, Arc::new(MemorySession::new()));

    let body: Value = client.get("/empty").await.unwrap();
    assert_eq!(body, Value::Null);
    let _: () = client.get("/empty").await.unwrap();
}

#[tokio::test]
async fn bearer_header_follows_session() {
    let base = serve(router()).await;

    let session = session_with_roles(&["admin"]);
    let token = session.get_token().unwrap();
    let (client, _) = raw_client(&base, session);
    let body: Value = client.get("/whoami").await.unwrap();
    assert_eq!(body["auth"], json!(format!("Bearer {token}")));
    assert_eq!(body["content_type"], json!("application/json"));

    let (anonymous, _) = raw_client(&base, Arc::new(MemorySession::new()));
    let body: Value = anonymous.get("/whoami").await.unwrap();
    assert_eq!(body["auth"], Value::Null);
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let (client, navigator) = raw_client("http://127.0.0.1:9", Arc::new(MemorySession::new()));
    let err = client.get::<Value>("/anything").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert!(navigator.visited().is_empty());
}
