mod common;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Form, Json, Router};
use bloomflow::{ApiError, MemorySession, Role, SessionStore};
use serde_json::json;

use common::{harness, mint, serve};

const TOKEN_PATH: &str = "/keycloak/realms/bloomflow/protocol/openid-connect/token";

fn failing(status: StatusCode, body: serde_json::Value) -> Router {
    Router::new().route(
        TOKEN_PATH,
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    )
}

#[tokio::test]
async fn login_prefers_error_description() {
    let base = serve(failing(
        StatusCode::UNAUTHORIZED,
        json!({"error": "invalid_grant", "error_description": "Invalid user credentials"}),
    ))
    .await;
    let h = harness(&base, Arc::new(MemorySession::new()));

    let err = h.app.auth().login("ana", "wrong").await.unwrap_err();

    assert!(matches!(err, ApiError::Login(_)));
    assert_eq!(err.to_string(), "Invalid user credentials");
    assert!(h.session.get_token().is_none());
}

#[tokio::test]
async fn login_falls_back_to_error_code_then_generic() {
    let base = serve(failing(StatusCode::BAD_REQUEST, json!({"error": "invalid_client"}))).await;
    let h = harness(&base, Arc::new(MemorySession::new()));
    assert_eq!(
        h.app.auth().login("ana", "x").await.unwrap_err().to_string(),
        "invalid_client"
    );

    let base = serve(failing(StatusCode::BAD_GATEWAY, json!({}))).await;
    let h = harness(&base, Arc::new(MemorySession::new()));
    assert_eq!(
        h.app.auth().login("ana", "x").await.unwrap_err().to_string(),
        "Login failed"
    );
}

#[tokio::test]
async fn login_stores_token_and_claims() {
    let token = mint(json!({
        "sub": "kc-42",
        "email": "ana@example.com",
        "exp": 4_102_444_800i64,
        "realm_access": {"roles": ["florar", "offline_access"]},
    }));
    let seen: Arc<Mutex<HashMap<String, String>>> = Arc::default();
    let router = {
        let token = token.clone();
        let seen = seen.clone();
        Router::new().route(
            TOKEN_PATH,
            post(move |Form(form): Form<HashMap<String, String>>| {
                let token = token.clone();
                let seen = seen.clone();
                async move {
                    *seen.lock().unwrap() = form;
                    Json(json!({"access_token": token, "token_type": "Bearer"}))
                }
            }),
        )
    };
    let base = serve(router).await;
    let h = harness(&base, Arc::new(MemorySession::new()));
    let auth = h.app.auth();

    let result = auth.login("ana", "secret").await.unwrap();

    assert_eq!(result.access_token, token);
    assert_eq!(h.session.get_token().as_deref(), Some(token.as_str()));
    assert_eq!(result.user.as_ref().and_then(|c| c.email()), Some("ana@example.com"));
    assert!(auth.is_authenticated());
    assert!(auth.user_roles().contains(Role::Florar));
    assert_eq!(auth.role_names(), vec!["florar".to_string(), "offline_access".to_string()]);

    let form = seen.lock().unwrap().clone();
    assert_eq!(form.get("grant_type").map(String::as_str), Some("password"));
    assert_eq!(form.get("client_id").map(String::as_str), Some("bloomflow-api"));
    assert_eq!(form.get("username").map(String::as_str), Some("ana"));
    assert_eq!(form.get("password").map(String::as_str), Some("secret"));

    auth.logout();
    assert!(!auth.is_authenticated());
}

#[tokio::test]
async fn undecodable_token_still_logs_in() {
    let router = Router::new().route(
        TOKEN_PATH,
        post(|| async { Json(json!({"access_token": "not-a-jwt"})) }),
    );
    let base = serve(router).await;
    let h = harness(&base, Arc::new(MemorySession::new()));

    let result = h.app.auth().login("ana", "secret").await.unwrap();

    assert!(result.user.is_none());
    assert_eq!(h.session.get_token().as_deref(), Some("not-a-jwt"));
    assert!(h.session.get_user_info().is_none());
}
