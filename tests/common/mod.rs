#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use bloomflow::claims::decode_unverified;
use bloomflow::navigation::RecordingNavigator;
use bloomflow::{ApiClient, BloomFlow, ClientConfig, MemorySession};
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::Client;
use serde_json::Value;
use tokio::net::TcpListener;

/// Serves `router` on an ephemeral port and returns its origin.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn mint(payload: Value) -> String {
    encode(&Header::default(), &payload, &EncodingKey::from_secret(b"test-secret")).unwrap()
}

/// Session holding a token with the given realm roles.
pub fn session_with_roles(roles: &[&str]) -> Arc<MemorySession> {
    let token = mint(serde_json::json!({
        "sub": "kc-1",
        "preferred_username": "tester",
        "exp": 4_102_444_800i64,
        "realm_access": { "roles": roles },
    }));
    let claims = decode_unverified(&token).unwrap();
    Arc::new(MemorySession::with_token(&token, Some(claims)))
}

pub struct Harness {
    pub app: BloomFlow,
    pub session: Arc<MemorySession>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn harness(base_url: &str, session: Arc<MemorySession>) -> Harness {
    let navigator = Arc::new(RecordingNavigator::new());
    let app = BloomFlow::new(
        ClientConfig::with_base_url(base_url),
        session.clone(),
        navigator.clone(),
    );
    Harness { app, session, navigator }
}

pub fn raw_client(
    base_url: &str,
    session: Arc<MemorySession>,
) -> (ApiClient, Arc<RecordingNavigator>) {
    let navigator = Arc::new(RecordingNavigator::new());
    let client = ApiClient::new(base_url, Client::new(), session, navigator.clone());
    (client, navigator)
}
