use std::sync::Arc;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::claims::{decode_unverified, Claims};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::roles::RoleSet;
use crate::session::SessionStore;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub access_token: String,
    /// `None` when the token payload could not be decoded.
    pub user: Option<Claims>,
}

/// Password-grant login against the identity provider and the local
/// view of the resulting session.
#[derive(Clone)]
pub struct AuthService {
    http: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    session: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(config: &ClientConfig, http: Client, session: Arc<dyn SessionStore>) -> Self {
        Self {
            http,
            token_url: config.endpoints.token.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            session,
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResult, ApiError> {
        let form = [
            ("grant_type", "password"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("username", username),
            ("password", password),
        ];
        let response = self.http.post(&self.token_url).form(&form[..]).send().await?;

        if !response.status().is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let message = ["error_description", "error"]
                .iter()
                .find_map(|key| body.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()))
                .unwrap_or("Login failed")
                .to_string();
            warn!("Login for {} rejected: {}", username, message);
            return Err(ApiError::Login(message));
        }

        let TokenResponse { access_token } = response.json().await?;
        let user = match decode_unverified(&access_token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                warn!("Error decoding token: {}", e);
                None
            }
        };
        self.session.set_token(&access_token, user.as_ref())?;
        info!("Logged in as {}", username);

        Ok(LoginResult { access_token, user })
    }

    pub fn token(&self) -> Option<String> {
        self.session.get_token()
    }

    pub fn user_info(&self) -> Option<Claims> {
        self.session.get_user_info()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now().timestamp())
    }

    /// An expired token is dropped on sight so it is never sent again.
    pub fn is_authenticated_at(&self, now_secs: i64) -> bool {
        if self.session.get_token().is_none() {
            return false;
        }
        if let Some(claims) = self.session.get_user_info() {
            if claims.is_expired_at(now_secs) {
                info!("Access token expired; clearing session");
                self.logout();
                return false;
            }
        }
        true
    }

    /// Raw role names from the stored claims.
    pub fn role_names(&self) -> Vec<String> {
        self.session
            .get_user_info()
            .map(|claims| claims.role_names())
            .unwrap_or_default()
    }

    pub fn user_roles(&self) -> RoleSet {
        RoleSet::from_names(self.role_names())
    }

    pub fn logout(&self) {
        self.session.clear();
    }

    /// There is no refresh-token flow: an expired session means logging in
    /// again.
    pub fn refresh_token(&self) -> Option<String> {
        self.logout();
        None
    }
}
