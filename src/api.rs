//! Authenticated JSON client shared by every service module.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::ApiError;
use crate::navigation::{Navigator, Route};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        http: Client,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            session,
            navigator,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, &[], None::<&()>).await
    }

    /// GET with query pairs, sent in order; keys may repeat.
    pub async fn get_query<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, query, None::<&()>).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::POST, endpoint, &[], Some(body)).await
    }

    /// POST without a request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::POST, endpoint, &[], None::<&()>).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, endpoint, &[], Some(body)).await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Method::PATCH, endpoint, &[], Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, endpoint, &[], None::<&()>).await
    }

    /// Downloads a binary body (report PDFs). Non-2xx fails with
    /// [`ApiError::Export`]; 401 follows the usual logout policy.
    pub async fn get_bytes(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<u8>, ApiError> {
        let url = self.url(endpoint);
        debug!("GET {} (binary)", url);
        let response = self
            .authorize(self.http.get(&url))
            .query(query)
            .send()
            .await
            .map_err(|e| {
                error!("API request error: {}", e);
                ApiError::Network(e)
            })?;
        let response = self.reject_unauthorized(response)?;

        let status = response.status();
        if !status.is_success() {
            error!("Export from {} failed with status {}", url, status);
            return Err(ApiError::Export { status: status.as_u16() });
        }
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let value = self.send(method, endpoint, query, body).await.inspect_err(|e| {
            error!("API request error: {}", e);
        })?;
        Ok(serde_json::from_value(value)?)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Value, ApiError> {
        let url = self.url(endpoint);
        debug!("{} {}", method, url);

        let mut builder = self
            .authorize(self.http.request(method, &url))
            .header(CONTENT_TYPE, "application/json");
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = self.reject_unauthorized(builder.send().await?)?;
        let status = response.status();

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        if !is_json {
            if !status.is_success() {
                return Err(ApiError::Http { status: status.as_u16() });
            }
            return Ok(Value::Null);
        }

        let data: Value = response.json().await?;
        if !status.is_success() {
            return Err(match error_message(&data) {
                Some(message) => ApiError::Api { status: status.as_u16(), message },
                None => ApiError::Http { status: status.as_u16() },
            });
        }
        Ok(data)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.get_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Any 401 ends the session: storage is wiped and the user is sent to
    /// the login screen.
    fn reject_unauthorized(&self, response: Response) -> Result<Response, ApiError> {
        if response.status() == StatusCode::UNAUTHORIZED {
            self.session.clear();
            self.navigator.redirect(Route::Login);
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }
}

/// `error` field of a JSON error body, if present and non-empty.
fn error_message(data: &Value) -> Option<String> {
    match data.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_message_prefers_string() {
        assert_eq!(
            error_message(&json!({"error": "Access denied"})).as_deref(),
            Some("Access denied")
        );
    }

    #[test]
    fn empty_or_missing_error_falls_back() {
        assert!(error_message(&json!({"error": ""})).is_none());
        assert!(error_message(&json!({"message": "nope"})).is_none());
        assert!(error_message(&json!({"error": null})).is_none());
    }

    #[test]
    fn structured_error_is_stringified() {
        assert_eq!(
            error_message(&json!({"error": {"code": 7}})).as_deref(),
            Some("{\"code\":7}")
        );
    }
}
