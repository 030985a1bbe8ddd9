//! Client configuration.
//!
//! Loaded from the environment (and `.env` via dotenvy in the binaries).
//! Two endpoint layouts exist: everything behind one origin under the
//! `/keycloak` and `/api/*` prefixes (the dev proxy and the deployed
//! gateway), or each service on its own port.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_SERVICE_HOST: &str = "http://localhost";
pub const DEFAULT_REALM: &str = "bloomflow";
pub const DEFAULT_CLIENT_ID: &str = "bloomflow-api";
pub const DEFAULT_SESSION_DIR: &str = ".bloomflow";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointMode {
    #[default]
    Proxied,
    Direct,
}

impl FromStr for EndpointMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "proxied" | "proxy" => Ok(EndpointMode::Proxied),
            "direct" => Ok(EndpointMode::Direct),
            other => Err(format!("unknown endpoint mode: {other}")),
        }
    }
}

/// Base URL of every remote service, without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub token: String,
    pub auth: String,
    pub users: String,
    pub inventory: String,
    pub orders: String,
    pub bouquet: String,
    pub reports: String,
}

impl Endpoints {
    pub fn proxied(base_url: &str, realm: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            token: format!("{base}/keycloak/realms/{realm}/protocol/openid-connect/token"),
            auth: format!("{base}/api/auth"),
            users: format!("{base}/api/users"),
            inventory: format!("{base}/api/inventory"),
            orders: format!("{base}/api/orders"),
            bouquet: format!("{base}/api/bouquet"),
            reports: format!("{base}/api/reports"),
        }
    }

    pub fn direct(host: &str, realm: &str) -> Self {
        let host = host.trim_end_matches('/');
        Self {
            token: format!("{host}:8080/realms/{realm}/protocol/openid-connect/token"),
            auth: format!("{host}:5001"),
            users: format!("{host}:5002"),
            inventory: format!("{host}:5003"),
            orders: format!("{host}:5004"),
            bouquet: format!("{host}:5005"),
            reports: format!("{host}:5007"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoints: Endpoints,
    pub realm: String,
    pub client_id: String,
    pub client_secret: String,
    /// Only echoed to the user for the payment step; card entry happens
    /// with the payment provider.
    pub stripe_publishable_key: Option<String>,
    pub session_dir: PathBuf,
}

impl ClientConfig {
    pub fn new(endpoints: Endpoints) -> Self {
        Self {
            endpoints,
            realm: DEFAULT_REALM.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            client_secret: String::new(),
            stripe_publishable_key: None,
            session_dir: PathBuf::from(DEFAULT_SESSION_DIR),
        }
    }

    /// Every endpoint behind one origin, as the proxy lays them out.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(Endpoints::proxied(base_url, DEFAULT_REALM))
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let realm = lookup("KEYCLOAK_REALM").unwrap_or_else(|| DEFAULT_REALM.to_string());
        let mode = lookup("BLOOMFLOW_ENDPOINT_MODE")
            .and_then(|m| m.parse::<EndpointMode>().ok())
            .unwrap_or_default();
        let endpoints = match mode {
            EndpointMode::Proxied => {
                let base = lookup("BLOOMFLOW_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
                Endpoints::proxied(&base, &realm)
            }
            EndpointMode::Direct => {
                let host = lookup("BLOOMFLOW_SERVICE_HOST")
                    .unwrap_or_else(|| DEFAULT_SERVICE_HOST.to_string());
                Endpoints::direct(&host, &realm)
            }
        };

        Self {
            endpoints,
            client_id: lookup("KEYCLOAK_CLIENT_ID")
                .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
            client_secret: lookup("KEYCLOAK_CLIENT_SECRET").unwrap_or_default(),
            stripe_publishable_key: lookup("STRIPE_PUBLISHABLE_KEY").filter(|k| !k.is_empty()),
            session_dir: lookup("BLOOMFLOW_SESSION_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_DIR)),
            realm,
        }
    }
}
