//! BloomFlow: client for the flower-shop microservices
//!
//! Typed service clients (users, inventory, orders, payments, bouquet, reports) sharing
//! one authenticated HTTP wrapper, plus the session, role and route-guard logic the shop
//! front end needs.
//!
//! Business rules (stock, pricing, bouquet generation, payments, aggregation) live in the services.

pub mod api;
pub mod auth;
pub mod claims;
pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod navigation;
pub mod roles;
pub mod services;
pub mod session;
// One module per screen: pure view models plus the loaders that fill them
pub mod views;

use std::sync::Arc;

use reqwest::Client;
use tracing::info;

pub use api::ApiClient;
pub use auth::{AuthService, LoginResult};
pub use config::{ClientConfig, EndpointMode, Endpoints};
pub use error::{ApiError, FormError, SessionError, ViewError};
pub use navigation::{guard, nav_items, Access, Navigator, Route};
pub use roles::{has_any_role, has_role, Role, RoleSet};
pub use session::{FileSession, MemorySession, SessionStore};

use services::{
    BouquetService, InventoryService, OrderService, PaymentService, ReportService, UserService,
};

/// Entry point wiring configuration, session storage and navigation into
/// the individual service clients.
#[derive(Clone)]
pub struct BloomFlow {
    config: ClientConfig,
    http: Client,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl BloomFlow {
    pub fn new(
        config: ClientConfig,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::with_http(config, Client::new(), session, navigator)
    }

    pub fn with_http(
        config: ClientConfig,
        http: Client,
        session: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self { config, http, session, navigator }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    fn client(&self, base_url: &str) -> ApiClient {
        ApiClient::new(
            base_url,
            self.http.clone(),
            self.session.clone(),
            self.navigator.clone(),
        )
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(&self.config, self.http.clone(), self.session.clone())
    }

    pub fn users(&self) -> UserService {
        UserService::new(self.client(&self.config.endpoints.users))
    }

    pub fn inventory(&self) -> InventoryService {
        InventoryService::new(self.client(&self.config.endpoints.inventory))
    }

    pub fn orders(&self) -> OrderService {
        OrderService::new(self.client(&self.config.endpoints.orders))
    }

    /// Checkout endpoints are served by the order service.
    pub fn payments(&self) -> PaymentService {
        PaymentService::new(self.client(&self.config.endpoints.orders))
    }

    pub fn bouquet(&self) -> BouquetService {
        BouquetService::new(self.client(&self.config.endpoints.bouquet))
    }

    pub fn reports(&self) -> ReportService {
        ReportService::new(self.client(&self.config.endpoints.reports))
    }

    pub fn roles(&self) -> RoleSet {
        self.auth().user_roles()
    }

    /// Runs the route guard against the current session and performs the
    /// redirect, if any, through the navigator.
    pub fn visit(&self, route: Route) -> Access {
        let auth = self.auth();
        let access = guard(route, auth.is_authenticated(), &auth.user_roles());
        if let Access::Redirect(target) = access {
            info!("Access to {} denied; redirecting to {}", route, target);
            self.navigator.redirect(target);
        }
        access
    }
}
