//! Routes, the route guard and navbar visibility.

use std::fmt;
use std::sync::Mutex;

use tracing::info;

use crate::roles::{Role, RoleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Register,
    Dashboard,
    Inventory,
    Orders,
    NewOrder,
    OrderDetail(i64),
    OrderPayment(i64),
    Bouquet,
    Profile,
    Reports,
    PendingApprovals,
}

const STAFF: &[Role] = &[Role::Admin, Role::Florar];
const ADMIN: &[Role] = &[Role::Admin];

impl Route {
    /// Resolves a path; `/` and anything unrecognised land on the dashboard.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            ["login"] => Route::Login,
            ["signup"] => Route::Signup,
            ["register"] => Route::Register,
            ["dashboard"] => Route::Dashboard,
            ["inventory"] => Route::Inventory,
            ["orders"] => Route::Orders,
            ["orders", "new"] => Route::NewOrder,
            ["orders", id] => id.parse().map(Route::OrderDetail).unwrap_or(Route::Dashboard),
            ["orders", id, "payment"] => {
                id.parse().map(Route::OrderPayment).unwrap_or(Route::Dashboard)
            }
            ["bouquet"] => Route::Bouquet,
            ["profile"] => Route::Profile,
            ["reports"] => Route::Reports,
            ["admin", "approvals"] => Route::PendingApprovals,
            _ => Route::Dashboard,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Inventory => "/inventory".to_string(),
            Route::Orders => "/orders".to_string(),
            Route::NewOrder => "/orders/new".to_string(),
            Route::OrderDetail(id) => format!("/orders/{id}"),
            Route::OrderPayment(id) => format!("/orders/{id}/payment"),
            Route::Bouquet => "/bouquet".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::Reports => "/reports".to_string(),
            Route::PendingApprovals => "/admin/approvals".to_string(),
        }
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Signup)
    }

    /// Roles of which the user needs at least one; `None` means any
    /// authenticated user.
    pub fn required_roles(&self) -> Option<&'static [Role]> {
        match self {
            Route::Inventory | Route::Reports => Some(STAFF),
            Route::PendingApprovals => Some(ADMIN),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Route),
}

/// UI gate only: the services enforce roles on their own.
pub fn guard(route: Route, authenticated: bool, roles: &RoleSet) -> Access {
    if route == Route::Login && authenticated {
        return Access::Redirect(Route::Dashboard);
    }
    if route.is_public() {
        return Access::Allow;
    }
    if !authenticated {
        return Access::Redirect(Route::Login);
    }
    match route.required_roles() {
        Some(required) if !roles.contains_any(required) => Access::Redirect(Route::Dashboard),
        _ => Access::Allow,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
}

pub fn nav_items(roles: &RoleSet) -> Vec<NavItem> {
    let candidates = [
        NavItem { label: "Dashboard", route: Route::Dashboard },
        NavItem { label: "Inventory", route: Route::Inventory },
        NavItem { label: "Orders", route: Route::Orders },
        NavItem { label: "Bouquet Builder", route: Route::Bouquet },
        NavItem { label: "Reports", route: Route::Reports },
        NavItem { label: "Approvals", route: Route::PendingApprovals },
        NavItem { label: "Profile", route: Route::Profile },
    ];
    candidates
        .into_iter()
        .filter(|item| match item.route.required_roles() {
            Some(required) => roles.contains_any(required),
            None => true,
        })
        .collect()
}

/// Receives forced navigations, e.g. the redirect to login after a 401.
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: Route);
}

/// Logs the redirect; the CLI has no screen to switch.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, route: Route) {
        info!("Redirecting to {}", route);
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<Route> {
        self.visited.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Route> {
        self.visited().last().copied()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, route: Route) {
        if let Ok(mut visited) = self.visited.lock() {
            visited.push(route);
        }
    }
}
