use futures::join;
use tracing::warn;

use crate::models::Order;
use crate::roles::RoleSet;
use crate::services::inventory::DEFAULT_EXPIRING_DAYS;
use crate::services::{InventoryService, OrderService};

const RECENT_ORDERS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_flowers: usize,
    pub total_orders: usize,
    pub total_revenue: f64,
    pub expiring_lots: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_orders: Vec<Order>,
}

impl Dashboard {
    pub fn apply_orders(&mut self, orders: Vec<Order>) {
        self.stats.total_orders = orders.len();
        self.stats.total_revenue = orders.iter().map(|o| o.total_price).sum();
        self.recent_orders = orders.into_iter().take(RECENT_ORDERS).collect();
    }
}

/// Each figure is fetched on its own; one failing leaves its default.
pub async fn load_dashboard(
    inventory: &InventoryService,
    orders: &OrderService,
    roles: &RoleSet,
) -> Dashboard {
    let staff = roles.can_manage_inventory();
    let summary = async {
        if staff {
            Some(inventory.summary().await)
        } else {
            None
        }
    };
    let expiring = async {
        if staff {
            Some(inventory.expiring_lots(DEFAULT_EXPIRING_DAYS).await)
        } else {
            None
        }
    };
    let (summary, expiring, order_list) = join!(summary, expiring, orders.orders());

    let mut dashboard = Dashboard::default();
    match summary {
        Some(Ok(summary)) => dashboard.stats.total_flowers = summary.summary.len(),
        Some(Err(e)) => warn!("Error loading inventory summary: {}", e),
        None => {}
    }
    match expiring {
        Some(Ok(lots)) => dashboard.stats.expiring_lots = lots.len(),
        Some(Err(e)) => warn!("Error loading expiring lots: {}", e),
        None => {}
    }
    match order_list {
        Ok(list) => dashboard.apply_orders(list),
        Err(e) => warn!("Error loading orders: {}", e),
    }
    dashboard
}
