//! Order list and order detail screens.

use std::str::FromStr;

use chrono::NaiveDate;
use futures::try_join;
use tracing::warn;

use crate::error::ApiError;
use crate::format::parse_day;
use crate::models::{Flower, Order, OrderStatus, PaymentStatus, User};
use crate::roles::{Role, RoleSet};
use crate::services::{InventoryService, OrderService, UserService};
use crate::views::flower_name;

#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub flower_type_id: i64,
    pub name: String,
    pub quantity: i64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub order: Order,
    /// `pending_payment` is shown as plain pending.
    pub display_status: OrderStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<ItemRow>,
    pub created_date: Option<NaiveDate>,
}

impl OrderRow {
    pub fn build(order: Order, flowers: &[Flower], users: &[User]) -> Self {
        let display_status = match order.status {
            OrderStatus::PendingPayment => OrderStatus::Pending,
            other => other,
        };
        let user = users.iter().find(|u| u.id == order.user_id);
        let customer_name = match user {
            Some(user) => user.label(),
            None => format!("User #{}", order.user_id),
        };
        let customer_email = user.and_then(|u| u.email.clone()).unwrap_or_default();
        let items = order
            .items
            .iter()
            .map(|item| ItemRow {
                flower_type_id: item.flower_type_id,
                name: flower_name(flowers, item.flower_type_id),
                quantity: item.quantity,
                price: item.unit_price,
            })
            .collect();
        let created_date = order.created_at.as_deref().and_then(parse_day);

        Self {
            order,
            display_status,
            customer_name,
            customer_email,
            items,
            created_date,
        }
    }

    pub fn code(&self) -> String {
        format!("ORD-{}", self.order.id)
    }

    /// Σ quantity × unit price over the lines.
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(|i| i.quantity as f64 * i.price).sum()
    }

    fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.customer_name.to_lowercase().contains(&needle)
            || self.code().to_lowercase().contains(&needle)
            || self.items.iter().any(|i| i.name.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Confirmed,
    Completed,
}

impl StatusFilter {
    pub fn matches(&self, row: &OrderRow) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => row.order.status.is_pending(),
            StatusFilter::Confirmed => row.display_status == OrderStatus::Confirmed,
            StatusFilter::Completed => row.display_status == OrderStatus::Completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "pending" => Ok(StatusFilter::Pending),
            "confirmed" => Ok(StatusFilter::Confirmed),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(format!("unknown status filter: {other}")),
        }
    }
}

pub fn filter_orders<'a>(
    rows: &'a [OrderRow],
    status: StatusFilter,
    search: &str,
) -> Vec<&'a OrderRow> {
    rows.iter()
        .filter(|row| status.matches(row) && row.matches_search(search))
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderStats {
    pub today_orders: usize,
    pub today_revenue: f64,
    pub pending_orders: usize,
}

impl OrderStats {
    pub fn compute(rows: &[OrderRow], today: NaiveDate) -> Self {
        let todays = rows.iter().filter(|r| {
            r.created_date == Some(today) && r.display_status != OrderStatus::Cancelled
        });
        Self {
            today_orders: todays.clone().count(),
            today_revenue: todays.map(OrderRow::items_total).sum(),
            pending_orders: rows.iter().filter(|r| r.order.status.is_pending()).count(),
        }
    }
}

/// Staff see customer names; a failed user lookup only loses those.
async fn load_users(users: &UserService, roles: &RoleSet) -> Vec<User> {
    if !roles.can_manage_inventory() {
        return Vec::new();
    }
    match users.users().await {
        Ok(list) => list,
        Err(e) => {
            warn!("Error loading users: {}", e);
            Vec::new()
        }
    }
}

pub async fn load_order_list(
    orders: &OrderService,
    inventory: &InventoryService,
    users: &UserService,
    roles: &RoleSet,
) -> Result<Vec<OrderRow>, ApiError> {
    let (order_list, flowers) = try_join!(orders.orders(), inventory.flowers())?;
    let user_list = load_users(users, roles).await;
    Ok(order_list
        .into_iter()
        .map(|order| OrderRow::build(order, &flowers, &user_list))
        .collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetail {
    pub row: OrderRow,
    pub needs_payment: bool,
    pub can_cancel: bool,
}

pub fn needs_payment(order: &Order) -> bool {
    order.status == OrderStatus::PendingPayment
        || order
            .payment_status
            .is_some_and(|p| p != PaymentStatus::Succeeded)
}

/// Staff may cancel any unpaid order; a client only their own.
pub fn can_cancel(order: &Order, roles: &RoleSet, current_user_id: Option<i64>) -> bool {
    let unpaid = order.payment_status == Some(PaymentStatus::Pending)
        && order.status != OrderStatus::Cancelled;
    if !unpaid {
        return false;
    }
    roles.can_manage_inventory()
        || (roles.contains(Role::Client) && current_user_id == Some(order.user_id))
}

pub async fn load_order_detail(
    order_id: i64,
    orders: &OrderService,
    inventory: &InventoryService,
    users: &UserService,
    roles: &RoleSet,
    current_user_id: Option<i64>,
) -> Result<OrderDetail, ApiError> {
    let (order, flowers) = try_join!(orders.order(order_id), inventory.flowers())?;
    let user_list = load_users(users, roles).await;
    Ok(OrderDetail {
        needs_payment: needs_payment(&order),
        can_cancel: can_cancel(&order, roles, current_user_id),
        row: OrderRow::build(order, &flowers, &user_list),
    })
}
