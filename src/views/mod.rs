//! View models: what each screen shows, computed from service data.
//!
//! Loaders fetch what a screen needs; everything else here is pure so the
//! CLI and tests can drive it without a network.

pub mod approvals;
pub mod bouquet;
pub mod dashboard;
pub mod inventory;
pub mod order_form;
pub mod orders;
pub mod payment;
pub mod profile;
pub mod reports;
pub mod signup;

use crate::models::Flower;

/// Flower name by id, `Flower #<id>` when unknown.
pub fn flower_name(flowers: &[Flower], flower_type_id: i64) -> String {
    flowers
        .iter()
        .find(|f| f.id == flower_type_id)
        .map(|f| f.name.clone())
        .unwrap_or_else(|| format!("Flower #{flower_type_id}"))
}
