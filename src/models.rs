use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ── Users ───────────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub keycloak_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub requested_role: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl User {
    /// Name, then email, then `User #<id>`.
    pub fn label(&self) -> String {
        self.name
            .clone()
            .filter(|n| !n.is_empty())
            .or_else(|| self.email.clone().filter(|e| !e.is_empty()))
            .unwrap_or_else(|| format!("User #{}", self.id))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RoleInfo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct UserEnvelope {
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct UserList {
    #[serde(default)]
    pub users: Vec<User>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RoleList {
    #[serde(default)]
    pub roles: Vec<RoleInfo>,
}

/// Public account creation; field names follow the user service.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub requested_role: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub pending_approval: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PendingApprovals {
    #[serde(default)]
    pub pending_users: Vec<User>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApprovalResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub keycloak_updated: bool,
    #[serde(default)]
    pub keycloak_message: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RejectionResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

// ── Inventory ───────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Flower {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub seasonality: Option<String>,
    #[serde(default)]
    pub price_per_unit: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FlowerInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonality: Option<String>,
    pub price_per_unit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FlowerEnvelope {
    pub flower: Flower,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FlowerList {
    #[serde(default)]
    pub flowers: Vec<Flower>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LotStatus {
    Available,
    Reserved,
    Expired,
    Sold,
    #[serde(other)]
    Unknown,
}

impl LotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LotStatus::Available => "available",
            LotStatus::Reserved => "reserved",
            LotStatus::Expired => "expired",
            LotStatus::Sold => "sold",
            LotStatus::Unknown => "unknown",
        }
    }
}

impl FromStr for LotStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [LotStatus::Available, LotStatus::Reserved, LotStatus::Expired, LotStatus::Sold]
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| format!("unknown lot status: {s}"))
    }
}

impl fmt::Display for LotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Lot {
    pub id: i64,
    pub flower_type_id: i64,
    #[serde(default)]
    pub flower_type: Option<Flower>,
    pub quantity: i64,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub received_date: Option<String>,
    pub status: LotStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LotInput {
    pub flower_type_id: i64,
    pub quantity: i64,
    pub expiry_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LotStatus>,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct LotFilter {
    pub status: Option<LotStatus>,
    pub flower_type_id: Option<i64>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LotEnvelope {
    pub lot: Lot,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LotList {
    #[serde(default)]
    pub lots: Vec<Lot>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SummaryEntry {
    pub flower_type_id: i64,
    pub total_quantity: i64,
    #[serde(default)]
    pub price_per_unit: f64,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct InventorySummary {
    /// Keyed by flower name.
    #[serde(default)]
    pub summary: BTreeMap<String, SummaryEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine {
    pub flower_type_id: i64,
    pub quantity: i64,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AvailabilityEntry {
    pub required: i64,
    pub available: i64,
    pub sufficient: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Availability {
    /// Keyed by flower type id (JSON object keys are strings).
    #[serde(default)]
    pub availability: BTreeMap<String, AvailabilityEntry>,
    #[serde(default)]
    pub all_available: bool,
}

// ── Orders ──────────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    PendingPayment,
    Pending,
    Confirmed,
    Processing,
    Completed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Statuses an operator can pick on the order detail screen.
    pub const OPTIONS: [OrderStatus; 6] = [
        OrderStatus::PendingPayment,
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PendingPayment => "pending_payment",
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<OrderStatus> {
        Self::OPTIONS.into_iter().find(|st| st.as_str() == s)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::PendingPayment)
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::parse(s).ok_or_else(|| format!("unknown order status: {s}"))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Succeeded,
    Failed,
    Refunded,
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Processing => "processing",
            PaymentStatus::Succeeded => "succeeded",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrderItem {
    #[serde(default)]
    pub id: Option<i64>,
    pub flower_type_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub subtotal: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub status: OrderStatus,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub stripe_payment_intent_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub items: Vec<OrderLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct OrderEnvelope {
    pub order: Order,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct OrderList {
    #[serde(default)]
    pub orders: Vec<Order>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PaymentIntent {
    pub client_secret: String,
    pub payment_intent_id: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PaymentConfirmation {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub order: Option<Order>,
}

// ── Bouquet ─────────────────────────────────────────────────────────────────

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct BouquetFilters {
    pub budget: Option<f64>,
    pub colors: Option<String>,
    pub season: Option<String>,
    pub style: Option<String>,
}

impl BouquetFilters {
    /// Only the filters that are set, in a stable order.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(budget) = self.budget.filter(|b| *b != 0.0) {
            query.push(("budget", budget.to_string()));
        }
        let text = [("colors", &self.colors), ("season", &self.season), ("style", &self.style)];
        for (key, value) in text {
            if let Some(v) = value.as_ref().filter(|v| !v.is_empty()) {
                query.push((key, v.clone()));
            }
        }
        query
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BouquetItem {
    pub flower_type_id: i64,
    #[serde(default)]
    pub flower_name: Option<String>,
    pub quantity: i64,
    #[serde(default)]
    pub unit_price: f64,
    #[serde(default)]
    pub subtotal: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BouquetConfiguration {
    pub items: Vec<BouquetItem>,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub total_flowers: i64,
    #[serde(default)]
    pub flower_types_count: i64,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct BouquetPreview {
    #[serde(default)]
    pub configurations: Vec<BouquetConfiguration>,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BouquetRules {
    pub min_flowers_per_bouquet: i64,
    pub max_flowers_per_bouquet: i64,
    pub min_flower_types: i64,
    pub max_flower_types: i64,
    #[serde(default)]
    pub color_compatibility: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub seasons: BTreeMap<String, Value>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BouquetRulesEnvelope {
    pub rules: BouquetRules,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BouquetValidation {
    pub valid: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// ── Reports ─────────────────────────────────────────────────────────────────

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReportPeriod {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Envelope of every report; `data` is whatever the aggregation produced.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Report {
    #[serde(default)]
    pub report: Option<String>,
    #[serde(default)]
    pub period: Option<ReportPeriod>,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_from_service_json() {
        let order: Order = serde_json::from_value(json!({
            "id": 12,
            "user_id": 3,
            "status": "pending_payment",
            "total_price": 42.5,
            "notes": null,
            "items": [{"id": 1, "order_id": 12, "flower_type_id": 4, "quantity": 5,
                        "unit_price": 8.5, "subtotal": 42.5, "created_at": null}],
            "payment_status": "pending",
            "stripe_payment_intent_id": null,
            "stripe_customer_id": null,
            "created_at": "2026-10-18T09:30:00",
            "updated_at": null
        }))
        .unwrap();
        assert_eq!(order.status, OrderStatus::PendingPayment);
        assert_eq!(order.payment_status, Some(PaymentStatus::Pending));
        assert_eq!(order.items[0].subtotal, 42.5);
    }

    #[test]
    fn unknown_statuses_do_not_fail() {
        let status: OrderStatus = serde_json::from_value(json!("ready")).unwrap();
        assert_eq!(status, OrderStatus::Unknown);
        let lot: LotStatus = serde_json::from_value(json!("quarantined")).unwrap();
        assert_eq!(lot, LotStatus::Unknown);
    }

    #[test]
    fn status_parse_matches_wire_names() {
        assert_eq!(OrderStatus::parse("pending_payment"), Some(OrderStatus::PendingPayment));
        assert_eq!(OrderStatus::parse("bogus"), None);
        assert!(OrderStatus::PendingPayment.is_pending());
        assert!(!OrderStatus::Confirmed.is_pending());
        assert_eq!("cancelled".parse::<OrderStatus>(), Ok(OrderStatus::Cancelled));
        assert_eq!("sold".parse::<LotStatus>(), Ok(LotStatus::Sold));
        assert!("unknown".parse::<LotStatus>().is_err());
    }

    #[test]
    fn signup_uses_camel_case() {
        let body = serde_json::to_value(SignupRequest {
            username: "ana".into(),
            password: "secret1".into(),
            email: "ana@example.com".into(),
            first_name: "Ana".into(),
            last_name: "Pop".into(),
            requested_role: "florar".into(),
        })
        .unwrap();
        assert_eq!(body["firstName"], "Ana");
        assert_eq!(body["requestedRole"], "florar");
    }

    #[test]
    fn new_order_omits_missing_notes() {
        let body = serde_json::to_value(NewOrder {
            items: vec![OrderLine { flower_type_id: 1, quantity: 2 }],
            notes: None,
        })
        .unwrap();
        assert!(body.get("notes").is_none());
    }

    #[test]
    fn bouquet_filters_only_send_set_values() {
        let filters = BouquetFilters {
            budget: Some(50.0),
            colors: Some("red".into()),
            season: Some(String::new()),
            style: None,
        };
        assert_eq!(
            filters.to_query(),
            vec![("budget", "50".to_string()), ("colors", "red".to_string())]
        );
        assert!(BouquetFilters::default().to_query().is_empty());
    }

    #[test]
    fn user_label_fallbacks() {
        let mut user: User = serde_json::from_value(json!({"id": 9})).unwrap();
        assert_eq!(user.label(), "User #9");
        user.email = Some("x@example.com".into());
        assert_eq!(user.label(), "x@example.com");
        user.name = Some("Xena".into());
        assert_eq!(user.label(), "Xena");
    }
}
