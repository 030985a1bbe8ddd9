mod common;

use std::sync::{Arc, Mutex};

use axum::extract::{Path, RawQuery};
use axum::http::{header, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use bloomflow::models::{BouquetConfiguration, BouquetFilters, LotFilter, LotStatus, OrderLine};
use bloomflow::views::dashboard::load_dashboard;
use bloomflow::views::inventory::{edit_flower, edit_lot};
use bloomflow::views::orders::load_order_list;
use bloomflow::views::signup::register;
use bloomflow::Role;
use serde_json::{json, Value};

use common::{harness, serve, session_with_roles};

type Seen = Arc<Mutex<Vec<String>>>;

/// Records the raw query string of each call.
fn recording(seen: &Seen, body: Value) -> axum::routing::MethodRouter {
    let seen = seen.clone();
    get(move |RawQuery(query): RawQuery| {
        let seen = seen.clone();
        let body = body.clone();
        async move {
            seen.lock().unwrap().push(query.unwrap_or_default());
            Json(body)
        }
    })
}

fn lot(id: i64) -> Value {
    json!({"id": id, "flower_type_id": 1, "quantity": 10, "status": "available"})
}

fn order(id: i64, user_id: i64, total: f64) -> Value {
    json!({
        "id": id,
        "user_id": user_id,
        "status": "pending_payment",
        "total_price": total,
        "payment_status": "pending",
        "items": [{
            "flower_type_id": 1,
            "quantity": 2,
            "unit_price": total / 2.0,
            "subtotal": total
        }]
    })
}

#[tokio::test]
async fn inventory_queries() {
    let seen: Seen = Arc::default();
    let router = Router::new()
        .route("/api/inventory/lots", recording(&seen, json!({"lots": [lot(1)]})))
        .route("/api/inventory/lots/expiring", recording(&seen, json!({"lots": []})))
        .route(
            "/api/inventory/inventory/available",
            recording(&seen, json!({"availability": {}, "all_available": true})),
        );
    let base = serve(router).await;
    let h = harness(&base, session_with_roles(&["florar"]));
    let inventory = h.app.inventory();

    let lots = inventory
        .lots(&LotFilter { status: Some(LotStatus::Available), flower_type_id: Some(3) })
        .await
        .unwrap();
    assert_eq!(lots.len(), 1);
    inventory.lots(&LotFilter::default()).await.unwrap();
    inventory.expiring_lots(7).await.unwrap();
    let availability = inventory
        .check_availability(&[
            OrderLine { flower_type_id: 1, quantity: 5 },
            OrderLine { flower_type_id: 2, quantity: 3 },
        ])
        .await
        .unwrap();
    assert!(availability.all_available);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            "status=available&flower_type_id=3".to_string(),
            String::new(),
            "days=7".to_string(),
            "flower_type_id=1&quantity=5&flower_type_id=2&quantity=3".to_string(),
        ]
    );
}

#[tokio::test]
async fn bouquet_preview_sends_only_set_filters() {
    let seen: Seen = Arc::default();
    let router = Router::new().route(
        "/api/bouquet/bouquet/preview",
        recording(&seen, json!({"configurations": [], "count": 0})),
    );
    let base = serve(router).await;
    let h = harness(&base, session_with_roles(&["client"]));

    let filters = BouquetFilters {
        budget: Some(50.0),
        colors: Some("red".to_string()),
        season: Some(String::new()),
        style: None,
    };
    let preview = h.app.bouquet().preview(&filters).await.unwrap();

    assert!(preview.configurations.is_empty());
    assert_eq!(*seen.lock().unwrap(), vec!["budget=50&colors=red".to_string()]);
}

/// Records each JSON body and answers with `response`.
fn capture(
    bodies: &Seen,
    response: Value,
) -> impl Fn(Json<Value>) -> std::future::Ready<Json<Value>> + Clone + Send + Sync + 'static {
    let bodies = bodies.clone();
    move |Json(body): Json<Value>| {
        bodies.lock().unwrap().push(body.to_string());
        std::future::ready(Json(response.clone()))
    }
}

#[tokio::test]
async fn bouquet_validation_posts_the_configuration() {
    let bodies: Seen = Arc::default();
    let router = Router::new().route(
        "/api/bouquet/bouquet/validate",
        post(capture(&bodies, json!({"valid": false, "message": "Too few flowers"}))),
    );
    let base = serve(router).await;
    let h = harness(&base, session_with_roles(&["client"]));

    let configuration: BouquetConfiguration = serde_json::from_value(json!({
        "items": [{"flower_type_id": 3, "quantity": 2, "unit_price": 1.5, "subtotal": 3.0}],
        "total_price": 3.0,
        "total_flowers": 2,
        "flower_types_count": 1
    }))
    .unwrap();
    let verdict = h.app.bouquet().validate(&configuration).await.unwrap();

    assert!(!verdict.valid);
    assert_eq!(verdict.message.as_deref(), Some("Too few flowers"));
    let sent: Value = serde_json::from_str(&bodies.lock().unwrap()[0]).unwrap();
    assert_eq!(sent["items"][0]["flower_type_id"], 3);
    assert_eq!(sent["total_flowers"], 2);
}

#[tokio::test]
async fn editing_keeps_untouched_fields() {
    let bodies: Seen = Arc::default();
    let flower = json!({"id": 4, "name": "Tulip", "color": "red", "price_per_unit": 2.5});
    let lot = json!({
        "id": 9,
        "flower_type_id": 4,
        "quantity": 10,
        "expiry_date": "2026-11-01T00:00:00",
        "status": "available"
    });
    let router = Router::new()
        .route(
            "/api/inventory/flowers/:id",
            get({
                let flower = flower.clone();
                move || std::future::ready(Json(json!({ "flower": flower })))
            })
            .put(capture(&bodies, json!({ "flower": flower }))),
        )
        .route(
            "/api/inventory/lots/:id",
            get({
                let lot = lot.clone();
                move || std::future::ready(Json(json!({ "lot": lot })))
            })
            .put(capture(&bodies, json!({ "lot": lot }))),
        );
    let base = serve(router).await;
    let h = harness(&base, session_with_roles(&["florar"]));
    let inventory = h.app.inventory();

    edit_flower(&inventory, 4, |form| form.price_per_unit = "3".to_string())
        .await
        .unwrap();
    edit_lot(&inventory, 9, |form| form.quantity = "25".to_string())
        .await
        .unwrap();
    let err = edit_lot(&inventory, 9, |form| form.quantity = "-3".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Quantity must be a non-negative whole number");

    let sent: Vec<Value> = bodies
        .lock()
        .unwrap()
        .iter()
        .map(|b| serde_json::from_str(b).unwrap())
        .collect();
    assert_eq!(
        sent,
        vec![
            json!({"name": "Tulip", "color": "red", "price_per_unit": 3.0}),
            json!({
                "flower_type_id": 4,
                "quantity": 25,
                "expiry_date": "2026-11-01",
                "status": "available"
            }),
        ]
    );
}

#[tokio::test]
async fn report_defaults_and_periods() {
    let seen: Seen = Arc::default();
    let report = json!({"report": "x", "data": {}});
    let router = Router::new()
        .route("/api/reports/reports/inventory/low-stock", recording(&seen, report.clone()))
        .route("/api/reports/reports/orders/top-products", recording(&seen, report.clone()))
        .route("/api/reports/reports/sales/summary", recording(&seen, report));
    let base = serve(router).await;
    let h = harness(&base, session_with_roles(&["admin"]));
    let reports = h.app.reports();

    reports.low_stock(10).await.unwrap();
    reports.top_products(10, Some("2026-01-01"), None).await.unwrap();
    reports.sales_summary(None, None).await.unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            "threshold=10".to_string(),
            "limit=10&start_date=2026-01-01".to_string(),
            String::new(),
        ]
    );
}

#[tokio::test]
async fn pdf_export_returns_bytes_and_name() {
    let router = Router::new()
        .route(
            "/api/reports/export/sales",
            get(|| async {
                ([(header::CONTENT_TYPE, "application/pdf")], b"%PDF-1.4 fake".to_vec())
            }),
        )
        .route(
            "/api/reports/export/inventory",
            get(|| async {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "render failed"})))
            }),
        );
    let base = serve(router).await;
    let h = harness(&base, session_with_roles(&["admin"]));
    let reports = h.app.reports();

    let export = reports.export_sales(Some("2026-01-01"), Some("2026-01-31")).await.unwrap();
    assert_eq!(export.file_name, "bloomflow_sales_2026-01-01_2026-01-31.pdf");
    assert!(export.bytes.starts_with(b"%PDF"));

    let err = reports.export_inventory().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to export PDF");
}

#[tokio::test]
async fn payment_endpoints() {
    let bodies: Seen = Arc::default();
    let router = {
        let bodies = bodies.clone();
        Router::new()
            .route(
                "/api/orders/orders/:id/create-payment-intent",
                post(|Path(id): Path<i64>, body: String| async move {
                    assert!(body.is_empty());
                    Json(json!({
                        "client_secret": format!("pi_{id}_secret"),
                        "payment_intent_id": format!("pi_{id}")
                    }))
                }),
            )
            .route(
                "/api/orders/orders/:id/confirm-payment",
                post(move |Json(body): Json<Value>| {
                    let bodies = bodies.clone();
                    async move {
                        bodies.lock().unwrap().push(body.to_string());
                        Json(json!({"message": "Payment confirmed"}))
                    }
                }),
            )
    };
    let base = serve(router).await;
    let h = harness(&base, session_with_roles(&["client"]));
    let payments = h.app.payments();

    let intent = payments.create_payment_intent(12).await.unwrap();
    assert_eq!(intent.payment_intent_id, "pi_12");
    let confirmation = payments.confirm_payment(12, "pi_12").await.unwrap();
    assert_eq!(confirmation.message.as_deref(), Some("Payment confirmed"));
    assert_eq!(*bodies.lock().unwrap(), vec![r#"{"payment_intent_id":"pi_12"}"#.to_string()]);
}

#[tokio::test]
async fn role_update_and_rejection_bodies() {
    let bodies: Seen = Arc::default();
    let router = Router::new()
        .route(
            "/api/users/users/:id/role",
            put(capture(&bodies, json!({"user": {"id": 5, "role": "florar"}}))),
        )
        .route(
            "/api/users/users/:id/reject",
            post(capture(&bodies, json!({"message": "rejected", "reason": "default"}))),
        );
    let base = serve(router).await;
    let h = harness(&base, session_with_roles(&["admin"]));
    let users = h.app.users();

    let user = users.update_user_role(5, Role::Florar).await.unwrap();
    assert_eq!(user.role.as_deref(), Some("florar"));
    users.reject_florar(5, Some("  ")).await.unwrap();
    users.reject_florar(5, Some("No portfolio")).await.unwrap();

    assert_eq!(
        *bodies.lock().unwrap(),
        vec![
            r#"{"role":"florar"}"#.to_string(),
            "{}".to_string(),
            r#"{"reason":"No portfolio"}"#.to_string(),
        ]
    );
}

#[tokio::test]
async fn dashboard_keeps_defaults_when_a_fetch_fails() {
    let router = Router::new()
        .route(
            "/api/inventory/inventory/summary",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"error": "db down"}))) }),
        )
        .route(
            "/api/inventory/lots/expiring",
            get(|| async { Json(json!({"lots": [lot(1), lot(2)]})) }),
        )
        .route(
            "/api/orders/orders",
            get(|| async {
                Json(json!({"orders": (1..=6).map(|i| order(i, 1, 10.0)).collect::<Vec<_>>()}))
            }),
        );
    let base = serve(router).await;
    let h = harness(&base, session_with_roles(&["admin"]));
    let roles = h.app.roles();

    let dashboard = load_dashboard(&h.app.inventory(), &h.app.orders(), &roles).await;

    assert_eq!(dashboard.stats.total_flowers, 0);
    assert_eq!(dashboard.stats.expiring_lots, 2);
    assert_eq!(dashboard.stats.total_orders, 6);
    assert!((dashboard.stats.total_revenue - 60.0).abs() < 1e-9);
    assert_eq!(dashboard.recent_orders.len(), 5);
}

#[tokio::test]
async fn client_dashboard_skips_inventory() {
    let router = Router::new().route(
        "/api/orders/orders",
        get(|| async { Json(json!({"orders": [order(1, 1, 12.5)]})) }),
    );
    let base = serve(router).await;
    let h = harness(&base, session_with_roles(&["client"]));

    let dashboard = load_dashboard(&h.app.inventory(), &h.app.orders(), &h.app.roles()).await;

    assert_eq!(dashboard.stats.total_orders, 1);
    assert_eq!(dashboard.stats.expiring_lots, 0);
    assert!(h.navigator.visited().is_empty());
}

#[tokio::test]
async fn order_list_survives_user_lookup_failure() {
    let router = Router::new()
        .route(
            "/api/orders/orders",
            get(|| async { Json(json!({"orders": [order(1, 7, 10.0)]})) }),
        )
        .route(
            "/api/inventory/flowers",
            get(|| async {
                Json(json!({"flowers": [{"id": 1, "name": "Tulip", "price_per_unit": 5.0}]}))
            }),
        )
        .route(
            "/api/users/users",
            get(|| async { (StatusCode::FORBIDDEN, Json(json!({"error": "Access denied"}))) }),
        );
    let base = serve(router).await;
    let h = harness(&base, session_with_roles(&["florar"]));

    let rows = load_order_list(&h.app.orders(), &h.app.inventory(), &h.app.users(), &h.app.roles())
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].customer_name, "User #7");
    assert_eq!(rows[0].items[0].name, "Tulip");
}

#[tokio::test]
async fn order_list_fails_when_orders_fail() {
    let router = Router::new()
        .route("/api/orders/orders", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "down") }))
        .route("/api/inventory/flowers", get(|| async { Json(json!({"flowers": []})) }));
    let base = serve(router).await;
    let h = harness(&base, session_with_roles(&["client"]));

    let err = load_order_list(&h.app.orders(), &h.app.inventory(), &h.app.users(), &h.app.roles())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP error! status: 500");
}

#[tokio::test]
async fn already_registered_counts_as_success() {
    let router = Router::new().route(
        "/api/users/users/register",
        post(|| async {
            (StatusCode::CONFLICT, Json(json!({"error": "User already registered"})))
        }),
    );
    let base = serve(router).await;
    let h = harness(&base, session_with_roles(&["client"]));

    let message = register(&h.app.users(), Role::Client).await.unwrap();
    assert_eq!(message, "You are already registered. Redirecting to dashboard...");
}
