use serde_json::json;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{NewOrder, Order, OrderEnvelope, OrderList, OrderStatus};

/// Order service. Admins see every order; everyone else only their own.
#[derive(Clone)]
pub struct OrderService {
    client: ApiClient,
}

impl OrderService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn orders(&self) -> Result<Vec<Order>, ApiError> {
        let list: OrderList = self.client.get("/orders").await?;
        Ok(list.orders)
    }

    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        let list: OrderList = self.client.get("/orders/me").await?;
        Ok(list.orders)
    }

    pub async fn order(&self, order_id: i64) -> Result<Order, ApiError> {
        let envelope: OrderEnvelope = self.client.get(&format!("/orders/{order_id}")).await?;
        Ok(envelope.order)
    }

    /// Prices are fixed by the service; only flower ids and quantities go up.
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        let envelope: OrderEnvelope = self.client.post("/orders", order).await?;
        Ok(envelope.order)
    }

    pub async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let envelope: OrderEnvelope = self
            .client
            .put(&format!("/orders/{order_id}/status"), &json!({ "status": status }))
            .await?;
        Ok(envelope.order)
    }

    /// Admin only.
    pub async fn user_orders(&self, user_id: i64) -> Result<Vec<Order>, ApiError> {
        let list: OrderList = self.client.get(&format!("/orders/user/{user_id}")).await?;
        Ok(list.orders)
    }
}
