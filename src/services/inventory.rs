use serde_json::{json, Value};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::models::{
    Availability, Flower, FlowerEnvelope, FlowerInput, FlowerList, InventorySummary, Lot,
    LotEnvelope, LotFilter, LotInput, LotList, OrderLine,
};

pub const DEFAULT_EXPIRING_DAYS: u32 = 7;

/// Inventory service: flower types, dated lots and stock queries.
#[derive(Clone)]
pub struct InventoryService {
    client: ApiClient,
}

impl InventoryService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn flowers(&self) -> Result<Vec<Flower>, ApiError> {
        let list: FlowerList = self.client.get("/flowers").await?;
        Ok(list.flowers)
    }

    pub async fn flower(&self, flower_id: i64) -> Result<Flower, ApiError> {
        let envelope: FlowerEnvelope = self.client.get(&format!("/flowers/{flower_id}")).await?;
        Ok(envelope.flower)
    }

    pub async fn create_flower(&self, flower: &FlowerInput) -> Result<Flower, ApiError> {
        let envelope: FlowerEnvelope = self.client.post("/flowers", flower).await?;
        Ok(envelope.flower)
    }

    pub async fn update_flower(
        &self,
        flower_id: i64,
        flower: &FlowerInput,
    ) -> Result<Flower, ApiError> {
        let envelope: FlowerEnvelope = self
            .client
            .put(&format!("/flowers/{flower_id}"), flower)
            .await?;
        Ok(envelope.flower)
    }

    /// Admin only.
    pub async fn delete_flower(&self, flower_id: i64) -> Result<(), ApiError> {
        let _: Value = self.client.delete(&format!("/flowers/{flower_id}")).await?;
        Ok(())
    }

    pub async fn lots(&self, filter: &LotFilter) -> Result<Vec<Lot>, ApiError> {
        let mut query = Vec::new();
        if let Some(status) = filter.status {
            query.push(("status", status.to_string()));
        }
        if let Some(flower_type_id) = filter.flower_type_id {
            query.push(("flower_type_id", flower_type_id.to_string()));
        }
        let list: LotList = self.client.get_query("/lots", &query).await?;
        Ok(list.lots)
    }

    pub async fn lot(&self, lot_id: i64) -> Result<Lot, ApiError> {
        let envelope: LotEnvelope = self.client.get(&format!("/lots/{lot_id}")).await?;
        Ok(envelope.lot)
    }

    pub async fn create_lot(&self, lot: &LotInput) -> Result<Lot, ApiError> {
        let envelope: LotEnvelope = self.client.post("/lots", lot).await?;
        Ok(envelope.lot)
    }

    pub async fn update_lot(&self, lot_id: i64, lot: &LotInput) -> Result<Lot, ApiError> {
        let envelope: LotEnvelope = self.client.put(&format!("/lots/{lot_id}"), lot).await?;
        Ok(envelope.lot)
    }

    pub async fn update_lot_quantity(&self, lot_id: i64, quantity: i64) -> Result<Lot, ApiError> {
        let envelope: LotEnvelope = self
            .client
            .patch(&format!("/lots/{lot_id}/quantity"), &json!({ "quantity": quantity }))
            .await?;
        Ok(envelope.lot)
    }

    /// Admin only.
    pub async fn delete_lot(&self, lot_id: i64) -> Result<(), ApiError> {
        let _: Value = self.client.delete(&format!("/lots/{lot_id}")).await?;
        Ok(())
    }

    pub async fn expiring_lots(&self, days: u32) -> Result<Vec<Lot>, ApiError> {
        let list: LotList = self
            .client
            .get_query("/lots/expiring", &[("days", days.to_string())])
            .await?;
        Ok(list.lots)
    }

    pub async fn summary(&self) -> Result<InventorySummary, ApiError> {
        self.client.get("/inventory/summary").await
    }

    /// Sends one `flower_type_id`/`quantity` pair per line.
    pub async fn check_availability(&self, items: &[OrderLine]) -> Result<Availability, ApiError> {
        let query: Vec<(&str, String)> = items
            .iter()
            .flat_map(|item| {
                [
                    ("flower_type_id", item.flower_type_id.to_string()),
                    ("quantity", item.quantity.to_string()),
                ]
            })
            .collect();
        self.client.get_query("/inventory/available", &query).await
    }
}
