//! Flower and lot forms plus the inventory screen loader.

use chrono::NaiveDate;
use futures::try_join;

use crate::error::{ApiError, FormError, ViewError};
use crate::models::{Flower, FlowerInput, Lot, LotFilter, LotInput, LotStatus};
use crate::services::InventoryService;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowerForm {
    pub name: String,
    pub color: String,
    pub seasonality: String,
    pub price_per_unit: String,
    pub description: String,
}

fn optional(value: &str) -> Option<String> {
    Some(value.trim()).filter(|v| !v.is_empty()).map(str::to_string)
}

impl FlowerForm {
    pub fn from_flower(flower: &Flower) -> Self {
        Self {
            name: flower.name.clone(),
            color: flower.color.clone().unwrap_or_default(),
            seasonality: flower.seasonality.clone().unwrap_or_default(),
            price_per_unit: flower.price_per_unit.to_string(),
            description: flower.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<FlowerInput, FormError> {
        let name = optional(&self.name).ok_or_else(|| FormError::new("Flower name is required"))?;
        let price_per_unit = self
            .price_per_unit
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .ok_or_else(|| FormError::new("Price per unit must be a non-negative number"))?;
        Ok(FlowerInput {
            name,
            color: optional(&self.color),
            seasonality: optional(&self.seasonality),
            price_per_unit,
            description: optional(&self.description),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LotForm {
    pub flower_type_id: String,
    pub quantity: String,
    pub expiry_date: String,
    pub status: LotStatus,
}

impl Default for LotForm {
    fn default() -> Self {
        Self {
            flower_type_id: String::new(),
            quantity: String::new(),
            expiry_date: String::new(),
            status: LotStatus::Available,
        }
    }
}

impl LotForm {
    /// Prefills from an existing lot; timestamps are cut to the date.
    pub fn from_lot(lot: &Lot) -> Self {
        let expiry_date = lot
            .expiry_date
            .as_deref()
            .and_then(|d| d.split('T').next())
            .unwrap_or_default()
            .to_string();
        Self {
            flower_type_id: lot.flower_type_id.to_string(),
            quantity: lot.quantity.to_string(),
            expiry_date,
            status: lot.status,
        }
    }

    pub fn validate(&self) -> Result<LotInput, FormError> {
        let flower_type_id = self
            .flower_type_id
            .trim()
            .parse::<i64>()
            .map_err(|_| FormError::new("Please select a flower type"))?;
        let quantity = self
            .quantity
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|q| *q >= 0)
            .ok_or_else(|| FormError::new("Quantity must be a non-negative whole number"))?;
        let expiry_date = self.expiry_date.trim();
        NaiveDate::parse_from_str(expiry_date, "%Y-%m-%d")
            .map_err(|_| FormError::new("Expiry date must be in YYYY-MM-DD format"))?;
        Ok(LotInput {
            flower_type_id,
            quantity,
            expiry_date: expiry_date.to_string(),
            status: Some(self.status),
        })
    }
}

/// Loads a flower into its form, lets the caller change fields, then saves.
pub async fn edit_flower<F>(
    inventory: &InventoryService,
    flower_id: i64,
    edit: F,
) -> Result<Flower, ViewError>
where
    F: FnOnce(&mut FlowerForm),
{
    let mut form = FlowerForm::from_flower(&inventory.flower(flower_id).await?);
    edit(&mut form);
    let input = form.validate()?;
    Ok(inventory.update_flower(flower_id, &input).await?)
}

pub async fn edit_lot<F>(
    inventory: &InventoryService,
    lot_id: i64,
    edit: F,
) -> Result<Lot, ViewError>
where
    F: FnOnce(&mut LotForm),
{
    let mut form = LotForm::from_lot(&inventory.lot(lot_id).await?);
    edit(&mut form);
    let input = form.validate()?;
    Ok(inventory.update_lot(lot_id, &input).await?)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryScreen {
    pub flowers: Vec<Flower>,
    pub lots: Vec<Lot>,
}

pub async fn load_inventory(
    inventory: &InventoryService,
    filter: &LotFilter,
) -> Result<InventoryScreen, ApiError> {
    let (flowers, lots) = try_join!(inventory.flowers(), inventory.lots(filter))?;
    Ok(InventoryScreen { flowers, lots })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flower_requires_name_and_price() {
        let mut form = FlowerForm { price_per_unit: "2.5".to_string(), ..Default::default() };
        assert_eq!(form.validate().unwrap_err().to_string(), "Flower name is required");

        form.name = "Peony".to_string();
        form.price_per_unit = "-1".to_string();
        assert!(form.validate().is_err());

        form.price_per_unit = "0".to_string();
        form.color = " ".to_string();
        let input = form.validate().unwrap();
        assert_eq!(input.price_per_unit, 0.0);
        assert_eq!(input.color, None);
    }

    #[test]
    fn lot_validation() {
        let mut form = LotForm {
            flower_type_id: "3".to_string(),
            quantity: "40".to_string(),
            expiry_date: "2026-11-02".to_string(),
            ..Default::default()
        };
        let input = form.validate().unwrap();
        assert_eq!(input.quantity, 40);
        assert_eq!(input.status, Some(LotStatus::Available));

        form.expiry_date = "02/11/2026".to_string();
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Expiry date must be in YYYY-MM-DD format"
        );

        form.expiry_date = "2026-11-02".to_string();
        form.quantity = "-4".to_string();
        assert!(form.validate().is_err());

        form.flower_type_id = String::new();
        assert_eq!(form.validate().unwrap_err().to_string(), "Please select a flower type");
    }

    #[test]
    fn lot_prefill_cuts_timestamp() {
        let lot: Lot = serde_json::from_value(serde_json::json!({
            "id": 1, "flower_type_id": 2, "quantity": 5,
            "expiry_date": "2026-11-02T00:00:00", "status": "reserved"
        }))
        .unwrap();
        let form = LotForm::from_lot(&lot);
        assert_eq!(form.expiry_date, "2026-11-02");
        assert_eq!(form.status, LotStatus::Reserved);
    }
}
