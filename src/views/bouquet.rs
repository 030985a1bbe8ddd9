//! Bouquet builder: budget and style filters in, ready-made
//! configurations out, any of which can be ordered directly.

use futures::try_join;
use tracing::warn;

use crate::error::{FormError, ViewError};
use crate::models::{
    BouquetConfiguration, BouquetFilters, BouquetRules, Flower, NewOrder, Order, OrderLine,
};
use crate::services::{BouquetService, InventoryService, OrderService};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BouquetForm {
    pub budget: String,
    pub colors: String,
    pub season: String,
    pub style: String,
}

fn non_empty(value: &str) -> Option<String> {
    Some(value.trim()).filter(|v| !v.is_empty()).map(str::to_string)
}

impl BouquetForm {
    pub fn filters(&self) -> Result<BouquetFilters, FormError> {
        let budget = self
            .budget
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|b| b.is_finite() && *b > 0.0)
            .ok_or_else(|| FormError::new("Please enter a valid budget"))?;
        Ok(BouquetFilters {
            budget: Some(budget),
            colors: non_empty(&self.colors),
            season: non_empty(&self.season),
            style: non_empty(&self.style),
        })
    }

    pub fn order_notes(&self) -> String {
        format!(
            "Bouquet: {} {} {}",
            non_empty(&self.colors).as_deref().unwrap_or("Mixed"),
            non_empty(&self.season).as_deref().unwrap_or("All season"),
            non_empty(&self.style).as_deref().unwrap_or("Standard"),
        )
    }

    pub fn order_for(&self, configuration: &BouquetConfiguration) -> NewOrder {
        NewOrder {
            items: configuration
                .items
                .iter()
                .map(|item| OrderLine {
                    flower_type_id: item.flower_type_id,
                    quantity: item.quantity,
                })
                .collect(),
            notes: Some(self.order_notes()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BouquetCatalog {
    pub rules: Option<BouquetRules>,
    pub flowers: Vec<Flower>,
}

/// The builder still works without rules, so a failure is only logged.
pub async fn load_catalog(
    bouquet: &BouquetService,
    inventory: &InventoryService,
) -> BouquetCatalog {
    match try_join!(bouquet.rules(), inventory.flowers()) {
        Ok((rules, flowers)) => BouquetCatalog { rules: Some(rules), flowers },
        Err(e) => {
            warn!("Error loading bouquet data: {}", e);
            BouquetCatalog::default()
        }
    }
}

pub async fn search(
    bouquet: &BouquetService,
    form: &BouquetForm,
) -> Result<Vec<BouquetConfiguration>, ViewError> {
    let filters = form.filters()?;
    let preview = bouquet.preview(&filters).await?;
    if preview.configurations.is_empty() {
        return Err(FormError::new("No bouquet configurations found matching your criteria").into());
    }
    Ok(preview.configurations)
}

pub async fn order_configuration(
    orders: &OrderService,
    form: &BouquetForm,
    configuration: &BouquetConfiguration,
) -> Result<Order, ViewError> {
    Ok(orders.create_order(&form.order_for(configuration)).await?)
}
