use crate::error::{FormError, ViewError};
use crate::models::{Flower, NewOrder, Order, OrderLine};
use crate::services::OrderService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DraftLine {
    pub flower_type_id: Option<i64>,
    pub quantity: i64,
}

impl Default for DraftLine {
    fn default() -> Self {
        Self { flower_type_id: None, quantity: 1 }
    }
}

/// New-order form state. Starts with one empty line.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub lines: Vec<DraftLine>,
    pub notes: String,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self { lines: vec![DraftLine::default()], notes: String::new() }
    }
}

/// Reads the leading integer of the input ("3.5" is 3, "12 roses" is 12).
/// Input without one, or zero, becomes 1.
pub fn parse_quantity(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let digits_from = usize::from(trimmed.starts_with(['-', '+']));
    let end = trimmed[digits_from..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(trimmed.len(), |i| i + digits_from);
    match trimmed[..end].parse::<i64>() {
        Ok(0) | Err(_) => 1,
        Ok(n) => n,
    }
}

impl OrderDraft {
    /// Fills a draft from `(flower id, raw quantity)` entries, one line each.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i64, &'a str)>,
    {
        let mut draft = Self { lines: Vec::new(), notes: String::new() };
        for (flower_type_id, quantity) in entries {
            draft.add_line();
            let index = draft.lines.len() - 1;
            draft.set_flower(index, Some(flower_type_id));
            draft.set_quantity(index, quantity);
        }
        if draft.lines.is_empty() {
            draft.add_line();
        }
        draft
    }

    pub fn add_line(&mut self) {
        self.lines.push(DraftLine::default());
    }

    /// The draft always keeps at least one line.
    pub fn remove_line(&mut self, index: usize) {
        if self.lines.len() > 1 && index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    pub fn set_flower(&mut self, index: usize, flower_type_id: Option<i64>) {
        if let Some(line) = self.lines.get_mut(index) {
            line.flower_type_id = flower_type_id;
        }
    }

    pub fn set_quantity(&mut self, index: usize, input: &str) {
        if let Some(line) = self.lines.get_mut(index) {
            line.quantity = parse_quantity(input);
        }
    }

    /// Running total at catalogue prices; lines without a known flower add
    /// nothing. The service prices the order itself.
    pub fn total(&self, flowers: &[Flower]) -> f64 {
        self.lines
            .iter()
            .filter_map(|line| {
                let flower = flowers.iter().find(|f| Some(f.id) == line.flower_type_id)?;
                Some(flower.price_per_unit * line.quantity as f64)
            })
            .sum()
    }

    pub fn to_order(&self) -> Result<NewOrder, FormError> {
        let items: Vec<OrderLine> = self
            .lines
            .iter()
            .filter(|line| line.quantity > 0)
            .filter_map(|line| {
                line.flower_type_id.map(|flower_type_id| OrderLine {
                    flower_type_id,
                    quantity: line.quantity,
                })
            })
            .collect();
        if items.is_empty() {
            return Err(FormError::new("Please add at least one item to the order"));
        }
        let notes = Some(self.notes.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        Ok(NewOrder { items, notes })
    }

    pub async fn submit(&self, orders: &OrderService) -> Result<Order, ViewError> {
        let order = self.to_order()?;
        Ok(orders.create_order(&order).await?)
    }
}
