use crate::error::{StockError, StockResult};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

//==============================================================================
// Inventory records
//==============================================================================

/// One size variant of one garment line, the atomic inventory unit.
///
/// The same product in two sizes is two records sharing every field except
/// `id`, `size` and `current_stock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: String,
    pub serial_number: String,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub category: String,
    pub color: String,
    pub size: String,
    pub price: f64,
    pub current_stock: u32,
    pub date_added: NaiveDate,
}

impl InventoryRecord {
    /// Build a record from a draft, assigning a fresh id and date.
    pub fn from_draft(draft: NewRecord, date_added: NaiveDate) -> Self {
        let name = if draft.name.trim().is_empty() {
            display_name(&draft.category, &draft.brand, &draft.model)
        } else {
            draft.name
        };

        Self {
            id: new_record_id(),
            serial_number: draft.serial_number,
            name,
            brand: draft.brand,
            model: draft.model,
            category: draft.category,
            color: draft.color,
            size: draft.size,
            price: draft.price,
            current_stock: draft.current_stock,
            date_added,
        }
    }

    /// Stock value of this record (unit price × quantity on hand)
    pub fn stock_value(&self) -> f64 {
        self.price * self.current_stock as f64
    }

    /// Check the invariants a stored record must hold
    pub fn validate(&self) -> StockResult<()> {
        if self.id.trim().is_empty() {
            return Err(StockError::Validation("id must not be empty".to_string()));
        }
        validate_fields(&self.brand, &self.size, self.price)
    }
}

/// A garment as entered by hand, before the store assigns `id` and `dateAdded`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewRecord {
    pub serial_number: String,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub category: String,
    pub color: String,
    pub size: String,
    pub price: f64,
    pub current_stock: u32,
}

impl NewRecord {
    pub fn validate(&self) -> StockResult<()> {
        validate_fields(&self.brand, &self.size, self.price)
    }
}

fn validate_fields(brand: &str, size: &str, price: f64) -> StockResult<()> {
    if brand.trim().is_empty() {
        return Err(StockError::Validation("brand is required".to_string()));
    }
    if size.trim().is_empty() {
        return Err(StockError::Validation("size is required".to_string()));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(StockError::Validation(format!(
            "price must be a non-negative number, got {}",
            price
        )));
    }
    Ok(())
}

/// Display label derived from category, brand and model
pub fn display_name(category: &str, brand: &str, model: &str) -> String {
    format!("{} {} {}", category, brand, model).trim().to_string()
}

/// Fresh opaque record identifier
pub fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Today's date in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
