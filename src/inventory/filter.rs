use crate::types::InventoryRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Filter value meaning "no restriction"
pub const ANY: &str = "Toutes";

/// Inventory search and attribute filters
///
/// `search` matches name, serial number, brand, model or color
/// (case-insensitive substring); `model` is a case-insensitive substring;
/// the other attributes match exactly. Empty values and [`ANY`] match everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub size: Option<String>,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub model: Option<String>,
}

impl RecordFilter {
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        if let Some(search) = active(&self.search) {
            let needle = search.to_lowercase();
            let hit = [
                &record.name,
                &record.serial_number,
                &record.brand,
                &record.model,
                &record.color,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(model) = active(&self.model) {
            if !record.model.to_lowercase().contains(&model.to_lowercase()) {
                return false;
            }
        }

        exact(&self.category, &record.category)
            && exact(&self.size, &record.size)
            && exact(&self.brand, &record.brand)
            && exact(&self.color, &record.color)
    }

    pub fn apply<'a>(&self, records: &'a [InventoryRecord]) -> Vec<&'a InventoryRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    pub fn is_empty(&self) -> bool {
        [
            &self.search,
            &self.category,
            &self.size,
            &self.brand,
            &self.color,
            &self.model,
        ]
        .iter()
        .all(|value| active(value).is_none())
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && *v != ANY)
}

fn exact(wanted: &Option<String>, actual: &str) -> bool {
    active(wanted).map_or(true, |w| w == actual)
}

/// Values currently present in the inventory, for filter and form choices
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[InventoryRecord]) -> Self {
        Self {
            categories: distinct(records, |r| &r.category),
            brands: distinct(records, |r| &r.brand),
            colors: distinct(records, |r| &r.color),
            sizes: distinct(records, |r| &r.size),
        }
    }
}

fn distinct<F>(records: &[InventoryRecord], field: F) -> Vec<String>
where
    F: Fn(&InventoryRecord) -> &String,
{
    records
        .iter()
        .map(field)
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
