//! Dashboard and analytics figures computed over a record set

use crate::types::InventoryRecord;
use serde::Serialize;
use std::collections::HashSet;

/// Number of brands shown in the top-brands ranking
pub const TOP_BRANDS: usize = 8;

/// Default threshold below which a record raises a low-stock alert
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// Headline figures
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub record_count: usize,
    pub total_units: u64,
    pub total_value: f64,
    /// Stock value per unit, rounded to the nearest whole amount
    pub average_price: f64,
    pub category_count: usize,
}

impl StockSummary {
    pub fn from_records(records: &[InventoryRecord]) -> Self {
        let total_units: u64 = records.iter().map(|r| u64::from(r.current_stock)).sum();
        let total_value: f64 = records.iter().map(InventoryRecord::stock_value).sum();
        let average_price = if total_units > 0 {
            (total_value / total_units as f64).round()
        } else {
            0.0
        };
        let category_count = records
            .iter()
            .map(|r| r.category.as_str())
            .collect::<HashSet<_>>()
            .len();

        Self {
            record_count: records.len(),
            total_units,
            total_value,
            average_price,
            category_count,
        }
    }
}

/// Units and value held in one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub name: String,
    pub units: u64,
    pub value: f64,
}

/// Stock value held in one brand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandValue {
    pub name: String,
    pub value: f64,
}

/// Per-category units and value, highest value first
pub fn category_breakdown(records: &[InventoryRecord]) -> Vec<CategoryBreakdown> {
    let mut rows: Vec<CategoryBreakdown> = Vec::new();
    for record in records {
        match rows.iter_mut().find(|row| row.name == record.category) {
            Some(row) => {
                row.units += u64::from(record.current_stock);
                row.value += record.stock_value();
            }
            None => rows.push(CategoryBreakdown {
                name: record.category.clone(),
                units: u64::from(record.current_stock),
                value: record.stock_value(),
            }),
        }
    }
    rows.sort_by(|a, b| b.value.total_cmp(&a.value));
    rows
}

/// Brands ranked by stock value, at most `limit` of them
pub fn top_brands(records: &[InventoryRecord], limit: usize) -> Vec<BrandValue> {
    let mut rows: Vec<BrandValue> = Vec::new();
    for record in records {
        match rows.iter_mut().find(|row| row.name == record.brand) {
            Some(row) => row.value += record.stock_value(),
            None => rows.push(BrandValue {
                name: record.brand.clone(),
                value: record.stock_value(),
            }),
        }
    }
    rows.sort_by(|a, b| b.value.total_cmp(&a.value));
    rows.truncate(limit);
    rows
}

/// Records running low on stock
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockReport {
    pub threshold: u32,
    /// Records with stock below the threshold, emptiest first
    pub alerts: Vec<InventoryRecord>,
    pub out_of_stock: usize,
}

impl LowStockReport {
    pub fn from_records(records: &[InventoryRecord], threshold: u32) -> Self {
        let mut alerts: Vec<InventoryRecord> = records
            .iter()
            .filter(|r| r.current_stock < threshold)
            .cloned()
            .collect();
        alerts.sort_by_key(|r| r.current_stock);
        let out_of_stock = alerts.iter().filter(|r| r.current_stock == 0).count();

        Self {
            threshold,
            alerts,
            out_of_stock,
        }
    }

    /// Units missing to bring a record back to the threshold
    pub fn shortfall(&self, record: &InventoryRecord) -> u32 {
        self.threshold.saturating_sub(record.current_stock)
    }
}
