//! Loaded inventory session
//!
//! [`Inventory`] keeps the record list the user is working with in sync with
//! the store. Every mutation goes to the store first; the in-memory list only
//! changes once the store call has succeeded.

pub mod filter;
pub mod reports;

pub use filter::{FilterOptions, RecordFilter, ANY};
pub use reports::{BrandValue, CategoryBreakdown, LowStockReport, StockSummary};

use crate::error::{StockError, StockResult};
use crate::store::InventoryStore;
use crate::types::{InventoryRecord, NewRecord};
use tracing::{error, info};

pub struct Inventory<S: InventoryStore> {
    store: S,
    records: Vec<InventoryRecord>,
}

impl<S: InventoryStore> Inventory<S> {
    /// Load every record from the store
    pub fn load(store: S) -> StockResult<Self> {
        let records = store.list().map_err(|e| {
            error!("Failed to load garments: {}", e);
            e
        })?;
        info!("Loaded {} garments", records.len());
        Ok(Self { store, records })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&InventoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Records matching a filter, in list order
    pub fn filtered(&self, filter: &RecordFilter) -> Vec<InventoryRecord> {
        filter.apply(&self.records).into_iter().cloned().collect()
    }

    /// Distinct categories, brands, colors and sizes currently in use
    pub fn options(&self) -> FilterOptions {
        FilterOptions::from_records(&self.records)
    }

    /// Create a hand-entered garment
    pub fn add(&mut self, draft: NewRecord) -> StockResult<InventoryRecord> {
        draft.validate()?;
        let record = self.store.create(draft).map_err(|e| log_failure("add", e))?;
        info!("Added garment {} ({})", record.id, record.name);
        self.records.insert(0, record.clone());
        Ok(record)
    }

    /// Replace a garment with an edited version
    pub fn update(&mut self, record: InventoryRecord) -> StockResult<InventoryRecord> {
        record.validate()?;
        let idx = self.position(&record.id)?;
        let stored = self
            .store
            .update(&record)
            .map_err(|e| log_failure("update", e))?;
        info!("Updated garment {}", stored.id);
        self.records[idx] = stored.clone();
        Ok(stored)
    }

    pub fn delete(&mut self, id: &str) -> StockResult<()> {
        let idx = self.position(id)?;
        self.store.delete(id).map_err(|e| log_failure("delete", e))?;
        info!("Deleted garment {}", id);
        self.records.remove(idx);
        Ok(())
    }

    /// Send a parsed batch to the store in one call; returns the stored count
    pub fn import(&mut self, records: Vec<InventoryRecord>) -> StockResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }
        let stored = self
            .store
            .create_many(records)
            .map_err(|e| log_failure("import", e))?;
        let count = stored.len();
        info!("Imported {} garments", count);
        self.records.splice(0..0, stored);
        Ok(count)
    }

    /// Change the quantity on hand by `delta`, never going below zero
    pub fn adjust_stock(&mut self, id: &str, delta: i64) -> StockResult<InventoryRecord> {
        let idx = self.position(id)?;
        let mut record = self.records[idx].clone();
        record.current_stock = adjusted_stock(record.current_stock, delta);

        let stored = self
            .store
            .update(&record)
            .map_err(|e| log_failure("adjust stock", e))?;
        info!(
            "Adjusted stock of {} by {} to {}",
            id, delta, stored.current_stock
        );
        self.records[idx] = stored.clone();
        Ok(stored)
    }

    fn position(&self, id: &str) -> StockResult<usize> {
        self.records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StockError::NotFound(id.to_string()))
    }
}

/// Stock after applying a signed change, clamped to `0..=u32::MAX`
pub fn adjusted_stock(current: u32, delta: i64) -> u32 {
    let next = i64::from(current).saturating_add(delta);
    next.clamp(0, i64::from(u32::MAX)) as u32
}

fn log_failure(operation: &str, e: StockError) -> StockError {
    error!("Failed to {} garment(s): {}", operation, e);
    e
}
