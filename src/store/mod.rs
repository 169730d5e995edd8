//! Inventory record storage
//!
//! The store is the system of record: it assigns final identifiers and owns
//! persistence. Two backends are provided:
//! - [`MemoryStore`] keeps records in memory only
//! - [`YamlFileStore`] writes the record list to a YAML file on every change

mod memory;
mod table;
mod yaml_file;

pub use memory::MemoryStore;
pub use yaml_file::YamlFileStore;

use crate::error::StockResult;
use crate::types::{InventoryRecord, NewRecord};

/// Record storage operations, keyed by record id
pub trait InventoryStore: Send + Sync {
    /// All records, newest first
    fn list(&self) -> StockResult<Vec<InventoryRecord>>;

    /// Insert a hand-entered record; the store assigns `id` and `dateAdded`
    fn create(&self, draft: NewRecord) -> StockResult<InventoryRecord>;

    /// Replace the record with the same id
    fn update(&self, record: &InventoryRecord) -> StockResult<InventoryRecord>;

    fn delete(&self, id: &str) -> StockResult<()>;

    /// Insert a batch in one call; the store assigns final ids.
    /// Either every record is stored or none is.
    fn create_many(&self, records: Vec<InventoryRecord>) -> StockResult<Vec<InventoryRecord>>;
}

impl<T: InventoryStore + ?Sized> InventoryStore for Box<T> {
    fn list(&self) -> StockResult<Vec<InventoryRecord>> {
        (**self).list()
    }

    fn create(&self, draft: NewRecord) -> StockResult<InventoryRecord> {
        (**self).create(draft)
    }

    fn update(&self, record: &InventoryRecord) -> StockResult<InventoryRecord> {
        (**self).update(record)
    }

    fn delete(&self, id: &str) -> StockResult<()> {
        (**self).delete(id)
    }

    fn create_many(&self, records: Vec<InventoryRecord>) -> StockResult<Vec<InventoryRecord>> {
        (**self).create_many(records)
    }
}
