use super::table::RecordTable;
use super::InventoryStore;
use crate::error::{StockError, StockResult};
use crate::types::{InventoryRecord, NewRecord};
use std::sync::{Mutex, MutexGuard};

/// Volatile store, used for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<RecordTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with records, kept as they are (ids included)
    pub fn with_records(records: Vec<InventoryRecord>) -> Self {
        Self {
            table: Mutex::new(RecordTable::from_records(records)),
        }
    }

    fn table(&self) -> StockResult<MutexGuard<'_, RecordTable>> {
        self.table
            .lock()
            .map_err(|_| StockError::Store("memory store lock poisoned".to_string()))
    }
}

impl InventoryStore for MemoryStore {
    fn list(&self) -> StockResult<Vec<InventoryRecord>> {
        Ok(self.table()?.list())
    }

    fn create(&self, draft: NewRecord) -> StockResult<InventoryRecord> {
        self.table()?.create(draft)
    }

    fn update(&self, record: &InventoryRecord) -> StockResult<InventoryRecord> {
        self.table()?.update(record)
    }

    fn delete(&self, id: &str) -> StockResult<()> {
        self.table()?.delete(id)
    }

    fn create_many(&self, records: Vec<InventoryRecord>) -> StockResult<Vec<InventoryRecord>> {
        self.table()?.create_many(records)
    }
}
