//! Record list operations shared by the store backends

use crate::error::{StockError, StockResult};
use crate::types::{new_record_id, today, InventoryRecord, NewRecord};

/// Records in insertion order
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordTable {
    records: Vec<InventoryRecord>,
}

impl RecordTable {
    pub(crate) fn from_records(records: Vec<InventoryRecord>) -> Self {
        Self { records }
    }

    pub(crate) fn records(&self) -> &[InventoryRecord] {
        &self.records
    }

    /// Newest first: by date descending, later inserts first within a date
    pub(crate) fn list(&self) -> Vec<InventoryRecord> {
        let mut records: Vec<InventoryRecord> = self.records.iter().rev().cloned().collect();
        records.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        records
    }

    pub(crate) fn create(&mut self, draft: NewRecord) -> StockResult<InventoryRecord> {
        draft.validate()?;
        let record = InventoryRecord::from_draft(draft, today());
        self.records.push(record.clone());
        Ok(record)
    }

    pub(crate) fn update(&mut self, record: &InventoryRecord) -> StockResult<InventoryRecord> {
        record.validate()?;
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id == record.id)
            .ok_or_else(|| StockError::NotFound(record.id.clone()))?;
        *slot = record.clone();
        Ok(record.clone())
    }

    pub(crate) fn delete(&mut self, id: &str) -> StockResult<()> {
        let idx = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StockError::NotFound(id.to_string()))?;
        self.records.remove(idx);
        Ok(())
    }

    pub(crate) fn create_many(
        &mut self,
        records: Vec<InventoryRecord>,
    ) -> StockResult<Vec<InventoryRecord>> {
        let stored: Vec<InventoryRecord> = records
            .into_iter()
            .map(|mut record| {
                record.id = new_record_id();
                record.validate().map(|_| record)
            })
            .collect::<StockResult<_>>()?;

        self.records.extend(stored.iter().cloned());
        Ok(stored)
    }
}
