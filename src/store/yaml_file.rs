use super::table::RecordTable;
use super::InventoryStore;
use crate::error::{StockError, StockResult};
use crate::types::{InventoryRecord, NewRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// On-disk layout of the inventory file
#[derive(Debug, Default, Serialize, Deserialize)]
struct InventoryFile {
    #[serde(default)]
    garments: Vec<InventoryRecord>,
}

/// Store persisting the whole record list to a YAML file
///
/// Every mutation is applied to a copy, written to disk, and only then
/// becomes visible; a failed write leaves the store unchanged.
#[derive(Debug)]
pub struct YamlFileStore {
    path: PathBuf,
    table: Mutex<RecordTable>,
}

impl YamlFileStore {
    /// Open an inventory file; a missing file is an empty inventory
    pub fn open<P: AsRef<Path>>(path: P) -> StockResult<Self> {
        let path = path.as_ref().to_path_buf();
        let table = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let file: InventoryFile = if content.trim().is_empty() {
                InventoryFile::default()
            } else {
                serde_yaml::from_str(&content)?
            };
            debug!(
                "Loaded {} garments from {}",
                file.garments.len(),
                path.display()
            );
            RecordTable::from_records(file.garments)
        } else {
            RecordTable::default()
        };

        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn table(&self) -> StockResult<MutexGuard<'_, RecordTable>> {
        self.table
            .lock()
            .map_err(|_| StockError::Store("inventory file lock poisoned".to_string()))
    }

    /// Apply a change to a copy of the table, persist it, then commit
    fn mutate<T>(&self, change: impl FnOnce(&mut RecordTable) -> StockResult<T>) -> StockResult<T> {
        let mut guard = self.table()?;
        let mut next = guard.clone();
        let result = change(&mut next)?;
        self.persist(&next)?;
        *guard = next;
        Ok(result)
    }

    fn persist(&self, table: &RecordTable) -> StockResult<()> {
        let file = InventoryFile {
            garments: table.records().to_vec(),
        };
        let yaml = serde_yaml::to_string(&file)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, yaml)?;
        Ok(())
    }
}

impl InventoryStore for YamlFileStore {
    fn list(&self) -> StockResult<Vec<InventoryRecord>> {
        Ok(self.table()?.list())
    }

    fn create(&self, draft: NewRecord) -> StockResult<InventoryRecord> {
        self.mutate(|table| table.create(draft))
    }

    fn update(&self, record: &InventoryRecord) -> StockResult<InventoryRecord> {
        self.mutate(|table| table.update(record))
    }

    fn delete(&self, id: &str) -> StockResult<()> {
        self.mutate(|table| table.delete(id))
    }

    fn create_many(&self, records: Vec<InventoryRecord>) -> StockResult<Vec<InventoryRecord>> {
        self.mutate(|table| table.create_many(records))
    }
}
