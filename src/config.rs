//! Runtime settings shared by the CLI and the API server

use crate::error::StockResult;
use crate::excel::ColumnLayout;
use crate::inventory::reports::DEFAULT_LOW_STOCK_THRESHOLD;
use crate::store::YamlFileStore;
use std::path::PathBuf;

/// Default inventory file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "inventory.yaml";

#[derive(Debug, Clone, PartialEq)]
pub struct StockConfig {
    /// YAML file backing the inventory store
    pub data_file: PathBuf,
    /// Size labels overriding the default column map; empty keeps the default
    pub size_labels: Vec<String>,
    pub low_stock_threshold: u32,
}

impl StockConfig {
    /// Column map for import and export
    pub fn layout(&self) -> StockResult<ColumnLayout> {
        if self.size_labels.is_empty() {
            Ok(ColumnLayout::default())
        } else {
            ColumnLayout::new(self.size_labels.iter().cloned())
        }
    }

    pub fn open_store(&self) -> StockResult<YamlFileStore> {
        YamlFileStore::open(&self.data_file)
    }
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            size_labels: Vec::new(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}
