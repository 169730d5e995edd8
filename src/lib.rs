//! TailorStock - garment stock tracking with spreadsheet interchange
//!
//! This library reads and writes the size-matrix stock sheet used by
//! tailoring shops: one row per product, one column per size.
//!
//! # Features
//!
//! - Import a stock sheet (.xlsx/.xls) into one record per size variant
//! - Export records back to the same layout, size variants grouped per product
//! - Configurable size columns (30..62 by default)
//! - Inventory store backed by a YAML file or held in memory
//! - Filters, stock reports and low stock alerts
//!
//! # Example
//!
//! ```no_run
//! use tailorstock::{Inventory, StockExporter, StockImporter, YamlFileStore};
//! use std::path::Path;
//!
//! let records = StockImporter::new().import_path(Path::new("stock.xlsx"))?;
//!
//! let mut inventory = Inventory::load(YamlFileStore::open("inventory.yaml")?)?;
//! println!("Imported: {}", inventory.import(records)?);
//!
//! let workbook = StockExporter::new().export(inventory.records())?;
//! println!("{} ({} bytes)", workbook.filename, workbook.bytes.len());
//! # Ok::<(), tailorstock::error::StockError>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod inventory;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{StockError, StockResult};
pub use excel::{ColumnLayout, StockExporter, StockImporter};
pub use inventory::Inventory;
pub use store::{InventoryStore, MemoryStore, YamlFileStore};
pub use types::{InventoryRecord, NewRecord};
