//! Stock sheet interchange
//!
//! Bidirectional conversion between the positional stock sheet and inventory records:
//! - Import: stock sheet (.xlsx/.xls) → one record per (product, size) with stock
//! - Export: records → one sheet row per product, sizes spread across columns

mod cell;
mod exporter;
mod importer;
pub mod layout;

pub use cell::{parse_price_text, parse_stock};
pub use exporter::{
    export_filename, group_records, ExportedWorkbook, ProductGroup, StockExporter,
    EXPORT_SHEET_NAME,
};
pub use importer::{check_extension, SizeColumns, StockImporter, IMPORT_EXTENSIONS};
pub use layout::{column_index, column_letter, ColumnLayout, DEFAULT_SIZE_LABELS};
