//! Stock exporter implementation - inventory records → stock sheet (.xlsx)

use crate::error::{StockError, StockResult};
use crate::excel::cell::format_number;
use crate::excel::layout::ColumnLayout;
use crate::types::{today, InventoryRecord};
use chrono::NaiveDate;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Name of the single exported worksheet
pub const EXPORT_SHEET_NAME: &str = "Stock";

/// Download name for an export produced on the given date
pub fn export_filename(date: NaiveDate) -> String {
    format!("Stock_Export_{}.xlsx", date.format("%Y-%m-%d"))
}

/// Identity of a product across its size variants
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct GroupKey {
    brand: String,
    category: String,
    serial_number: String,
    model: String,
    color: String,
    price: String,
}

impl GroupKey {
    fn of(record: &InventoryRecord) -> Self {
        Self {
            brand: record.brand.clone(),
            category: record.category.clone(),
            serial_number: record.serial_number.clone(),
            model: record.model.clone(),
            color: record.color.clone(),
            price: format_number(record.price),
        }
    }
}

/// All size variants of one product, compacted into one sheet row
#[derive(Debug, Clone, PartialEq)]
pub struct ProductGroup {
    pub brand: String,
    pub category: String,
    pub serial_number: String,
    pub model: String,
    pub color: String,
    pub price: f64,
    /// size label → stock; a later record with the same size replaces the earlier one
    pub stocks: HashMap<String, u32>,
}

impl ProductGroup {
    fn from_record(record: &InventoryRecord) -> Self {
        Self {
            brand: record.brand.clone(),
            category: record.category.clone(),
            serial_number: record.serial_number.clone(),
            model: record.model.clone(),
            color: record.color.clone(),
            price: record.price,
            stocks: HashMap::new(),
        }
    }

    /// Stock for a size, `None` when absent or zero (written as a blank cell)
    pub fn stock_for(&self, size: &str) -> Option<u32> {
        self.stocks.get(size).copied().filter(|&stock| stock > 0)
    }

    /// Units across the sizes the layout can show
    pub fn total_stock(&self, layout: &ColumnLayout) -> u64 {
        layout
            .size_labels()
            .iter()
            .filter_map(|size| self.stock_for(size))
            .map(u64::from)
            .sum()
    }

    /// Total price text for the row, e.g. `"300€"`
    pub fn total_price_text(&self, layout: &ColumnLayout) -> String {
        euro(self.price * self.total_stock(layout) as f64)
    }
}

/// Group records by product, in order of first appearance
pub fn group_records(records: &[InventoryRecord]) -> Vec<ProductGroup> {
    let mut positions: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<ProductGroup> = Vec::new();

    for record in records {
        let idx = *positions.entry(GroupKey::of(record)).or_insert_with(|| {
            groups.push(ProductGroup::from_record(record));
            groups.len() - 1
        });
        groups[idx]
            .stocks
            .insert(record.size.clone(), record.current_stock);
    }

    groups
}

fn euro(amount: f64) -> String {
    format!("{}€", format_number(amount))
}

/// A produced workbook, ready to be written or downloaded
#[derive(Debug, Clone)]
pub struct ExportedWorkbook {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Exporter writing records back into the stock sheet layout
pub struct StockExporter {
    layout: ColumnLayout,
}

impl StockExporter {
    pub fn new() -> Self {
        Self::with_layout(ColumnLayout::default())
    }

    pub fn with_layout(layout: ColumnLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Export records to a workbook named for today
    pub fn export(&self, records: &[InventoryRecord]) -> StockResult<ExportedWorkbook> {
        self.export_dated(records, today())
    }

    pub fn export_dated(
        &self,
        records: &[InventoryRecord],
        date: NaiveDate,
    ) -> StockResult<ExportedWorkbook> {
        Ok(ExportedWorkbook {
            filename: export_filename(date),
            bytes: self.export_bytes(records)?,
        })
    }

    /// Export records to an .xlsx buffer
    pub fn export_bytes(&self, records: &[InventoryRecord]) -> StockResult<Vec<u8>> {
        let mut workbook = self.build_workbook(records)?;
        workbook
            .save_to_buffer()
            .map_err(|e| StockError::Export(format!("Failed to build Excel file: {}", e)))
    }

    /// Export records to an .xlsx file on disk
    pub fn export_to_path(&self, records: &[InventoryRecord], path: &Path) -> StockResult<()> {
        let mut workbook = self.build_workbook(records)?;
        workbook
            .save(path)
            .map_err(|e| StockError::Export(format!("Failed to save Excel file: {}", e)))
    }

    fn build_workbook(&self, records: &[InventoryRecord]) -> StockResult<Workbook> {
        let groups = group_records(records);
        debug!(
            "Exporting {} records as {} product rows",
            records.len(),
            groups.len()
        );

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(EXPORT_SHEET_NAME)
            .map_err(|e| StockError::Export(format!("Failed to set worksheet name: {}", e)))?;

        self.write_headers(worksheet)?;

        // Data rows start right after the two header rows
        for (idx, group) in groups.iter().enumerate() {
            self.write_group(worksheet, 2 + idx as u32, group)?;
        }

        Ok(workbook)
    }

    /// Header row 1 carries column titles, header row 2 the size labels
    fn write_headers(&self, worksheet: &mut Worksheet) -> StockResult<()> {
        for (col, title) in self.layout.title_headers() {
            write_text(worksheet, 0, col, title)?;
        }
        for (col, size) in self.layout.size_columns() {
            write_text(worksheet, 1, col, size)?;
        }
        Ok(())
    }

    fn write_group(&self, worksheet: &mut Worksheet, row: u32, group: &ProductGroup) -> StockResult<()> {
        write_text(worksheet, row, ColumnLayout::BRAND, &group.brand)?;
        write_text(worksheet, row, ColumnLayout::CATEGORY, &group.category)?;
        write_text(worksheet, row, ColumnLayout::SERIAL, &group.serial_number)?;
        write_text(worksheet, row, ColumnLayout::MODEL, &group.model)?;
        write_text(worksheet, row, ColumnLayout::COLOR, &group.color)?;

        for (col, size) in self.layout.size_columns() {
            if let Some(stock) = group.stock_for(size) {
                worksheet
                    .write_number(row, col as u16, stock as f64)
                    .map_err(|e| StockError::Export(format!("Failed to write stock: {}", e)))?;
            }
        }

        write_text(worksheet, row, self.layout.price_column(), &euro(group.price))?;
        write_text(
            worksheet,
            row,
            self.layout.total_column(),
            &group.total_price_text(&self.layout),
        )?;
        Ok(())
    }
}

impl Default for StockExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a text cell; empty text leaves the cell blank
fn write_text(worksheet: &mut Worksheet, row: u32, col: usize, text: &str) -> StockResult<()> {
    if text.is_empty() {
        return Ok(());
    }
    worksheet
        .write_string(row, col as u16, text)
        .map_err(|e| StockError::Export(format!("Failed to write text: {}", e)))?;
    Ok(())
}
