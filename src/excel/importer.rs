//! Stock importer implementation - stock sheet (.xlsx/.xls) → inventory records

use crate::error::{StockError, StockResult};
use crate::excel::cell::{cell_text, holds_label, parse_price, parse_stock, size_label};
use crate::excel::layout::{ColumnLayout, MAX_TWO_LETTER_COLUMN};
use crate::types::{display_name, new_record_id, today, InventoryRecord};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::NaiveDate;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, warn};

/// File extensions accepted for import
pub const IMPORT_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Number of leading sheet rows that are always treated as headers
const HEADER_ROWS: usize = 2;

const DEFAULT_COLOR: &str = "Standard";
const DEFAULT_CATEGORY: &str = "Autre";
const MISSING_SERIAL: &str = "N/A";

/// One non-blank sheet row, addressed by absolute column index
struct SheetRow<'a> {
    first_col: usize,
    cells: &'a [Data],
}

impl<'a> SheetRow<'a> {
    /// Cell at an absolute column, `None` when blank or outside the row
    fn get(&self, col: usize) -> Option<&'a Data> {
        let offset = col.checked_sub(self.first_col)?;
        match self.cells.get(offset) {
            Some(Data::Empty) | None => None,
            Some(cell) => Some(cell),
        }
    }

    fn text(&self, col: usize) -> Option<String> {
        self.get(col).and_then(cell_text)
    }

    /// (absolute column, cell) for every non-blank cell
    fn cells(&self) -> impl Iterator<Item = (usize, &'a Data)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !is_blank(cell))
            .map(move |(offset, cell)| (self.first_col + offset, cell))
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Mapping from size column to size label, read from the size header row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SizeColumns {
    columns: Vec<(usize, String)>,
}

impl SizeColumns {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.columns.iter().map(|(col, label)| (*col, label.as_str()))
    }
}

/// Importer for stock sheets laid out per [`ColumnLayout`]
pub struct StockImporter {
    layout: ColumnLayout,
    date_added: NaiveDate,
}

impl StockImporter {
    /// Create an importer with the default layout, dating records today
    pub fn new() -> Self {
        Self::with_layout(ColumnLayout::default())
    }

    pub fn with_layout(layout: ColumnLayout) -> Self {
        Self {
            layout,
            date_added: today(),
        }
    }

    /// Override the date stamped on imported records
    pub fn dated(mut self, date_added: NaiveDate) -> Self {
        self.date_added = date_added;
        self
    }

    pub fn layout(&self) -> &ColumnLayout {
        &self.layout
    }

    /// Read a stock sheet file from disk
    pub fn import_path<P: AsRef<Path>>(&self, path: P) -> StockResult<Vec<InventoryRecord>> {
        let path = path.as_ref();
        check_extension(path)?;
        let bytes = std::fs::read(path)?;
        self.import_bytes(&bytes)
    }

    /// Parse a raw spreadsheet buffer; only the first sheet is read
    pub fn import_bytes(&self, bytes: &[u8]) -> StockResult<Vec<InventoryRecord>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| StockError::Import(format!("Failed to open spreadsheet: {}", e)))?;

        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range
                .map_err(|e| StockError::Import(format!("Failed to read first sheet: {}", e)))?,
            None => {
                warn!("Spreadsheet has no sheets, nothing to import");
                return Ok(Vec::new());
            }
        };

        Ok(self.import_range(&range))
    }

    /// Extract records from an already-loaded sheet
    pub fn import_range(&self, range: &Range<Data>) -> Vec<InventoryRecord> {
        let rows = sheet_rows(range);

        let sizes = self.find_size_columns(&rows);
        if sizes.is_empty() {
            warn!(
                "No size header row (column F = {}) found, nothing imported",
                self.layout.anchor_label()
            );
            return Vec::new();
        }
        debug!("Found {} size columns", sizes.len());

        let mut records = Vec::new();
        for row in rows.iter().skip(HEADER_ROWS) {
            self.read_row(row, &sizes, &mut records);
        }

        debug!("Imported {} records", records.len());
        records
    }

    /// Locate the size header row (anchor label in the first size column)
    /// and map every numeric cell of that row to its column.
    fn find_size_columns(&self, rows: &[SheetRow<'_>]) -> SizeColumns {
        let anchor = self.layout.anchor_label();
        let header = rows.iter().find(|row| {
            row.get(ColumnLayout::FIRST_SIZE)
                .is_some_and(|cell| holds_label(cell, anchor))
        });

        let Some(header) = header else {
            return SizeColumns::default();
        };

        let columns = header
            .cells()
            .filter(|(col, _)| *col <= MAX_TWO_LETTER_COLUMN)
            .filter_map(|(col, cell)| size_label(cell).map(|label| (col, label)))
            .collect();

        SizeColumns { columns }
    }

    /// Append one record per positive stock cell of a data row
    fn read_row(&self, row: &SheetRow<'_>, sizes: &SizeColumns, out: &mut Vec<InventoryRecord>) {
        let brand = row.text(ColumnLayout::BRAND);
        let category = row.text(ColumnLayout::CATEGORY);
        let serial = row.text(ColumnLayout::SERIAL);
        let model = row.text(ColumnLayout::MODEL).unwrap_or_default();
        let color = row
            .text(ColumnLayout::COLOR)
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());
        let price = parse_price(row.get(self.layout.price_column()));

        let Some(brand) = brand else {
            return;
        };
        if category.is_none() && serial.is_none() {
            return;
        }

        let name = display_name(category.as_deref().unwrap_or(""), &brand, &model);
        let serial_number = serial
            .or_else(|| (!model.is_empty()).then(|| model.clone()))
            .unwrap_or_else(|| MISSING_SERIAL.to_string());
        let category = category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        for (col, size) in sizes.iter() {
            let stock = match parse_stock(row.get(col)) {
                Some(n) if n > 0 => n,
                _ => continue,
            };
            let current_stock = u32::try_from(stock).unwrap_or_else(|_| {
                warn!("Stock {} in column {} is out of range, clamped", stock, col);
                u32::MAX
            });

            out.push(InventoryRecord {
                id: new_record_id(),
                serial_number: serial_number.clone(),
                name: name.clone(),
                brand: brand.clone(),
                model: model.clone(),
                category: category.clone(),
                color: color.clone(),
                size: size.to_string(),
                price,
                current_stock,
                date_added: self.date_added,
            });
        }
    }
}

impl Default for StockImporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Non-blank rows of a sheet, in order
fn sheet_rows(range: &Range<Data>) -> Vec<SheetRow<'_>> {
    let first_col = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    range
        .rows()
        .filter(|cells| !cells.iter().all(is_blank))
        .map(|cells| SheetRow { first_col, cells })
        .collect()
}

/// Reject files that are not .xlsx/.xls
pub fn check_extension(path: &Path) -> StockResult<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension {
        Some(ext) if IMPORT_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(StockError::UnsupportedFile(format!(
            "{} (expected .xlsx or .xls)",
            path.display()
        ))),
    }
}
