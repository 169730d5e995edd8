//! Stock sheet import/export tests
//!
//! Fixtures are built in memory with rust_xlsxwriter and read back with the
//! importer, so every test goes through real .xlsx bytes.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use std::collections::HashSet;
use tailorstock::excel::{
    export_filename, group_records, parse_price_text, ColumnLayout, StockExporter, StockImporter,
};
use tailorstock::types::InventoryRecord;
use tempfile::TempDir;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

/// Write a sheet with the standard title row and size header row, then `rows`
fn stock_sheet(rows: &[Vec<(u16, Cell)>]) -> Vec<u8> {
    let layout = ColumnLayout::default();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, title) in layout.title_headers() {
        sheet.write_string(0, col as u16, title).unwrap();
    }
    for (col, size) in layout.size_columns() {
        let value: f64 = size.parse().unwrap();
        sheet.write_number(1, col as u16, value).unwrap();
    }

    for (idx, row) in rows.iter().enumerate() {
        let row_num = 2 + idx as u32;
        for (col, cell) in row {
            match cell {
                Cell::Text(text) => sheet.write_string(row_num, *col, *text).unwrap(),
                Cell::Number(n) => sheet.write_number(row_num, *col, *n).unwrap(),
            };
        }
    }

    workbook.save_to_buffer().unwrap()
}

#[derive(Clone, Copy)]
enum Cell {
    Text(&'static str),
    Number(f64),
}

use Cell::{Number, Text};

// Column indexes of the default layout
const F: u16 = 5;
const G: u16 = 6;
const H: u16 = 7;
const AE: u16 = 30;

fn product_row(brand: &'static str, category: &'static str) -> Vec<(u16, Cell)> {
    vec![
        (0, Text(brand)),
        (1, Text(category)),
        (2, Text("S1")),
        (3, Text("M1")),
        (4, Text("Red")),
    ]
}

fn record(size: &str, stock: u32) -> InventoryRecord {
    InventoryRecord {
        id: format!("id-{}", size),
        serial_number: "S1".to_string(),
        name: "Coat Acme M1".to_string(),
        brand: "Acme".to_string(),
        model: "M1".to_string(),
        category: "Coat".to_string(),
        color: "Red".to_string(),
        size: size.to_string(),
        price: 150.0,
        current_stock: stock,
        date_added: date(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_import_one_size_variant() {
    let mut row = product_row("Acme", "Coat");
    row.push((F, Number(2.0)));
    row.push((G, Number(0.0)));
    row.push((AE, Text("150€")));
    let bytes = stock_sheet(&[row]);

    let records = StockImporter::new().dated(date()).import_bytes(&bytes).unwrap();

    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.size, "30");
    assert_eq!(r.current_stock, 2);
    assert_eq!(r.price, 150.0);
    assert_eq!(r.name, "Coat Acme M1");
    assert_eq!(r.serial_number, "S1");
    assert_eq!(r.color, "Red");
    assert_eq!(r.date_added, date());
}

#[test]
fn test_import_without_size_header_yields_nothing() {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Marque").unwrap();
    sheet.write_string(2, 0, "Acme").unwrap();
    sheet.write_string(2, 1, "Coat").unwrap();
    sheet.write_number(2, 5, 4).unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let records = StockImporter::new().import_bytes(&bytes).unwrap();
    assert!(records.is_empty());
}

#[test]
fn test_import_multiple_sizes_share_attributes() {
    let mut row = product_row("Acme", "Coat");
    row.push((F, Number(1.0)));
    row.push((G, Number(3.0)));
    row.push((H, Text("2")));
    row.push((AE, Number(99.5)));
    let bytes = stock_sheet(&[row]);

    let records = StockImporter::new().import_bytes(&bytes).unwrap();

    let sizes: Vec<(&str, u32)> = records
        .iter()
        .map(|r| (r.size.as_str(), r.current_stock))
        .collect();
    assert_eq!(sizes, vec![("30", 1), ("31", 3), ("32", 2)]);
    assert!(records.iter().all(|r| r.price == 99.5 && r.brand == "Acme"));

    let ids: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), 3);
}

#[test]
fn test_import_skips_rows_without_brand_or_identity() {
    let mut no_brand = vec![(1, Text("Coat")), (2, Text("S1"))];
    no_brand.push((F, Number(5.0)));

    let mut brand_only = vec![(0, Text("Acme"))];
    brand_only.push((F, Number(5.0)));

    let mut kept = product_row("Zeta", "Shirt");
    kept.push((F, Number(1.0)));

    let bytes = stock_sheet(&[no_brand, brand_only, kept]);
    let records = StockImporter::new().import_bytes(&bytes).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].brand, "Zeta");
}

#[test]
fn test_import_applies_defaults() {
    // Serial present, category, model and color missing
    let mut row = vec![(0, Text("Acme")), (2, Text("A-77"))];
    row.push((F, Number(1.0)));
    let bytes = stock_sheet(&[row]);

    let records = StockImporter::new().import_bytes(&bytes).unwrap();

    assert_eq!(records.len(), 1);
    let r = &records[0];
    assert_eq!(r.category, "Autre");
    assert_eq!(r.color, "Standard");
    assert_eq!(r.model, "");
    assert_eq!(r.serial_number, "A-77");
    assert_eq!(r.name, "Acme");
    assert_eq!(r.price, 0.0);
}

#[test]
fn test_import_serial_falls_back_to_model_then_placeholder() {
    let mut with_model = vec![(0, Text("Acme")), (1, Text("Coat")), (3, Text("M9"))];
    with_model.push((F, Number(1.0)));
    let mut bare = vec![(0, Text("Acme")), (1, Text("Coat"))];
    bare.push((F, Number(1.0)));

    let bytes = stock_sheet(&[with_model, bare]);
    let records = StockImporter::new().import_bytes(&bytes).unwrap();

    assert_eq!(records[0].serial_number, "M9");
    assert_eq!(records[1].serial_number, "N/A");
}

#[test]
fn test_import_ignores_negative_and_text_stock() {
    let mut row = product_row("Acme", "Coat");
    row.push((F, Number(-3.0)));
    row.push((G, Text("none")));
    row.push((H, Number(2.7)));
    let bytes = stock_sheet(&[row]);

    let records = StockImporter::new().import_bytes(&bytes).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].size, "32");
    assert_eq!(records[0].current_stock, 2);
}

#[test]
fn test_import_garbage_bytes_fails() {
    let result = StockImporter::new().import_bytes(b"definitely not a workbook");
    assert!(result.is_err());
}

#[test]
fn test_import_path_checks_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stock.ods.txt");
    std::fs::write(&path, b"x").unwrap();

    assert!(StockImporter::new().import_path(&path).is_err());
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_export_filename_format() {
    assert_eq!(export_filename(date()), "Stock_Export_2024-03-15.xlsx");
}

#[test]
fn test_export_dated_names_workbook() {
    let workbook = StockExporter::new()
        .export_dated(&[record("30", 1)], date())
        .unwrap();
    assert_eq!(workbook.filename, "Stock_Export_2024-03-15.xlsx");
    assert!(!workbook.bytes.is_empty());
}

#[test]
fn test_group_records_merges_size_variants() {
    let mut other = record("30", 4);
    other.color = "Blue".to_string();
    let records = vec![record("30", 2), other, record("48", 5)];

    let groups = group_records(&records);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].color, "Red");
    assert_eq!(groups[0].stock_for("30"), Some(2));
    assert_eq!(groups[0].stock_for("48"), Some(5));
    assert_eq!(groups[1].color, "Blue");

    let layout = ColumnLayout::default();
    assert_eq!(groups[0].total_stock(&layout), 7);
    assert_eq!(groups[0].total_price_text(&layout), "1050€");
}

#[test]
fn test_group_records_prices_split_groups() {
    let mut cheaper = record("31", 1);
    cheaper.price = 120.0;

    let groups = group_records(&[record("30", 1), cheaper]);
    assert_eq!(groups.len(), 2);
}

#[test]
fn test_export_to_path_writes_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out.xlsx");

    StockExporter::new()
        .export_to_path(&[record("30", 1)], &path)
        .unwrap();

    assert!(path.exists());
}

// ═══════════════════════════════════════════════════════════════════════════
// ROUND TRIP
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_export_then_import_preserves_stock() {
    let records = vec![record("30", 2), record("48", 5), record("62", 1)];

    let bytes = StockExporter::new().export_bytes(&records).unwrap();
    let imported = StockImporter::new().dated(date()).import_bytes(&bytes).unwrap();

    let mut got: Vec<(String, u32)> = imported
        .iter()
        .map(|r| (r.size.clone(), r.current_stock))
        .collect();
    got.sort();
    assert_eq!(
        got,
        vec![
            ("30".to_string(), 2),
            ("48".to_string(), 5),
            ("62".to_string(), 1)
        ]
    );
    for r in &imported {
        assert_eq!(r.brand, "Acme");
        assert_eq!(r.category, "Coat");
        assert_eq!(r.serial_number, "S1");
        assert_eq!(r.model, "M1");
        assert_eq!(r.color, "Red");
        assert_eq!(r.price, 150.0);
    }
}

#[test]
fn test_round_trip_with_custom_sizes() {
    let layout = ColumnLayout::new(["1", "2", "3"]).unwrap();
    let records = vec![record("2", 4)];

    let bytes = StockExporter::with_layout(layout.clone())
        .export_bytes(&records)
        .unwrap();
    let imported = StockImporter::with_layout(layout).import_bytes(&bytes).unwrap();

    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].size, "2");
    assert_eq!(imported[0].current_stock, 4);
}

// ═══════════════════════════════════════════════════════════════════════════
// PRICE PARSING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_parse_price_text() {
    assert_eq!(parse_price_text("150€"), Some(150.0));
    assert_eq!(parse_price_text("1 234,50 €"), Some(1234.5));
    assert_eq!(parse_price_text("12.5"), Some(12.5));
    assert_eq!(parse_price_text("abc"), None);
}

#[test]
fn test_letter_size_layout_is_rejected() {
    // Letter sizes could be written but never read back from the header row
    assert!(ColumnLayout::new(["S", "M", "L"]).is_err());
}
