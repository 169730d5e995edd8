use crate::config::StockConfig;
use crate::error::StockResult;
use crate::excel::{export_filename, StockExporter, StockImporter};
use crate::inventory::reports::{category_breakdown, top_brands, TOP_BRANDS};
use crate::inventory::{Inventory, LowStockReport, RecordFilter, StockSummary};
use crate::store::YamlFileStore;
use crate::types::{today, InventoryRecord, NewRecord};
use colored::Colorize;
use std::path::PathBuf;

/// Format a number with thousands separator
fn format_amount(n: f64) -> String {
    let rounded = (n * 100.0).round() / 100.0;
    let whole = rounded.trunc().abs() as u64;
    let cents = ((rounded.abs() - rounded.abs().trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    if cents == 0 {
        format!("{}{} €", sign, grouped)
    } else {
        format!("{}{},{:02} €", sign, grouped, cents)
    }
}

fn open_inventory(config: &StockConfig) -> StockResult<Inventory<YamlFileStore>> {
    Inventory::load(config.open_store()?)
}

fn print_record(record: &InventoryRecord) {
    println!(
        "   {}  {} | {} | {} {} | {} | {}: {} | {}",
        record.id.dimmed(),
        record.name.bold(),
        record.serial_number,
        record.brand,
        record.model,
        record.color,
        "size".cyan(),
        record.size.bright_blue(),
        stock_label(record.current_stock),
    );
}

fn stock_label(stock: u32) -> String {
    let text = format!("stock {}", stock);
    if stock == 0 {
        text.red().bold().to_string()
    } else {
        text.green().to_string()
    }
}

/// Execute the import command
pub fn import(config: &StockConfig, input: PathBuf, verbose: bool) -> StockResult<()> {
    println!("{}", "📦 TailorStock - Stock Import".bold().green());
    println!("   Input: {}", input.display());
    println!("   Store: {}\n", config.data_file.display());

    if verbose {
        println!("{}", "📖 Reading spreadsheet...".cyan());
    }

    let importer = StockImporter::with_layout(config.layout()?);
    let records = importer.import_path(&input)?;

    if verbose {
        println!("   Parsed {} size variants\n", records.len());
        println!("{}", "💾 Saving to store...".cyan());
    }

    let mut inventory = open_inventory(config)?;
    let count = inventory.import(records)?;

    println!(
        "{}",
        format!("✅ {} garments imported", count).bold().green()
    );
    if count == 0 {
        println!(
            "{}",
            "⚠️  No stock rows found (is the size header row present?)".yellow()
        );
    }
    println!();

    Ok(())
}

/// Execute the export command
pub fn export(
    config: &StockConfig,
    output: Option<PathBuf>,
    filter: RecordFilter,
    verbose: bool,
) -> StockResult<()> {
    let output = output.unwrap_or_else(|| PathBuf::from(export_filename(today())));

    println!("{}", "📦 TailorStock - Stock Export".bold().green());
    println!("   Store:  {}", config.data_file.display());
    println!("   Output: {}\n", output.display());

    let inventory = open_inventory(config)?;
    let records = inventory.filtered(&filter);

    if verbose {
        println!("   {} garments selected", records.len());
        println!("{}", "📊 Writing workbook...".cyan());
    }

    let exporter = StockExporter::with_layout(config.layout()?);
    exporter.export_to_path(&records, &output)?;

    println!("{}", "✅ Export Complete!".bold().green());
    println!("   Excel file: {}\n", output.display());

    Ok(())
}

/// Execute the list command
pub fn list(config: &StockConfig, filter: RecordFilter) -> StockResult<()> {
    let inventory = open_inventory(config)?;
    let records = inventory.filtered(&filter);

    println!(
        "{}",
        format!("📋 Inventory - {} garment(s) found", records.len())
            .bold()
            .green()
    );
    for record in &records {
        print_record(record);
    }
    println!();

    Ok(())
}

/// Execute the add command
pub fn add(config: &StockConfig, draft: NewRecord) -> StockResult<()> {
    let mut inventory = open_inventory(config)?;
    let record = inventory.add(draft)?;

    println!("{}", "✅ Garment added".bold().green());
    print_record(&record);
    println!();

    Ok(())
}

/// Execute the adjust command
pub fn adjust(config: &StockConfig, id: String, delta: i64) -> StockResult<()> {
    let mut inventory = open_inventory(config)?;
    let record = inventory.adjust_stock(&id, delta)?;

    println!("{}", "✅ Stock updated".bold().green());
    print_record(&record);
    println!();

    Ok(())
}

/// Execute the delete command
pub fn delete(config: &StockConfig, id: String) -> StockResult<()> {
    let mut inventory = open_inventory(config)?;
    let name = inventory
        .get(&id)
        .map(|r| r.name.clone())
        .unwrap_or_default();
    inventory.delete(&id)?;

    println!("{} {}", "🗑️  Deleted".bold().green(), name);
    println!();

    Ok(())
}

/// Execute the report command
pub fn report(config: &StockConfig) -> StockResult<()> {
    let inventory = open_inventory(config)?;
    let records = inventory.records();
    let summary = StockSummary::from_records(records);

    println!("{}", "📊 TailorStock - Stock Report".bold().green());
    println!("   Garments:   {}", summary.record_count);
    println!("   Units:      {}", summary.total_units.to_string().bold());
    println!("   Value:      {}", format_amount(summary.total_value).bold());
    println!("   Avg price:  {}", format_amount(summary.average_price));
    println!("   Categories: {}\n", summary.category_count);

    println!("{}", "🏷️  By category".bold().cyan());
    for row in category_breakdown(records) {
        println!(
            "   {:<20} {:>6} units  {:>14}",
            row.name,
            row.units,
            format_amount(row.value)
        );
    }
    println!();

    println!("{}", "⭐ Top brands".bold().cyan());
    for row in top_brands(records, TOP_BRANDS) {
        println!("   {:<20} {:>14}", row.name, format_amount(row.value));
    }
    println!();

    Ok(())
}

/// Execute the alerts command
pub fn alerts(config: &StockConfig, threshold: Option<u32>) -> StockResult<()> {
    let inventory = open_inventory(config)?;
    let threshold = threshold.unwrap_or(config.low_stock_threshold);
    let report = LowStockReport::from_records(inventory.records(), threshold);

    println!("{}", "🚨 TailorStock - Stock Alerts".bold().green());
    println!("   Below threshold ({}): {}", threshold, report.alerts.len());
    println!("   Out of stock: {}\n", report.out_of_stock.to_string().red());

    if report.alerts.is_empty() {
        println!("{}", "✅ All stock levels are healthy".green());
    }
    for record in &report.alerts {
        print_record(record);
        println!("      missing: {} units", report.shortfall(record));
    }
    println!();

    Ok(())
}

/// Execute the options command
pub fn options(config: &StockConfig) -> StockResult<()> {
    let inventory = open_inventory(config)?;
    let options = inventory.options();

    println!("{}", "🧭 Values in use".bold().green());
    println!("   {}: {}", "Categories".cyan(), options.categories.join(", "));
    println!("   {}: {}", "Brands".cyan(), options.brands.join(", "));
    println!("   {}: {}", "Colors".cyan(), options.colors.join(", "));
    println!("   {}: {}", "Sizes".cyan(), options.sizes.join(", "));
    println!();

    Ok(())
}
