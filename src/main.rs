use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tailorstock::cli;
use tailorstock::config::{StockConfig, DEFAULT_DATA_FILE};
use tailorstock::error::StockResult;
use tailorstock::inventory::reports::DEFAULT_LOW_STOCK_THRESHOLD;
use tailorstock::inventory::RecordFilter;
use tailorstock::types::NewRecord;

#[derive(Parser)]
#[command(name = "tailorstock")]
#[command(about = "Garment stock tracking with spreadsheet import/export")]
#[command(long_about = "TailorStock - garment inventory from the command line

COMMANDS:
  import   - Load a stock sheet (.xlsx/.xls) into the inventory
  export   - Write the inventory back to a stock sheet (.xlsx)
  list     - Search and filter garments
  add      - Add a garment by hand
  adjust   - Increase or decrease the stock of a garment
  delete   - Remove a garment
  report   - Units, value, categories and top brands
  alerts   - Garments running low on stock
  options  - Categories, brands, colors and sizes in use

STOCK SHEET LAYOUT:
  A Marque | B Type | C Article | D Model | E Couleur
  F..AD one column per size (30..62) | AE Prix/u achat | AF Prix total
  Row 2 holds the size labels (F2 = 30); data starts on row 3.

EXAMPLES:
  tailorstock import stock.xlsx
  tailorstock export --category Costumes
  tailorstock adjust 1f0c... -- -2
  tailorstock alerts --threshold 3")]
#[command(version)]
struct Cli {
    /// YAML file holding the inventory
    #[arg(long, global = true, env = "TAILORSTOCK_DATA", default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Numeric size labels of the stock sheet columns, in order (default 30..62)
    #[arg(long, global = true, env = "TAILORSTOCK_SIZES", value_delimiter = ',')]
    sizes: Vec<String>,

    /// Stock level below which a garment raises an alert
    #[arg(long, global = true, env = "TAILORSTOCK_LOW_STOCK", default_value_t = DEFAULT_LOW_STOCK_THRESHOLD)]
    low_stock: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Text searched in name, serial number, brand, model and color
    #[arg(short, long)]
    search: Option<String>,

    #[arg(long)]
    category: Option<String>,

    #[arg(long)]
    brand: Option<String>,

    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    size: Option<String>,

    /// Part of the model name
    #[arg(long)]
    model: Option<String>,
}

impl From<FilterArgs> for RecordFilter {
    fn from(args: FilterArgs) -> Self {
        RecordFilter {
            search: args.search,
            category: args.category,
            size: args.size,
            brand: args.brand,
            color: args.color,
            model: args.model,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Import a stock sheet into the inventory.

The first sheet is read. The row whose column F holds 30 declares the size
columns; every data row (from row 3) yields one garment per size column with
a positive stock. Rows without a brand, or without both type and article,
are skipped. Without a size header row nothing is imported.")]
    /// Import a stock sheet (.xlsx/.xls)
    Import {
        /// Path to the spreadsheet
        input: PathBuf,

        /// Show verbose import steps
        #[arg(short, long)]
        verbose: bool,
    },

    #[command(long_about = "Export garments to a stock sheet.

Size variants of the same product (brand, type, article, model, color, price)
are written on one row, stock spread across the size columns, with unit and
total price in AE/AF.")]
    /// Export garments to .xlsx
    Export {
        /// Output file (default Stock_Export_<date>.xlsx)
        output: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Show verbose export steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// List garments
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Add a garment
    Add {
        #[arg(long)]
        brand: String,

        #[arg(long)]
        category: String,

        #[arg(long)]
        size: String,

        #[arg(long)]
        price: f64,

        #[arg(long, default_value_t = 0)]
        stock: u32,

        /// Article code
        #[arg(long, default_value = "")]
        serial: String,

        #[arg(long, default_value = "")]
        model: String,

        #[arg(long, default_value = "")]
        color: String,

        /// Display name (derived from category, brand and model when omitted)
        #[arg(long, default_value = "")]
        name: String,
    },

    /// Change the stock of a garment by a signed amount (never below zero)
    Adjust {
        id: String,

        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },

    /// Delete a garment
    Delete { id: String },

    /// Show stock report
    Report,

    /// Show low stock alerts
    Alerts {
        /// Override the configured threshold
        #[arg(short, long)]
        threshold: Option<u32>,
    },

    /// Show categories, brands, colors and sizes in use
    Options,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

fn main() -> StockResult<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = StockConfig {
        data_file: cli.data,
        size_labels: cli.sizes,
        low_stock_threshold: cli.low_stock,
    };

    match cli.command {
        Commands::Import { input, verbose } => cli::import(&config, input, verbose),

        Commands::Export {
            output,
            filter,
            verbose,
        } => cli::export(&config, output, filter.into(), verbose),

        Commands::List { filter } => cli::list(&config, filter.into()),

        Commands::Add {
            brand,
            category,
            size,
            price,
            stock,
            serial,
            model,
            color,
            name,
        } => cli::add(
            &config,
            NewRecord {
                serial_number: serial,
                name,
                brand,
                model,
                category,
                color,
                size,
                price,
                current_stock: stock,
            },
        ),

        Commands::Adjust { id, delta } => cli::adjust(&config, id, delta),

        Commands::Delete { id } => cli::delete(&config, id),

        Commands::Report => cli::report(&config),

        Commands::Alerts { threshold } => cli::alerts(&config, threshold),

        Commands::Options => cli::options(&config),
    }
}
