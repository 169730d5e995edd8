//! TailorStock API Server binary
//!
//! HTTP REST API for the garment inventory.

use clap::Parser;
use std::path::PathBuf;
use tailorstock::api::{run_api_server, server::ApiConfig};
use tailorstock::config::{StockConfig, DEFAULT_DATA_FILE};
use tailorstock::inventory::reports::DEFAULT_LOW_STOCK_THRESHOLD;

#[derive(Parser, Debug)]
#[command(name = "tailorstock-server")]
#[command(version)]
#[command(about = "TailorStock API Server - HTTP REST API for garment stock")]
#[command(long_about = r#"
TailorStock API Server - HTTP REST API

Garments:
  - GET    /api/v1/garments            - List (search, category, brand, color, size, model)
  - POST   /api/v1/garments            - Add a garment
  - PUT    /api/v1/garments/:id        - Update a garment
  - DELETE /api/v1/garments/:id        - Delete a garment
  - POST   /api/v1/garments/:id/adjust - Adjust stock ({"delta": -1})
  - GET    /api/v1/options             - Values in use

Spreadsheets:
  - POST /api/v1/import - Import a stock sheet (raw .xlsx/.xls body)
  - GET  /api/v1/export - Download Stock_Export_<date>.xlsx

Reports:
  - GET /api/v1/reports/summary
  - GET /api/v1/reports/alerts?threshold=3

Example usage:
  tailorstock-server                           # Start on localhost:8080
  tailorstock-server --host 0.0.0.0 --port 3000 --data /var/lib/stock.yaml

  curl --data-binary @stock.xlsx http://localhost:8080/api/v1/import
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "TAILORSTOCK_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "TAILORSTOCK_PORT")]
    port: u16,

    /// YAML file holding the inventory
    #[arg(long, env = "TAILORSTOCK_DATA", default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// Numeric size labels of the stock sheet columns, in order (default 30..62)
    #[arg(long, env = "TAILORSTOCK_SIZES", value_delimiter = ',')]
    sizes: Vec<String>,

    /// Stock level below which a garment raises an alert
    #[arg(long, env = "TAILORSTOCK_LOW_STOCK", default_value_t = DEFAULT_LOW_STOCK_THRESHOLD)]
    low_stock: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        stock: StockConfig {
            data_file: args.data,
            size_labels: args.sizes,
            low_stock_threshold: args.low_stock,
        },
    };

    run_api_server(config).await
}
