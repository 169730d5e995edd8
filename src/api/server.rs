//! TailorStock API Server implementation
//!
//! HTTP REST API server using Axum for the inventory front-end.
//! Provides garment CRUD, stock adjustment, spreadsheet import/export and reports.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::config::StockConfig;
use crate::excel::ColumnLayout;
use crate::inventory::Inventory;
use crate::store::InventoryStore;

/// Largest spreadsheet accepted by the import endpoint
pub const MAX_IMPORT_BYTES: usize = 20 * 1024 * 1024;

/// API Server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub stock: StockConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            stock: StockConfig::default(),
        }
    }
}

/// Inventory backed by whichever store the server was started with
pub type SharedInventory = Inventory<Box<dyn InventoryStore>>;

/// Shared application state
pub struct AppState {
    pub version: String,
    pub layout: ColumnLayout,
    pub low_stock_threshold: u32,
    pub inventory: RwLock<SharedInventory>,
}

impl AppState {
    pub fn new(inventory: SharedInventory, layout: ColumnLayout, low_stock_threshold: u32) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            layout,
            low_stock_threshold,
            inventory: RwLock::new(inventory),
        }
    }
}

/// Build the API router around shared state
pub fn build_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        // Garments
        .route(
            "/api/v1/garments",
            get(handlers::list_garments).post(handlers::create_garment),
        )
        .route(
            "/api/v1/garments/:id",
            put(handlers::update_garment).delete(handlers::delete_garment),
        )
        .route("/api/v1/garments/:id/adjust", post(handlers::adjust_stock))
        .route("/api/v1/options", get(handlers::options))
        // Spreadsheet interchange
        .route(
            "/api/v1/import",
            post(handlers::import_stock).layer(DefaultBodyLimit::max(MAX_IMPORT_BYTES)),
        )
        .route("/api/v1/export", get(handlers::export_stock))
        // Reports
        .route("/api/v1/reports/summary", get(handlers::summary))
        .route("/api/v1/reports/alerts", get(handlers::alerts))
        // State and middleware
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tailorstock=info,tower_http=info".into()),
        )
        .init();

    let layout = config.stock.layout()?;
    let store: Box<dyn InventoryStore> = Box::new(config.stock.open_store()?);
    let inventory = Inventory::load(store)?;
    let state = Arc::new(AppState::new(
        inventory,
        layout,
        config.stock.low_stock_threshold,
    ));

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("📦 TailorStock API Server starting on http://{}", addr);
    info!("   Inventory file: {}", config.stock.data_file.display());
    info!("   Endpoints: /api/v1/garments, /api/v1/import, /api/v1/export, /api/v1/reports/*");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("TailorStock API Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.stock, StockConfig::default());
    }

    #[test]
    fn test_config_address_format() {
        let config = ApiConfig {
            host: "192.168.1.100".to_string(),
            port: 9090,
            ..Default::default()
        };
        let addr_str = format!("{}:{}", config.host, config.port);
        let addr: SocketAddr = addr_str.parse().unwrap();
        assert_eq!(addr.port(), 9090);
    }

    #[test]
    fn test_app_state_version() {
        let store: Box<dyn InventoryStore> = Box::new(MemoryStore::new());
        let state = AppState::new(Inventory::load(store).unwrap(), ColumnLayout::default(), 5);
        assert_eq!(state.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(state.low_stock_threshold, 5);
    }
}
