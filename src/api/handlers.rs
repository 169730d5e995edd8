//! API request handlers
//!
//! Handlers for all REST API endpoints. Failures reach the client as a short
//! generic message; the underlying error is only logged.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use super::server::AppState;
use crate::error::StockError;
use crate::excel::{StockExporter, StockImporter};
use crate::inventory::reports::{category_breakdown, top_brands, TOP_BRANDS};
use crate::inventory::{
    BrandValue, CategoryBreakdown, FilterOptions, LowStockReport, RecordFilter, StockSummary,
};
use crate::types::{InventoryRecord, NewRecord};

/// MIME type of .xlsx workbooks
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Map an operation failure to a status and a user-facing message
pub fn error_status(e: &StockError, failure: &str) -> (StatusCode, String) {
    match e {
        StockError::NotFound(_) => (StatusCode::NOT_FOUND, "Garment not found".to_string()),
        StockError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
        StockError::Import(_) | StockError::UnsupportedFile(_) => (
            StatusCode::BAD_REQUEST,
            "The file could not be read as a stock spreadsheet".to_string(),
        ),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, failure.to_string()),
    }
}

fn failure_response(e: StockError, failure: &str) -> Response {
    let (status, message) = error_status(&e, failure);
    if status.is_server_error() {
        error!("{}: {}", failure, e);
    } else {
        warn!("{}: {}", failure, e);
    }
    (status, Json(ApiResponse::<()>::err(message))).into_response()
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

fn endpoint(method: &str, path: &str, description: &str) -> EndpointInfo {
    EndpointInfo {
        path: path.to_string(),
        method: method.to_string(),
        description: description.to_string(),
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "TailorStock API Server".to_string(),
        version: state.version.clone(),
        description: "Garment inventory with spreadsheet import/export".to_string(),
        endpoints: vec![
            endpoint("GET", "/health", "Health check endpoint"),
            endpoint("GET", "/version", "Get server version"),
            endpoint("GET", "/api/v1/garments", "List garments (filterable)"),
            endpoint("POST", "/api/v1/garments", "Add a garment"),
            endpoint("PUT", "/api/v1/garments/:id", "Update a garment"),
            endpoint("DELETE", "/api/v1/garments/:id", "Delete a garment"),
            endpoint("POST", "/api/v1/garments/:id/adjust", "Adjust stock by a delta"),
            endpoint("GET", "/api/v1/options", "Categories, brands, colors, sizes in use"),
            endpoint("POST", "/api/v1/import", "Import a stock spreadsheet"),
            endpoint("GET", "/api/v1/export", "Export garments to a stock spreadsheet"),
            endpoint("GET", "/api/v1/reports/summary", "Stock summary report"),
            endpoint("GET", "/api/v1/reports/alerts", "Low stock alerts"),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: ["garments", "import", "export", "reports"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }))
}

/// GET /api/v1/garments - List garments matching the query filters
pub async fn list_garments(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<RecordFilter>,
) -> impl IntoResponse {
    let inventory = state.inventory.read().await;
    Json(ApiResponse::ok(inventory.filtered(&filter)))
}

/// POST /api/v1/garments - Add a garment
pub async fn create_garment(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<NewRecord>,
) -> Response {
    let mut inventory = state.inventory.write().await;
    match inventory.add(draft) {
        Ok(record) => (StatusCode::CREATED, Json(ApiResponse::ok(record))).into_response(),
        Err(e) => failure_response(e, "Failed to add garment"),
    }
}

/// PUT /api/v1/garments/:id - Replace a garment
pub async fn update_garment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(mut record): Json<InventoryRecord>,
) -> Response {
    record.id = id;
    let mut inventory = state.inventory.write().await;
    match inventory.update(record) {
        Ok(record) => Json(ApiResponse::ok(record)).into_response(),
        Err(e) => failure_response(e, "Failed to update garment"),
    }
}

/// Delete response
#[derive(Serialize, Deserialize, Default)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: String,
}

/// DELETE /api/v1/garments/:id - Delete a garment
pub async fn delete_garment(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let mut inventory = state.inventory.write().await;
    match inventory.delete(&id) {
        Ok(()) => Json(ApiResponse::ok(DeleteResponse { deleted: true, id })).into_response(),
        Err(e) => failure_response(e, "Failed to delete garment"),
    }
}

/// Stock adjustment request
#[derive(Serialize, Deserialize)]
pub struct AdjustRequest {
    pub delta: i64,
}

/// POST /api/v1/garments/:id/adjust - Increment or decrement stock (floored at 0)
pub async fn adjust_stock(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<AdjustRequest>,
) -> Response {
    let mut inventory = state.inventory.write().await;
    match inventory.adjust_stock(&id, req.delta) {
        Ok(record) => Json(ApiResponse::ok(record)).into_response(),
        Err(e) => failure_response(e, "Failed to update stock"),
    }
}

/// GET /api/v1/options - Distinct attribute values for filters and forms
pub async fn options(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let inventory = state.inventory.read().await;
    let options: FilterOptions = inventory.options();
    Json(ApiResponse::ok(options))
}

/// Import response
#[derive(Serialize, Deserialize, Default)]
pub struct ImportResponse {
    pub imported: usize,
    pub message: String,
}

/// POST /api/v1/import - Import a stock spreadsheet sent as the raw request body
pub async fn import_stock(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let importer = StockImporter::with_layout(state.layout.clone());
    let records = match importer.import_bytes(&body) {
        Ok(records) => records,
        Err(e) => return failure_response(e, "Failed to import garments"),
    };

    let mut inventory = state.inventory.write().await;
    match inventory.import(records) {
        Ok(imported) => Json(ApiResponse::ok(ImportResponse {
            imported,
            message: format!("{} garments imported", imported),
        }))
        .into_response(),
        Err(e) => failure_response(e, "Failed to import garments"),
    }
}

/// GET /api/v1/export - Download matching garments as a stock spreadsheet
pub async fn export_stock(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<RecordFilter>,
) -> Response {
    let records = state.inventory.read().await.filtered(&filter);
    let exporter = StockExporter::with_layout(state.layout.clone());

    match exporter.export(&records) {
        Ok(workbook) => (
            [
                (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", workbook.filename),
                ),
            ],
            workbook.bytes,
        )
            .into_response(),
        Err(e) => failure_response(e, "Failed to export garments"),
    }
}

/// Summary report response
#[derive(Serialize)]
pub struct SummaryResponse {
    pub summary: StockSummary,
    pub categories: Vec<CategoryBreakdown>,
    pub top_brands: Vec<BrandValue>,
}

/// GET /api/v1/reports/summary - Units, value, categories and top brands
pub async fn summary(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let inventory = state.inventory.read().await;
    let records = inventory.records();
    Json(ApiResponse::ok(SummaryResponse {
        summary: StockSummary::from_records(records),
        categories: category_breakdown(records),
        top_brands: top_brands(records, TOP_BRANDS),
    }))
}

/// Alerts query
#[derive(Deserialize, Default)]
pub struct AlertsQuery {
    pub threshold: Option<u32>,
}

/// GET /api/v1/reports/alerts - Garments below the low stock threshold
pub async fn alerts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AlertsQuery>,
) -> impl IntoResponse {
    let threshold = query.threshold.unwrap_or(state.low_stock_threshold);
    let inventory = state.inventory.read().await;
    Json(ApiResponse::ok(LowStockReport::from_records(
        inventory.records(),
        threshold,
    )))
}
