//! TailorStock API Server module
//!
//! HTTP REST API in front of the inventory: garments, spreadsheet
//! import/export and reports. Run with `tailorstock-server`.

pub mod handlers;
pub mod server;

pub use server::{build_router, run_api_server};
