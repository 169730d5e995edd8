//! CLI command handlers

pub mod commands;

pub use commands::{add, adjust, alerts, delete, export, import, list, options, report};
