//! Export functionality for fintrack
//!
//! Full-state JSON exports and per-ledger CSV exports.

pub mod csv;
pub mod json;

pub use csv::{export_gold_csv, export_transactions_csv};
pub use json::{FullExport, EXPORT_SCHEMA_VERSION};
