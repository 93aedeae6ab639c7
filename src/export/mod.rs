//! Export functionality for issue data.
//!
//! This module provides functions to export data from the SQLite database
//! into different formats: CSV (flattened) and JSONL (nested).

mod csv;
mod jsonl;
mod types;

pub use csv::export_csv;
pub use jsonl::export_jsonl;
pub use types::{ExportFormat, ExportOptions};
