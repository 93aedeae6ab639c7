//! Export types and options.

use std::path::PathBuf;

use crate::storage::models::{IssueCategory, IssueStatus};

/// Export format options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// CSV format (flattened view, one row per issue, for Excel/Sheets)
    Csv,
    /// JSONL format (nested issue + responses, for programmatic access)
    Jsonl,
}

/// Options for exporting issue data.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    /// Database path
    pub db_path: PathBuf,
    /// Output file path (or stdout if None)
    pub output: Option<PathBuf>,
    /// Export format
    pub format: ExportFormat,
    /// Filter by issue status (optional)
    pub status: Option<IssueStatus>,
    /// Filter by category (optional)
    pub category: Option<IssueCategory>,
    /// Filter by creation timestamp (records at or after, in milliseconds)
    pub since: Option<i64>,
    /// Filter by reporter email (optional)
    pub reporter: Option<String>,
}
