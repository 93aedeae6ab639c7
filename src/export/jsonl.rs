//! JSONL export functionality.
//!
//! Exports issues as line-delimited JSON, one nested object per issue with
//! the reporter and the full response thread embedded. Preserves everything
//! the flattened CSV view summarizes away.

use anyhow::{Context, Result};
use serde_json::json;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::storage::init_db_pool_with_path;
use crate::storage::issues::{list_issues, IssueFilter};
use crate::storage::models::{IssueCategory, IssueStatus};
use crate::storage::responses::list_responses;

/// Exports issues to JSONL format.
///
/// Filters mirror [`super::csv::export_csv`]. Returns the number of records
/// exported.
pub async fn export_jsonl(
    db_path: &Path,
    output: Option<&PathBuf>,
    status: Option<IssueStatus>,
    category: Option<IssueCategory>,
    since: Option<i64>,
    reporter: Option<&str>,
) -> Result<usize> {
    let pool = init_db_pool_with_path(db_path)
        .await
        .context("Failed to initialize database pool")?;

    let filter = IssueFilter {
        status,
        category,
        since_ms: since,
        ..Default::default()
    };
    let mut issues = list_issues(&pool, &filter).await?;
    if let Some(reporter) = reporter {
        issues.retain(|i| i.reporter_email == reporter);
    }

    let mut writer: Box<dyn Write> = if let Some(output_path) = output {
        let file = std::fs::File::create(output_path).context(format!(
            "Failed to create output file: {}",
            output_path.display()
        ))?;
        Box::new(file)
    } else {
        Box::new(io::stdout())
    };

    let mut record_count = 0;
    for item in issues {
        let responses = list_responses(&pool, &item.issue.id).await?;
        let record = json!({
            "issue": item.issue,
            "reporter": {
                "full_name": item.reporter_name,
                "email": item.reporter_email,
            },
            "responses": responses,
        });
        serde_json::to_writer(&mut writer, &record)?;
        writeln!(writer)?;
        record_count += 1;
    }

    writer.flush()?;

    Ok(record_count)
}
