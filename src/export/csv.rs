//! CSV export functionality.
//!
//! Exports issues to CSV format (simplified, flattened view). One row per
//! issue, with the reporter joined in and the response thread summarized
//! into count/verification columns.

use anyhow::{Context, Result};
use csv::Writer;
use futures::TryStreamExt;
use sqlx::Row;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::storage::init_db_pool_with_path;
use crate::storage::models::{IssueCategory, IssueStatus};

fn format_ms(ms: Option<i64>) -> String {
    ms.and_then(|ms| chrono::DateTime::from_timestamp_millis(ms))
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Exports issues to CSV format.
///
/// # Arguments
///
/// * `db_path` - Path to the SQLite database
/// * `output` - Output file path (or stdout if None)
/// * `status` - Optional filter by issue status
/// * `category` - Optional filter by category
/// * `since` - Optional filter by creation timestamp (milliseconds)
/// * `reporter` - Optional filter by reporter email
///
/// # Returns
///
/// Returns the number of records exported, or an error if export fails.
pub async fn export_csv(
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

    let mut query_builder = sqlx::QueryBuilder::new(
        "SELECT i.id, i.title, i.description, i.category, i.status, i.priority,
                i.latitude, i.longitude, i.address, i.photo_url, i.assigned_to,
                i.created_at_ms, i.updated_at_ms, i.resolved_at_ms,
                p.full_name AS reporter_name, p.email AS reporter_email
         FROM issues i JOIN profiles p ON p.id = i.reporter_id WHERE 1=1",
    );
    if let Some(status) = status {
        query_builder.push(" AND i.status = ");
        query_builder.push_bind(status.as_str());
    }
    if let Some(category) = category {
        query_builder.push(" AND i.category = ");
        query_builder.push_bind(category.as_str());
    }
    if let Some(since) = since {
        query_builder.push(" AND i.created_at_ms >= ");
        query_builder.push_bind(since);
    }
    if let Some(reporter) = reporter {
        query_builder.push(" AND p.email = ");
        query_builder.push_bind(reporter.to_string());
    }
    query_builder.push(" ORDER BY i.created_at_ms DESC");

    // Create CSV writer (trait object to handle both File and Stdout)
    let mut writer: Writer<Box<dyn Write>> = if let Some(output_path) = output {
        let file = std::fs::File::create(output_path).context(format!(
            "Failed to create output file: {}",
            output_path.display()
        ))?;
        Writer::from_writer(Box::new(file) as Box<dyn Write>)
    } else {
        Writer::from_writer(Box::new(io::stdout()) as Box<dyn Write>)
    };

    writer.write_record([
        "id",
        "title",
        "description",
        "category",
        "status",
        "priority",
        "latitude",
        "longitude",
        "address",
        "photo_url",
        "reporter_name",
        "reporter_email",
        "assigned_to",
        "response_count",
        "resolution_distance_m",
        "resolution_tier",
        "location_verified",
        "created_at",
        "updated_at",
        "resolved_at",
    ])?;

    let query = query_builder.build();
    let mut rows = query.fetch(&*pool);

    let mut record_count = 0;

    while let Some(row) = rows.try_next().await? {
        let issue_id: String = row.get("id");
        let title: String = row.get("title");
        let description: String = row.get("description");
        let category: String = row.get("category");
        let status: String = row.get("status");
        let priority: String = row.get("priority");
        let latitude: f64 = row.get("latitude");
        let longitude: f64 = row.get("longitude");
        let address: String = row.get("address");
        let photo_url: Option<String> = row.get("photo_url");
        let assigned_to: Option<String> = row.get("assigned_to");
        let created_at_ms: i64 = row.get("created_at_ms");
        let updated_at_ms: i64 = row.get("updated_at_ms");
        let resolved_at_ms: Option<i64> = row.get("resolved_at_ms");
        let reporter_name: String = row.get("reporter_name");
        let reporter_email: String = row.get("reporter_email");

        let response_count =
            crate::storage::responses::count_responses(&pool, &issue_id).await?;

        // Verification summary from the most recent verified resolution
        let resolution_row = sqlx::query(
            "SELECT distance_meters, accuracy_tier FROM issue_responses
             WHERE issue_id = ? AND response_type = 'resolution' AND location_verified = 1
             ORDER BY created_at_ms DESC LIMIT 1",
        )
        .bind(&issue_id)
        .fetch_optional(&*pool)
        .await?;

        let (resolution_distance, resolution_tier, location_verified) = match resolution_row {
            Some(row) => (
                row.get::<Option<f64>, _>("distance_meters")
                    .map(|d| format!("{:.1}", d))
                    .unwrap_or_default(),
                row.get::<Option<String>, _>("accuracy_tier").unwrap_or_default(),
                "true".to_string(),
            ),
            None => (String::new(), String::new(), "false".to_string()),
        };

        writer.write_record(&[
            issue_id,
            title,
            description,
            category,
            status,
            priority,
            latitude.to_string(),
            longitude.to_string(),
            address,
            photo_url.unwrap_or_default(),
            reporter_name,
            reporter_email,
            assigned_to.unwrap_or_default(),
            response_count.to_string(),
            resolution_distance,
            resolution_tier,
            location_verified,
            format_ms(Some(created_at_ms)),
            format_ms(Some(updated_at_ms)),
            format_ms(resolved_at_ms),
        ])?;

        record_count += 1;
    }

    writer.flush()?;

    Ok(record_count)
}
