//! Dashboard statistics and admin analytics.
//!
//! Aggregations the dashboards poll for: issue counts by status for every
//! signed-in user, and a wider analytics set (categories, priorities, user
//! counts, weekly volume, resolution latency) for administrators.

use serde::Serialize;
use sqlx::{Row, SqlitePool};

use crate::config::ANALYTICS_WINDOW_DAYS;
use crate::error_handling::DatabaseError;
use crate::utils::now_ms;

/// Issue counts by status.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusCounts {
    pub total: i64,
    pub reported: i64,
    pub in_progress: i64,
    pub resolved: i64,
    pub rejected: i64,
}

/// One name/count pair in a breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct BucketCount {
    pub name: String,
    pub count: i64,
}

/// Admin analytics summary.
#[derive(Debug, Clone, Serialize)]
pub struct AdminAnalytics {
    pub status: StatusCounts,
    pub by_category: Vec<BucketCount>,
    pub by_priority: Vec<BucketCount>,
    pub user_count: i64,
    pub issues_this_week: i64,
    /// Mean time from report to verified resolution, in milliseconds.
    /// `None` when nothing has been resolved yet.
    pub avg_resolution_ms: Option<f64>,
}

/// Computes issue counts by status with a single grouped query.
pub async fn status_counts(pool: &SqlitePool) -> Result<StatusCounts, DatabaseError> {
    let rows = sqlx::query("SELECT status, COUNT(*) AS n FROM issues GROUP BY status")
        .fetch_all(pool)
        .await
        .map_err(DatabaseError::SqlError)?;

    let mut counts = StatusCounts::default();
    for row in rows {
        let status: String = row.get("status");
        let n: i64 = row.get("n");
        counts.total += n;
        match status.as_str() {
            "reported" => counts.reported = n,
            "in_progress" => counts.in_progress = n,
            "resolved" => counts.resolved = n,
            "rejected" => counts.rejected = n,
            other => log::warn!("Ignoring unknown issue status in stats: {}", other),
        }
    }
    Ok(counts)
}

async fn bucket_counts(
    pool: &SqlitePool,
    column: &str,
) -> Result<Vec<BucketCount>, DatabaseError> {
    // `column` is a compile-time constant at every call site, never user input
    let sql = format!(
        "SELECT {col} AS name, COUNT(*) AS n FROM issues GROUP BY {col} ORDER BY n DESC",
        col = column
    );
    let rows = sqlx::query(&sql)
        .fetch_all(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    Ok(rows
        .iter()
        .map(|row| BucketCount {
            name: row.get("name"),
            count: row.get("n"),
        })
        .collect())
}

/// Computes the full admin analytics summary.
pub async fn admin_analytics(pool: &SqlitePool) -> Result<AdminAnalytics, DatabaseError> {
    let status = status_counts(pool).await?;
    let by_category = bucket_counts(pool, "category").await?;
    let by_priority = bucket_counts(pool, "priority").await?;
    let user_count = crate::storage::profiles::count_profiles(pool).await?;

    let week_ago = now_ms() - ANALYTICS_WINDOW_DAYS * 24 * 60 * 60 * 1000;
    let issues_this_week =
        crate::storage::issues::count_issues_since(pool, week_ago).await?;

    let avg_resolution_ms: Option<f64> = sqlx::query_scalar(
        "SELECT AVG(resolved_at_ms - created_at_ms) FROM issues WHERE resolved_at_ms IS NOT NULL",
    )
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(AdminAnalytics {
        status,
        by_category,
        by_priority,
        user_count,
        issues_this_week,
        avg_resolution_ms,
    })
}
