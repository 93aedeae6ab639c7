//! Issue persistence and filtered listing.

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error_handling::DatabaseError;
use crate::storage::models::{Issue, IssueCategory, IssuePriority, IssueStatus};
use crate::utils::now_ms;

/// Field values for a new issue. Validation and sanitization happen before
/// this struct is built; the storage layer persists what it is given.
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub category: IssueCategory,
    pub priority: IssuePriority,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub photo_url: Option<String>,
    pub photo_filename: Option<String>,
    pub reporter_id: String,
}

/// Filters for listing issues. All fields are optional and combine with AND.
#[derive(Debug, Clone, Default)]
pub struct IssueFilter {
    pub status: Option<IssueStatus>,
    pub category: Option<IssueCategory>,
    pub priority: Option<IssuePriority>,
    pub reporter_id: Option<String>,
    pub assigned_to: Option<String>,
    /// Case-insensitive substring match over title, description, and address.
    pub search: Option<String>,
    /// Only issues created at or after this timestamp.
    pub since_ms: Option<i64>,
}

/// An issue joined with its reporter's display fields.
#[derive(Debug, Clone, serde::Serialize)]
pub struct IssueWithReporter {
    #[serde(flatten)]
    pub issue: Issue,
    pub reporter_name: String,
    pub reporter_email: String,
}

fn row_to_issue(row: &sqlx::sqlite::SqliteRow) -> Result<Issue, DatabaseError> {
    let category_str: String = row.get("category");
    let category = IssueCategory::parse(&category_str).ok_or(DatabaseError::UnexpectedValue {
        column: "category",
        value: category_str,
    })?;
    let status_str: String = row.get("status");
    let status = IssueStatus::parse(&status_str).ok_or(DatabaseError::UnexpectedValue {
        column: "status",
        value: status_str,
    })?;
    let priority_str: String = row.get("priority");
    let priority = IssuePriority::parse(&priority_str).ok_or(DatabaseError::UnexpectedValue {
        column: "priority",
        value: priority_str,
    })?;
    Ok(Issue {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        category,
        status,
        priority,
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        address: row.get("address"),
        photo_url: row.get("photo_url"),
        photo_filename: row.get("photo_filename"),
        reporter_id: row.get("reporter_id"),
        assigned_to: row.get("assigned_to"),
        created_at_ms: row.get("created_at_ms"),
        updated_at_ms: row.get("updated_at_ms"),
        resolved_at_ms: row.get("resolved_at_ms"),
    })
}

/// Inserts a new issue and returns the stored record.
pub async fn insert_issue(pool: &SqlitePool, new: NewIssue) -> Result<Issue, DatabaseError> {
    let now = now_ms();
    let issue = Issue {
        id: Uuid::new_v4().to_string(),
        title: new.title,
        description: new.description,
        category: new.category,
        status: IssueStatus::Reported,
        priority: new.priority,
        latitude: new.latitude,
        longitude: new.longitude,
        address: new.address,
        photo_url: new.photo_url,
        photo_filename: new.photo_filename,
        reporter_id: new.reporter_id,
        assigned_to: None,
        created_at_ms: now,
        updated_at_ms: now,
        resolved_at_ms: None,
    };

    sqlx::query(
        "INSERT INTO issues (
            id, title, description, category, status, priority,
            latitude, longitude, address, photo_url, photo_filename,
            reporter_id, assigned_to, created_at_ms, updated_at_ms, resolved_at_ms
         ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&issue.id)
    .bind(&issue.title)
    .bind(&issue.description)
    .bind(issue.category.as_str())
    .bind(issue.status.as_str())
    .bind(issue.priority.as_str())
    .bind(issue.latitude)
    .bind(issue.longitude)
    .bind(&issue.address)
    .bind(&issue.photo_url)
    .bind(&issue.photo_filename)
    .bind(&issue.reporter_id)
    .bind(&issue.assigned_to)
    .bind(issue.created_at_ms)
    .bind(issue.updated_at_ms)
    .bind(issue.resolved_at_ms)
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(issue)
}

/// Fetches an issue by id.
pub async fn get_issue(pool: &SqlitePool, id: &str) -> Result<Option<Issue>, DatabaseError> {
    let row = sqlx::query("SELECT * FROM issues WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    row.as_ref().map(row_to_issue).transpose()
}

/// Lists issues matching the filter, most recent first, with reporter
/// display fields joined in.
pub async fn list_issues(
    pool: &SqlitePool,
    filter: &IssueFilter,
) -> Result<Vec<IssueWithReporter>, DatabaseError> {
    let mut query_builder = sqlx::QueryBuilder::new(
        "SELECT i.*, p.full_name AS reporter_name, p.email AS reporter_email
         FROM issues i JOIN profiles p ON p.id = i.reporter_id WHERE 1=1",
    );

    if let Some(status) = filter.status {
        query_builder.push(" AND i.status = ");
        query_builder.push_bind(status.as_str());
    }
    if let Some(category) = filter.category {
        query_builder.push(" AND i.category = ");
        query_builder.push_bind(category.as_str());
    }
    if let Some(priority) = filter.priority {
        query_builder.push(" AND i.priority = ");
        query_builder.push_bind(priority.as_str());
    }
    if let Some(ref reporter_id) = filter.reporter_id {
        query_builder.push(" AND i.reporter_id = ");
        query_builder.push_bind(reporter_id.clone());
    }
    if let Some(ref assigned_to) = filter.assigned_to {
        query_builder.push(" AND i.assigned_to = ");
        query_builder.push_bind(assigned_to.clone());
    }
    if let Some(ref search) = filter.search {
        let pattern = format!("%{}%", search.to_lowercase());
        query_builder.push(" AND (LOWER(i.title) LIKE ");
        query_builder.push_bind(pattern.clone());
        query_builder.push(" OR LOWER(i.description) LIKE ");
        query_builder.push_bind(pattern.clone());
        query_builder.push(" OR LOWER(i.address) LIKE ");
        query_builder.push_bind(pattern);
        query_builder.push(")");
    }
    if let Some(since_ms) = filter.since_ms {
        query_builder.push(" AND i.created_at_ms >= ");
        query_builder.push_bind(since_ms);
    }

    query_builder.push(" ORDER BY i.created_at_ms DESC");

    let rows = query_builder
        .build()
        .fetch_all(pool)
        .await
        .map_err(DatabaseError::SqlError)?;

    rows.iter()
        .map(|row| {
            Ok(IssueWithReporter {
                issue: row_to_issue(row)?,
                reporter_name: row.get("reporter_name"),
                reporter_email: row.get("reporter_email"),
            })
        })
        .collect()
}

/// Updates an issue's status, assignment, and timestamps, returning the
/// updated record. `resolved_at_ms` is set only when transitioning to
/// resolved and cleared otherwise.
pub async fn update_issue_status(
    pool: &SqlitePool,
    id: &str,
    status: IssueStatus,
    assigned_to: &str,
) -> Result<Option<Issue>, DatabaseError> {
    let now = now_ms();
    let resolved_at = if status == IssueStatus::Resolved {
        Some(now)
    } else {
        None
    };
    sqlx::query(
        "UPDATE issues SET status = ?, assigned_to = ?, updated_at_ms = ?, resolved_at_ms = ?
         WHERE id = ?",
    )
    .bind(status.as_str())
    .bind(assigned_to)
    .bind(now)
    .bind(resolved_at)
    .bind(id)
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    get_issue(pool, id).await
}

/// Counts issues created at or after `since_ms`.
pub async fn count_issues_since(pool: &SqlitePool, since_ms: i64) -> Result<i64, DatabaseError> {
    sqlx::query_scalar("SELECT COUNT(*) FROM issues WHERE created_at_ms >= ?")
        .bind(since_ms)
        .fetch_one(pool)
        .await
        .map_err(DatabaseError::SqlError)
}
