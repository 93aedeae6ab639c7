//! Notification persistence.

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error_handling::DatabaseError;
use crate::storage::models::{Notification, NotificationKind};
use crate::utils::now_ms;

fn row_to_notification(row: &sqlx::sqlite::SqliteRow) -> Result<Notification, DatabaseError> {
    let kind_str: String = row.get("kind");
    let kind = NotificationKind::parse(&kind_str).ok_or(DatabaseError::UnexpectedValue {
        column: "kind",
        value: kind_str,
    })?;
    Ok(Notification {
        id: row.get("id"),
        recipient_id: row.get("recipient_id"),
        issue_id: row.get("issue_id"),
        kind,
        body: row.get("body"),
        read: row.get("read"),
        created_at_ms: row.get("created_at_ms"),
    })
}

/// Inserts an unread notification for a recipient.
pub async fn insert_notification(
    pool: &SqlitePool,
    recipient_id: &str,
    issue_id: Option<&str>,
    kind: NotificationKind,
    body: &str,
) -> Result<Notification, DatabaseError> {
    let notification = Notification {
        id: Uuid::new_v4().to_string(),
        recipient_id: recipient_id.to_string(),
        issue_id: issue_id.map(|s| s.to_string()),
        kind,
        body: body.to_string(),
        read: false,
        created_at_ms: now_ms(),
    };

    sqlx::query(
        "INSERT INTO notifications (id, recipient_id, issue_id, kind, body, read, created_at_ms)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&notification.id)
    .bind(&notification.recipient_id)
    .bind(&notification.issue_id)
    .bind(notification.kind.as_str())
    .bind(&notification.body)
    .bind(notification.read)
    .bind(notification.created_at_ms)
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(notification)
}

/// Lists a recipient's notifications, most recent first.
pub async fn list_notifications(
    pool: &SqlitePool,
    recipient_id: &str,
    unread_only: bool,
) -> Result<Vec<Notification>, DatabaseError> {
    let rows = if unread_only {
        sqlx::query(
            "SELECT * FROM notifications WHERE recipient_id = ? AND read = 0
             ORDER BY created_at_ms DESC",
        )
        .bind(recipient_id)
        .fetch_all(pool)
        .await
    } else {
        sqlx::query(
            "SELECT * FROM notifications WHERE recipient_id = ?
             ORDER BY created_at_ms DESC",
        )
        .bind(recipient_id)
        .fetch_all(pool)
        .await
    }
    .map_err(DatabaseError::SqlError)?;
    rows.iter().map(row_to_notification).collect()
}

/// Marks one notification as read. Scoped to the recipient so users cannot
/// touch each other's rows. Returns false when nothing matched.
pub async fn mark_read(
    pool: &SqlitePool,
    id: &str,
    recipient_id: &str,
) -> Result<bool, DatabaseError> {
    let result = sqlx::query(
        "UPDATE notifications SET read = 1 WHERE id = ? AND recipient_id = ?",
    )
    .bind(id)
    .bind(recipient_id)
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;
    Ok(result.rows_affected() > 0)
}

/// Marks all of a recipient's notifications as read, returning the count.
pub async fn mark_all_read(pool: &SqlitePool, recipient_id: &str) -> Result<u64, DatabaseError> {
    let result = sqlx::query(
        "UPDATE notifications SET read = 1 WHERE recipient_id = ? AND read = 0",
    )
    .bind(recipient_id)
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;
    Ok(result.rows_affected())
}

/// Number of unread notifications for a recipient.
pub async fn unread_count(pool: &SqlitePool, recipient_id: &str) -> Result<i64, DatabaseError> {
    sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE recipient_id = ? AND read = 0")
        .bind(recipient_id)
        .fetch_one(pool)
        .await
        .map_err(DatabaseError::SqlError)
}

/// Fans out a new-issue notification to every approved staff account,
/// skipping the reporter if they happen to be staff themselves.
/// Returns the notifications created.
pub async fn notify_staff_new_issue(
    pool: &SqlitePool,
    issue: &crate::storage::models::Issue,
) -> Result<Vec<Notification>, DatabaseError> {
    let staff = crate::storage::profiles::list_approved_staff(pool).await?;
    let body = format!(
        "New {} issue reported: {}",
        issue.category.as_str().replace('_', " "),
        issue.title
    );
    let mut created = Vec::new();
    for member in staff {
        if member.id == issue.reporter_id {
            continue;
        }
        created.push(
            insert_notification(pool, &member.id, Some(&issue.id), NotificationKind::NewIssue, &body)
                .await?,
        );
    }
    Ok(created)
}

/// Notifies an issue's reporter, unless the actor is the reporter.
pub async fn notify_reporter(
    pool: &SqlitePool,
    issue: &crate::storage::models::Issue,
    actor_id: &str,
    kind: NotificationKind,
    body: &str,
) -> Result<Option<Notification>, DatabaseError> {
    if issue.reporter_id == actor_id {
        return Ok(None);
    }
    let notification =
        insert_notification(pool, &issue.reporter_id, Some(&issue.id), kind, body).await?;
    Ok(Some(notification))
}
