//! Audit log of administrative actions.

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error_handling::DatabaseError;
use crate::utils::now_ms;

/// A recorded administrative action.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AdminAction {
    pub id: String,
    pub admin_id: String,
    pub action: String,
    pub target_id: Option<String>,
    pub detail: Option<String>,
    pub created_at_ms: i64,
}

/// Records an administrative action (role change, approval, ...).
pub async fn record_admin_action(
    pool: &SqlitePool,
    admin_id: &str,
    action: &str,
    target_id: Option<&str>,
    detail: Option<&str>,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO admin_actions (id, admin_id, action, target_id, detail, created_at_ms)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(admin_id)
    .bind(action)
    .bind(target_id)
    .bind(detail)
    .bind(now_ms())
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;
    Ok(())
}

/// Lists recorded admin actions, most recent first.
pub async fn list_admin_actions(
    pool: &SqlitePool,
    limit: i64,
) -> Result<Vec<AdminAction>, DatabaseError> {
    let rows = sqlx::query(
        "SELECT * FROM admin_actions ORDER BY created_at_ms DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(rows
        .iter()
        .map(|row| AdminAction {
            id: row.get("id"),
            admin_id: row.get("admin_id"),
            action: row.get("action"),
            target_id: row.get("target_id"),
            detail: row.get("detail"),
            created_at_ms: row.get("created_at_ms"),
        })
        .collect())
}
