//! Session token persistence.

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::config::SESSION_TTL_DAYS;
use crate::error_handling::DatabaseError;
use crate::storage::models::{Profile, Role};
use crate::utils::now_ms;

/// A newly created session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque bearer token.
    pub token: String,
    /// Owning profile.
    pub profile_id: String,
    /// Expiry timestamp in milliseconds.
    pub expires_at_ms: i64,
}

/// Creates a session row for a profile and returns the token.
pub async fn create_session(
    pool: &SqlitePool,
    profile_id: &str,
) -> Result<Session, DatabaseError> {
    let now = now_ms();
    let session = Session {
        token: Uuid::new_v4().to_string(),
        profile_id: profile_id.to_string(),
        expires_at_ms: now + SESSION_TTL_DAYS * 24 * 60 * 60 * 1000,
    };
    sqlx::query(
        "INSERT INTO sessions (token, profile_id, created_at_ms, expires_at_ms)
         VALUES (?, ?, ?, ?)",
    )
    .bind(&session.token)
    .bind(&session.profile_id)
    .bind(now)
    .bind(session.expires_at_ms)
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;
    Ok(session)
}

/// Deletes a session row. Idempotent.
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<(), DatabaseError> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    Ok(())
}

/// Result of a session lookup.
pub enum SessionLookup {
    /// Token resolved to a live session.
    Valid(Profile),
    /// Token exists but the session has expired (and has been reaped).
    Expired,
    /// Token is unknown.
    Missing,
}

/// Resolves a token to its profile, reaping the row if it has expired.
pub async fn lookup_session(
    pool: &SqlitePool,
    token: &str,
) -> Result<SessionLookup, DatabaseError> {
    let row = sqlx::query(
        "SELECT s.expires_at_ms, p.id, p.email, p.full_name, p.role, p.approved, p.created_at_ms
         FROM sessions s JOIN profiles p ON p.id = s.profile_id
         WHERE s.token = ?",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    let Some(row) = row else {
        return Ok(SessionLookup::Missing);
    };

    let expires_at_ms: i64 = row.get("expires_at_ms");
    if expires_at_ms <= now_ms() {
        delete_session(pool, token).await?;
        return Ok(SessionLookup::Expired);
    }

    let role_str: String = row.get("role");
    let role = Role::parse(&role_str).ok_or(DatabaseError::UnexpectedValue {
        column: "role",
        value: role_str,
    })?;

    Ok(SessionLookup::Valid(Profile {
        id: row.get("id"),
        email: row.get("email"),
        full_name: row.get("full_name"),
        role,
        approved: row.get("approved"),
        created_at_ms: row.get("created_at_ms"),
    }))
}
