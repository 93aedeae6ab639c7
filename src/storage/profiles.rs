//! Profile (user account) persistence.

use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::storage::models::{Profile, Role};

/// Column values for a new profile row. Password material arrives already
/// digested; this module never sees a plaintext password.
pub struct NewProfile<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub full_name: &'a str,
    pub password_digest: &'a str,
    pub password_salt: &'a str,
    pub role: Role,
    pub approved: bool,
    pub created_at_ms: i64,
}

fn row_to_profile(row: &sqlx::sqlite::SqliteRow) -> Result<Profile, DatabaseError> {
    let role_str: String = row.get("role");
    let role = Role::parse(&role_str).ok_or(DatabaseError::UnexpectedValue {
        column: "role",
        value: role_str,
    })?;
    Ok(Profile {
        id: row.get("id"),
        email: row.get("email"),
        full_name: row.get("full_name"),
        role,
        approved: row.get("approved"),
        created_at_ms: row.get("created_at_ms"),
    })
}

/// Inserts a new profile row.
pub async fn insert_profile(
    pool: &SqlitePool,
    profile: &NewProfile<'_>,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO profiles (id, email, full_name, password_digest, password_salt, role, approved, created_at_ms)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(profile.id)
    .bind(profile.email)
    .bind(profile.full_name)
    .bind(profile.password_digest)
    .bind(profile.password_salt)
    .bind(profile.role.as_str())
    .bind(profile.approved)
    .bind(profile.created_at_ms)
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;
    Ok(())
}

/// Fetches a profile by id.
pub async fn get_profile(pool: &SqlitePool, id: &str) -> Result<Option<Profile>, DatabaseError> {
    let row = sqlx::query("SELECT * FROM profiles WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    row.as_ref().map(row_to_profile).transpose()
}

/// Fetches a profile by email (emails are unique).
pub async fn get_profile_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Profile>, DatabaseError> {
    let row = sqlx::query("SELECT * FROM profiles WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    row.as_ref().map(row_to_profile).transpose()
}

/// Fetches a profile together with its stored password digest and salt.
/// Used only by the sign-in path.
pub async fn get_credentials_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<(Profile, String, String)>, DatabaseError> {
    let row = sqlx::query("SELECT * FROM profiles WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    match row {
        Some(row) => {
            let profile = row_to_profile(&row)?;
            let digest: String = row.get("password_digest");
            let salt: String = row.get("password_salt");
            Ok(Some((profile, digest, salt)))
        }
        None => Ok(None),
    }
}

/// Lists all profiles, most recent first.
pub async fn list_profiles(pool: &SqlitePool) -> Result<Vec<Profile>, DatabaseError> {
    let rows = sqlx::query("SELECT * FROM profiles ORDER BY created_at_ms DESC")
        .fetch_all(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    rows.iter().map(row_to_profile).collect()
}

/// Lists approved staff accounts (official and above), the audience for
/// new-issue notifications.
pub async fn list_approved_staff(pool: &SqlitePool) -> Result<Vec<Profile>, DatabaseError> {
    let rows = sqlx::query(
        "SELECT * FROM profiles
         WHERE role IN ('official', 'admin', 'super_admin') AND approved = 1
         ORDER BY created_at_ms",
    )
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::SqlError)?;
    rows.iter().map(row_to_profile).collect()
}

/// Changes a profile's role. Returns false when the profile does not exist.
pub async fn update_role(pool: &SqlitePool, id: &str, role: Role) -> Result<bool, DatabaseError> {
    let result = sqlx::query("UPDATE profiles SET role = ? WHERE id = ?")
        .bind(role.as_str())
        .bind(id)
        .execute(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    Ok(result.rows_affected() > 0)
}

/// Sets a profile's approval flag. Returns false when the profile does not exist.
pub async fn set_approved(
    pool: &SqlitePool,
    id: &str,
    approved: bool,
) -> Result<bool, DatabaseError> {
    let result = sqlx::query("UPDATE profiles SET approved = ? WHERE id = ?")
        .bind(approved)
        .bind(id)
        .execute(pool)
        .await
        .map_err(DatabaseError::SqlError)?;
    Ok(result.rows_affected() > 0)
}

/// Total number of accounts.
pub async fn count_profiles(pool: &SqlitePool) -> Result<i64, DatabaseError> {
    sqlx::query_scalar("SELECT COUNT(*) FROM profiles")
        .fetch_one(pool)
        .await
        .map_err(DatabaseError::SqlError)
}
