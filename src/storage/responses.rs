//! Issue response persistence.

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error_handling::DatabaseError;
use crate::geo::AccuracyTier;
use crate::storage::models::{IssueResponse, ResponseType};
use crate::utils::now_ms;

/// Field values for a new response row. Verification fields are computed by
/// the resolution service before insertion.
pub struct NewResponseRecord {
    pub issue_id: String,
    pub responder_id: String,
    pub response_type: ResponseType,
    pub message: String,
    pub photo_url: Option<String>,
    pub photo_filename: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub distance_meters: Option<f64>,
    pub accuracy_tier: Option<AccuracyTier>,
    pub location_verified: bool,
}

fn row_to_response(row: &sqlx::sqlite::SqliteRow) -> Result<IssueResponse, DatabaseError> {
    let type_str: String = row.get("response_type");
    let response_type = ResponseType::parse(&type_str).ok_or(DatabaseError::UnexpectedValue {
        column: "response_type",
        value: type_str,
    })?;
    let tier: Option<String> = row.get("accuracy_tier");
    let accuracy_tier = match tier {
        Some(t) => Some(AccuracyTier::parse(&t).ok_or(DatabaseError::UnexpectedValue {
            column: "accuracy_tier",
            value: t,
        })?),
        None => None,
    };
    Ok(IssueResponse {
        id: row.get("id"),
        issue_id: row.get("issue_id"),
        responder_id: row.get("responder_id"),
        response_type,
        message: row.get("message"),
        photo_url: row.get("photo_url"),
        photo_filename: row.get("photo_filename"),
        latitude: row.get("latitude"),
        longitude: row.get("longitude"),
        distance_meters: row.get("distance_meters"),
        accuracy_tier,
        location_verified: row.get("location_verified"),
        created_at_ms: row.get("created_at_ms"),
    })
}

/// Inserts a response row and returns the stored record.
pub async fn insert_response(
    pool: &SqlitePool,
    new: NewResponseRecord,
) -> Result<IssueResponse, DatabaseError> {
    let response = IssueResponse {
        id: Uuid::new_v4().to_string(),
        issue_id: new.issue_id,
        responder_id: new.responder_id,
        response_type: new.response_type,
        message: new.message,
        photo_url: new.photo_url,
        photo_filename: new.photo_filename,
        latitude: new.latitude,
        longitude: new.longitude,
        distance_meters: new.distance_meters,
        accuracy_tier: new.accuracy_tier,
        location_verified: new.location_verified,
        created_at_ms: now_ms(),
    };

    sqlx::query(
        "INSERT INTO issue_responses (
            id, issue_id, responder_id, response_type, message,
            photo_url, photo_filename, latitude, longitude,
            distance_meters, accuracy_tier, location_verified, created_at_ms
         ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&response.id)
    .bind(&response.issue_id)
    .bind(&response.responder_id)
    .bind(response.response_type.as_str())
    .bind(&response.message)
    .bind(&response.photo_url)
    .bind(&response.photo_filename)
    .bind(response.latitude)
    .bind(response.longitude)
    .bind(response.distance_meters)
    .bind(response.accuracy_tier.map(|t| t.as_str()))
    .bind(response.location_verified)
    .bind(response.created_at_ms)
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(response)
}

/// Lists responses for an issue, oldest first (conversation order).
pub async fn list_responses(
    pool: &SqlitePool,
    issue_id: &str,
) -> Result<Vec<IssueResponse>, DatabaseError> {
    let rows = sqlx::query(
        "SELECT * FROM issue_responses WHERE issue_id = ? ORDER BY created_at_ms",
    )
    .bind(issue_id)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::SqlError)?;
    rows.iter().map(row_to_response).collect()
}

/// The most recent verified resolution response for an issue, if any.
pub async fn latest_verified_resolution(
    pool: &SqlitePool,
    issue_id: &str,
) -> Result<Option<IssueResponse>, DatabaseError> {
    let row = sqlx::query(
        "SELECT * FROM issue_responses
         WHERE issue_id = ? AND response_type = 'resolution' AND location_verified = 1
         ORDER BY created_at_ms DESC LIMIT 1",
    )
    .bind(issue_id)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::SqlError)?;
    row.as_ref().map(row_to_response).transpose()
}

/// Number of responses recorded against an issue.
pub async fn count_responses(pool: &SqlitePool, issue_id: &str) -> Result<i64, DatabaseError> {
    sqlx::query_scalar("SELECT COUNT(*) FROM issue_responses WHERE issue_id = ?")
        .bind(issue_id)
        .fetch_one(pool)
        .await
        .map_err(DatabaseError::SqlError)
}
