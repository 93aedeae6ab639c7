//! API shared state and request/response payloads.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::app::statistics::StatusCounts;
use crate::error_handling::{DatabaseError, ErrorType, InfoType, ProcessingStats};
use crate::realtime::{ChangeFeed, ChangeOp, ChangeTable};
use crate::storage::models::{
    Issue, IssueCategory, IssuePriority, IssueResponse, IssueStatus, Profile, Role,
};

use super::error::ApiError;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<SqlitePool>,
    pub feed: ChangeFeed,
    pub stats: Arc<ProcessingStats>,
    pub start_time: Arc<Instant>,
    pub upload_dir: Arc<PathBuf>,
    pub db_path: Arc<PathBuf>,
}

impl AppState {
    /// Counts and converts a storage failure.
    pub fn db_error(&self, e: DatabaseError) -> ApiError {
        self.stats.increment_error(ErrorType::DatabaseError);
        ApiError::from(e)
    }

    /// Publishes a change event and counts it.
    pub fn publish(&self, table: ChangeTable, op: ChangeOp, id: &str) {
        self.feed.publish(table, op, id);
        self.stats.increment_info(InfoType::EventBroadcast);
    }
}

/// Body for `POST /api/auth/sign-up`.
#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    /// Defaults to citizen. Official/admin sign-ups await approval.
    pub role: Option<Role>,
}

/// Body for `POST /api/auth/sign-in`.
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Response for a successful sign-in.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub expires_at_ms: i64,
    pub profile: Profile,
}

/// Body for `POST /api/issues`.
#[derive(Debug, Deserialize)]
pub struct CreateIssueRequest {
    pub title: String,
    pub description: String,
    pub category: IssueCategory,
    pub priority: Option<IssuePriority>,
    pub latitude: f64,
    pub longitude: f64,
    /// Free-text address; falls back to formatted coordinates when absent.
    pub address: Option<String>,
    pub photo_url: Option<String>,
    pub photo_filename: Option<String>,
}

/// Query parameters for `GET /api/issues`.
#[derive(Debug, Default, Deserialize)]
pub struct IssueListQuery {
    pub status: Option<IssueStatus>,
    pub category: Option<IssueCategory>,
    pub priority: Option<IssuePriority>,
    /// Restrict to issues reported by the caller.
    pub mine: Option<bool>,
    pub search: Option<String>,
    pub since_ms: Option<i64>,
}

/// Body for `POST /api/issues/{id}/responses`.
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub message: String,
    /// Status the issue should move to.
    pub status: IssueStatus,
    pub photo_url: Option<String>,
    pub photo_filename: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// An issue with its response thread.
#[derive(Debug, Serialize)]
pub struct IssueDetail {
    #[serde(flatten)]
    pub issue: Issue,
    pub responses: Vec<IssueResponse>,
}

/// Response for a recorded official response.
#[derive(Debug, Serialize)]
pub struct RespondResponse {
    pub response: IssueResponse,
    pub issue: Issue,
    pub verification: Option<crate::resolution::Verification>,
}

/// Body for `POST /api/admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct RoleChangeRequest {
    pub role: Role,
}

/// Body for `POST /api/admin/users/{id}/approve`.
#[derive(Debug, Deserialize)]
pub struct ApproveRequest {
    pub approved: bool,
}

/// Query parameters for `GET /api/notifications`.
#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
    pub unread: Option<bool>,
}

/// JSON response for `/api/status`.
#[derive(Serialize)]
pub struct ServiceStatus {
    pub uptime_seconds: f64,
    pub db_path: String,
    pub issues: StatusCounts,
    pub profiles: i64,
    pub event_subscribers: usize,
    pub errors: ErrorCounts,
    pub warnings: WarningCounts,
    pub info: InfoCounts,
}

/// Error counter snapshot.
#[derive(Serialize)]
pub struct ErrorCounts {
    pub total: usize,
    pub auth_failures: usize,
    pub sessions_expired: usize,
    pub invalid_coordinates: usize,
    pub resolutions_rejected: usize,
    pub uploads_rejected: usize,
    pub validation_failures: usize,
    pub database_errors: usize,
}

/// Warning counter snapshot.
#[derive(Serialize)]
pub struct WarningCounts {
    pub total: usize,
    pub missing_address: usize,
    pub missing_response_photo: usize,
}

/// Info counter snapshot.
#[derive(Serialize)]
pub struct InfoCounts {
    pub total: usize,
    pub issues_reported: usize,
    pub status_changes: usize,
    pub resolutions_verified: usize,
    pub notifications_sent: usize,
    pub uploads_stored: usize,
    pub events_broadcast: usize,
}
