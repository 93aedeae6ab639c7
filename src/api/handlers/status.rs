//! JSON status handler.

use axum::{extract::State, Json};

use crate::api::error::ApiError;
use crate::api::types::{AppState, ErrorCounts, InfoCounts, ServiceStatus, WarningCounts};
use crate::app::statistics::status_counts;
use crate::error_handling::{ErrorType, InfoType, WarningType};
use crate::storage::profiles::count_profiles;

/// `GET /api/status`: JSON service status with counters.
pub async fn status_handler(
    State(state): State<AppState>,
) -> Result<Json<ServiceStatus>, ApiError> {
    let issues = status_counts(&state.pool)
        .await
        .map_err(|e| state.db_error(e))?;
    let profiles = count_profiles(&state.pool)
        .await
        .map_err(|e| state.db_error(e))?;

    let stats = &state.stats;
    let response = ServiceStatus {
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        db_path: state.db_path.display().to_string(),
        issues,
        profiles,
        event_subscribers: state.feed.subscriber_count(),
        errors: ErrorCounts {
            total: stats.total_errors(),
            auth_failures: stats.get_error_count(ErrorType::AuthFailure),
            sessions_expired: stats.get_error_count(ErrorType::SessionExpired),
            invalid_coordinates: stats.get_error_count(ErrorType::InvalidCoordinates),
            resolutions_rejected: stats.get_error_count(ErrorType::ResolutionRejected),
            uploads_rejected: stats.get_error_count(ErrorType::UploadRejected),
            validation_failures: stats.get_error_count(ErrorType::ValidationFailure),
            database_errors: stats.get_error_count(ErrorType::DatabaseError),
        },
        warnings: WarningCounts {
            total: stats.total_warnings(),
            missing_address: stats.get_warning_count(WarningType::MissingAddress),
            missing_response_photo: stats.get_warning_count(WarningType::MissingResponsePhoto),
        },
        info: InfoCounts {
            total: stats.total_info(),
            issues_reported: stats.get_info_count(InfoType::IssueReported),
            status_changes: stats.get_info_count(InfoType::StatusChanged),
            resolutions_verified: stats.get_info_count(InfoType::ResolutionVerified),
            notifications_sent: stats.get_info_count(InfoType::NotificationSent),
            uploads_stored: stats.get_info_count(InfoType::UploadStored),
            events_broadcast: stats.get_info_count(InfoType::EventBroadcast),
        },
    };

    Ok(Json(response))
}

/// `GET /api/healthz`: liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
