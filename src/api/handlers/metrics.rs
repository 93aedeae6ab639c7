//! Prometheus metrics handler.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::types::AppState;
use crate::error_handling::{ErrorType, InfoType};

/// `GET /api/metrics`: Prometheus-compatible metrics endpoint.
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    let uptime = state.start_time.elapsed().as_secs_f64();
    let stats = &state.stats;

    let metrics = format!(
        r#"# HELP civic_status_uptime_seconds Time since the service started
# TYPE civic_status_uptime_seconds gauge
civic_status_uptime_seconds {}

# HELP civic_status_issues_reported_total Issues reported since start
# TYPE civic_status_issues_reported_total counter
civic_status_issues_reported_total {}

# HELP civic_status_resolutions_verified_total Location-verified resolutions since start
# TYPE civic_status_resolutions_verified_total counter
civic_status_resolutions_verified_total {}

# HELP civic_status_resolutions_rejected_total Resolution attempts refused by the geofence check
# TYPE civic_status_resolutions_rejected_total counter
civic_status_resolutions_rejected_total {}

# HELP civic_status_notifications_sent_total Notifications written since start
# TYPE civic_status_notifications_sent_total counter
civic_status_notifications_sent_total {}

# HELP civic_status_auth_failures_total Failed authentication attempts since start
# TYPE civic_status_auth_failures_total counter
civic_status_auth_failures_total {}

# HELP civic_status_event_subscribers Current SSE subscriber count
# TYPE civic_status_event_subscribers gauge
civic_status_event_subscribers {}

# HELP civic_status_errors_total Total errors encountered
# TYPE civic_status_errors_total counter
civic_status_errors_total {}

# HELP civic_status_warnings_total Total warnings encountered
# TYPE civic_status_warnings_total counter
civic_status_warnings_total {}

# HELP civic_status_info_total Total info events
# TYPE civic_status_info_total counter
civic_status_info_total {}
"#,
        uptime,
        stats.get_info_count(InfoType::IssueReported),
        stats.get_info_count(InfoType::ResolutionVerified),
        stats.get_error_count(ErrorType::ResolutionRejected),
        stats.get_info_count(InfoType::NotificationSent),
        stats.get_error_count(ErrorType::AuthFailure),
        state.feed.subscriber_count(),
        stats.total_errors(),
        stats.total_warnings(),
        stats.total_info()
    );

    (StatusCode::OK, metrics).into_response()
}
