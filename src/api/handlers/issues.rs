//! Issue handlers: reporting, listing, detail, responses, dashboard stats.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::api::error::ApiError;
use crate::api::types::{
    AppState, CreateIssueRequest, IssueDetail, IssueListQuery, RespondRequest, RespondResponse,
};
use crate::app::statistics::{status_counts, StatusCounts};
use crate::config::{MAX_ADDRESS_LENGTH, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};
use crate::error_handling::{ErrorType, InfoType, ResolutionError, WarningType};
use crate::geo::{self, Location};
use crate::realtime::{ChangeOp, ChangeTable};
use crate::resolution::{submit_response, NewResponse};
use crate::storage::models::{Issue, IssuePriority, IssueStatus, NotificationKind, Role};
use crate::storage::notifications::{notify_reporter, notify_staff_new_issue};
use crate::storage::{issues, responses, IssueFilter, IssueWithReporter, NewIssue};
use crate::utils::sanitize::sanitize_and_truncate;

/// `POST /api/issues`
pub async fn create_issue(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateIssueRequest>,
) -> Result<(StatusCode, Json<Issue>), ApiError> {
    let reporter = super::require_user(&state, &headers).await?;

    let title = sanitize_and_truncate(req.title.trim(), MAX_TITLE_LENGTH);
    let description = sanitize_and_truncate(req.description.trim(), MAX_DESCRIPTION_LENGTH);
    if title.is_empty() || description.is_empty() {
        state.stats.increment_error(ErrorType::ValidationFailure);
        return Err(ApiError::BadRequest(
            "Title and description are required".to_string(),
        ));
    }

    let location = Location::new(req.latitude, req.longitude);
    if !geo::is_valid(location) {
        state.stats.increment_error(ErrorType::InvalidCoordinates);
        return Err(ApiError::Unprocessable(
            "Invalid location coordinates received".to_string(),
        ));
    }

    // No reverse geocoding here; absent addresses fall back to raw
    // coordinates the same way the report form did.
    let address = match req.address.as_deref().map(str::trim) {
        Some(a) if !a.is_empty() => sanitize_and_truncate(a, MAX_ADDRESS_LENGTH),
        _ => {
            state.stats.increment_warning(WarningType::MissingAddress);
            format!("{:.6}, {:.6}", location.latitude, location.longitude)
        }
    };

    let issue = issues::insert_issue(
        &state.pool,
        NewIssue {
            title,
            description,
            category: req.category,
            priority: req.priority.unwrap_or(IssuePriority::Medium),
            latitude: location.latitude,
            longitude: location.longitude,
            address,
            photo_url: req.photo_url,
            photo_filename: req.photo_filename,
            reporter_id: reporter.id.clone(),
        },
    )
    .await
    .map_err(|e| state.db_error(e))?;

    state.stats.increment_info(InfoType::IssueReported);
    state.publish(ChangeTable::Issues, ChangeOp::Insert, &issue.id);

    let notified = notify_staff_new_issue(&state.pool, &issue)
        .await
        .map_err(|e| state.db_error(e))?;
    for notification in &notified {
        state.stats.increment_info(InfoType::NotificationSent);
        state.publish(ChangeTable::Notifications, ChangeOp::Insert, &notification.id);
    }

    log::info!(
        "Issue {} reported by {} ({} staff notified)",
        issue.id,
        reporter.email,
        notified.len()
    );
    Ok((StatusCode::CREATED, Json(issue)))
}

/// `GET /api/issues`
pub async fn list_issues(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<IssueListQuery>,
) -> Result<Json<Vec<IssueWithReporter>>, ApiError> {
    let caller = super::require_user(&state, &headers).await?;

    let filter = IssueFilter {
        status: query.status,
        category: query.category,
        priority: query.priority,
        reporter_id: if query.mine.unwrap_or(false) {
            Some(caller.id)
        } else {
            None
        },
        assigned_to: None,
        search: query.search,
        since_ms: query.since_ms,
    };
    let list = issues::list_issues(&state.pool, &filter)
        .await
        .map_err(|e| state.db_error(e))?;
    Ok(Json(list))
}

/// `GET /api/issues/{id}`
pub async fn get_issue(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<IssueDetail>, ApiError> {
    super::require_user(&state, &headers).await?;

    let issue = issues::get_issue(&state.pool, &id)
        .await
        .map_err(|e| state.db_error(e))?
        .ok_or_else(|| ApiError::NotFound(format!("No issue with id {}", id)))?;
    let responses = responses::list_responses(&state.pool, &id)
        .await
        .map_err(|e| state.db_error(e))?;

    Ok(Json(IssueDetail { issue, responses }))
}

/// `GET /api/issues/{id}/responses`
pub async fn list_issue_responses(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Vec<crate::storage::models::IssueResponse>>, ApiError> {
    super::require_user(&state, &headers).await?;
    let list = responses::list_responses(&state.pool, &id)
        .await
        .map_err(|e| state.db_error(e))?;
    Ok(Json(list))
}

/// `POST /api/issues/{id}/responses`
///
/// Officials respond to an issue, optionally moving its status. Resolution
/// claims go through the geofence gate; a failed check records the response
/// as evidence but answers 422 with the measured distance.
pub async fn respond(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<RespondRequest>,
) -> Result<Json<RespondResponse>, ApiError> {
    let responder = super::require_role(&state, &headers, Role::Official).await?;

    let issue = issues::get_issue(&state.pool, &id)
        .await
        .map_err(|e| state.db_error(e))?
        .ok_or_else(|| ApiError::NotFound(format!("No issue with id {}", id)))?;

    if req.message.trim().is_empty() {
        state.stats.increment_error(ErrorType::ValidationFailure);
        return Err(ApiError::BadRequest(
            "A response message is required".to_string(),
        ));
    }

    let location = match (req.latitude, req.longitude) {
        (Some(lat), Some(lon)) => Some(Location::new(lat, lon)),
        (None, None) => None,
        _ => {
            state.stats.increment_error(ErrorType::InvalidCoordinates);
            return Err(ApiError::Unprocessable(
                "Latitude and longitude must be supplied together".to_string(),
            ));
        }
    };

    if req.status == IssueStatus::Resolved && req.photo_url.is_none() {
        state
            .stats
            .increment_warning(WarningType::MissingResponsePhoto);
    }

    let status_changed = req.status != issue.status;
    let outcome = submit_response(
        &state.pool,
        &issue,
        &responder,
        NewResponse {
            message: req.message,
            new_status: req.status,
            photo_url: req.photo_url,
            photo_filename: req.photo_filename,
            location,
        },
    )
    .await
    .map_err(|e| {
        match &e {
            ResolutionError::OutsideGeofence { .. } => {
                state.stats.increment_error(ErrorType::ResolutionRejected);
            }
            ResolutionError::MissingLocation | ResolutionError::InvalidLocation => {
                state.stats.increment_error(ErrorType::InvalidCoordinates);
            }
            ResolutionError::Database(_) => {
                state.stats.increment_error(ErrorType::DatabaseError);
            }
        }
        ApiError::from(e)
    })?;

    if outcome.verification.is_some() {
        state.stats.increment_info(InfoType::ResolutionVerified);
    }
    if status_changed {
        state.stats.increment_info(InfoType::StatusChanged);
    }

    state.publish(
        ChangeTable::IssueResponses,
        ChangeOp::Insert,
        &outcome.response.id,
    );
    state.publish(ChangeTable::Issues, ChangeOp::Update, &outcome.issue.id);

    let kind = if status_changed {
        NotificationKind::StatusChange
    } else {
        NotificationKind::Response
    };
    let body = format!(
        "Update on '{}': status is now {}",
        outcome.issue.title,
        outcome.issue.status.as_str().replace('_', " ")
    );
    if let Some(notification) =
        notify_reporter(&state.pool, &outcome.issue, &responder.id, kind, &body)
            .await
            .map_err(|e| state.db_error(e))?
    {
        state.stats.increment_info(InfoType::NotificationSent);
        state.publish(ChangeTable::Notifications, ChangeOp::Insert, &notification.id);
    }

    Ok(Json(RespondResponse {
        response: outcome.response,
        issue: outcome.issue,
        verification: outcome.verification,
    }))
}

/// `GET /api/stats`: dashboard status counts.
pub async fn dashboard_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<StatusCounts>, ApiError> {
    super::require_user(&state, &headers).await?;
    let counts = status_counts(&state.pool)
        .await
        .map_err(|e| state.db_error(e))?;
    Ok(Json(counts))
}
