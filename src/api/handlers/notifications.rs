//! Notification handlers.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde_json::json;

use crate::api::error::ApiError;
use crate::api::types::{AppState, NotificationQuery};
use crate::realtime::{ChangeOp, ChangeTable};
use crate::storage::models::Notification;
use crate::storage::notifications;

/// `GET /api/notifications`
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<NotificationQuery>,
) -> Result<Json<Vec<Notification>>, ApiError> {
    let caller = super::require_user(&state, &headers).await?;
    let list = notifications::list_notifications(
        &state.pool,
        &caller.id,
        query.unread.unwrap_or(false),
    )
    .await
    .map_err(|e| state.db_error(e))?;
    Ok(Json(list))
}

/// `POST /api/notifications/{id}/read`
pub async fn mark_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let caller = super::require_user(&state, &headers).await?;
    let updated = notifications::mark_read(&state.pool, &id, &caller.id)
        .await
        .map_err(|e| state.db_error(e))?;
    if !updated {
        return Err(ApiError::NotFound(format!(
            "No notification with id {}",
            id
        )));
    }
    state.publish(ChangeTable::Notifications, ChangeOp::Update, &id);
    Ok(Json(json!({ "read": true })))
}

/// `POST /api/notifications/read-all`
pub async fn mark_all_read(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let caller = super::require_user(&state, &headers).await?;
    let updated = notifications::mark_all_read(&state.pool, &caller.id)
        .await
        .map_err(|e| state.db_error(e))?;
    if updated > 0 {
        state.publish(ChangeTable::Notifications, ChangeOp::Update, &caller.id);
    }
    Ok(Json(json!({ "updated": updated })))
}

/// `GET /api/notifications/unread-count`
pub async fn unread_count(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, ApiError> {
    let caller = super::require_user(&state, &headers).await?;
    let count = notifications::unread_count(&state.pool, &caller.id)
        .await
        .map_err(|e| state.db_error(e))?;
    Ok(Json(json!({ "unread": count })))
}
