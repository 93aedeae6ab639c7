//! Administration handlers: user management, approvals, analytics, audit log.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::{AppState, ApproveRequest, RoleChangeRequest};
use crate::app::statistics::{admin_analytics, AdminAnalytics};
use crate::realtime::{ChangeOp, ChangeTable};
use crate::storage::admin_log::{list_admin_actions, record_admin_action, AdminAction};
use crate::storage::models::{Profile, Role};
use crate::storage::profiles;

/// `GET /api/admin/users`
pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Profile>>, ApiError> {
    super::require_role(&state, &headers, Role::Admin).await?;
    let users = profiles::list_profiles(&state.pool)
        .await
        .map_err(|e| state.db_error(e))?;
    Ok(Json(users))
}

/// `POST /api/admin/users/{id}/role`
///
/// Admins may grant citizen/official; granting admin or super_admin
/// requires a super_admin caller.
pub async fn set_role(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<RoleChangeRequest>,
) -> Result<Json<Profile>, ApiError> {
    let caller = super::require_role(&state, &headers, Role::Admin).await?;

    if req.role.at_least(Role::Admin) && !caller.role.at_least(Role::SuperAdmin) {
        return Err(ApiError::Forbidden(
            "Granting admin roles requires super_admin".to_string(),
        ));
    }

    let updated = profiles::update_role(&state.pool, &id, req.role)
        .await
        .map_err(|e| state.db_error(e))?;
    if !updated {
        return Err(ApiError::NotFound(format!("No user with id {}", id)));
    }

    record_admin_action(
        &state.pool,
        &caller.id,
        "set_role",
        Some(&id),
        Some(req.role.as_str()),
    )
    .await
    .map_err(|e| state.db_error(e))?;
    state.publish(ChangeTable::Profiles, ChangeOp::Update, &id);

    let profile = profiles::get_profile(&state.pool, &id)
        .await
        .map_err(|e| state.db_error(e))?
        .ok_or_else(|| ApiError::NotFound(format!("No user with id {}", id)))?;
    log::info!(
        "{} set role of {} to {}",
        caller.email,
        profile.email,
        req.role.as_str()
    );
    Ok(Json(profile))
}

/// `POST /api/admin/users/{id}/approve`
pub async fn approve(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(req): Json<ApproveRequest>,
) -> Result<Json<Profile>, ApiError> {
    let caller = super::require_role(&state, &headers, Role::Admin).await?;

    let updated = profiles::set_approved(&state.pool, &id, req.approved)
        .await
        .map_err(|e| state.db_error(e))?;
    if !updated {
        return Err(ApiError::NotFound(format!("No user with id {}", id)));
    }

    record_admin_action(
        &state.pool,
        &caller.id,
        if req.approved { "approve" } else { "revoke" },
        Some(&id),
        None,
    )
    .await
    .map_err(|e| state.db_error(e))?;
    state.publish(ChangeTable::Profiles, ChangeOp::Update, &id);

    let profile = profiles::get_profile(&state.pool, &id)
        .await
        .map_err(|e| state.db_error(e))?
        .ok_or_else(|| ApiError::NotFound(format!("No user with id {}", id)))?;
    Ok(Json(profile))
}

/// `GET /api/admin/analytics`
pub async fn analytics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AdminAnalytics>, ApiError> {
    super::require_role(&state, &headers, Role::Admin).await?;
    let summary = admin_analytics(&state.pool)
        .await
        .map_err(|e| state.db_error(e))?;
    Ok(Json(summary))
}

/// Query parameters for the audit log.
#[derive(Debug, Deserialize)]
pub struct ActionsQuery {
    pub limit: Option<i64>,
}

/// `GET /api/admin/actions`
pub async fn actions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ActionsQuery>,
) -> Result<Json<Vec<AdminAction>>, ApiError> {
    super::require_role(&state, &headers, Role::Admin).await?;
    let limit = query.limit.unwrap_or(100).clamp(1, 1000);
    let actions = list_admin_actions(&state.pool, limit)
        .await
        .map_err(|e| state.db_error(e))?;
    Ok(Json(actions))
}
