//! Identity handlers: sign-up, sign-in, sign-out, current user.

use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};

use crate::api::error::ApiError;
use crate::api::types::{AppState, SessionResponse, SignInRequest, SignUpRequest};
use crate::error_handling::ErrorType;
use crate::realtime::{ChangeOp, ChangeTable};
use crate::storage::models::{Profile, Role};

/// `POST /api/auth/sign-up`
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    let role = req.role.unwrap_or(Role::Citizen);
    if role == Role::SuperAdmin {
        state.stats.increment_error(ErrorType::ValidationFailure);
        return Err(ApiError::BadRequest(
            "super_admin accounts cannot be self-registered".to_string(),
        ));
    }

    let profile = crate::auth::sign_up(&state.pool, &req.email, &req.password, &req.full_name, role)
        .await
        .map_err(|e| {
            state.stats.increment_error(ErrorType::ValidationFailure);
            ApiError::from(e)
        })?;

    state.publish(ChangeTable::Profiles, ChangeOp::Insert, &profile.id);
    Ok((StatusCode::CREATED, Json(profile)))
}

/// `POST /api/auth/sign-in`
pub async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let (session, profile) =
        crate::auth::sign_in_with_password(&state.pool, &req.email, &req.password)
            .await
            .map_err(|e| {
                state.stats.increment_error(ErrorType::AuthFailure);
                ApiError::from(e)
            })?;

    Ok(Json(SessionResponse {
        token: session.token,
        expires_at_ms: session.expires_at_ms,
        profile,
    }))
}

/// `POST /api/auth/sign-out`
pub async fn sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let Some(token) = super::bearer_token(&headers) else {
        return Err(ApiError::Unauthorized("Missing bearer token".to_string()));
    };
    crate::auth::sign_out(&state.pool, token)
        .await
        .map_err(ApiError::from)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/auth/me`
pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Profile>, ApiError> {
    let profile = super::require_user(&state, &headers).await?;
    Ok(Json(profile))
}
