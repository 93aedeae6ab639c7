//! API request handlers.

pub mod admin;
pub mod auth;
pub mod events;
pub mod issues;
pub mod metrics;
pub mod notifications;
pub mod status;
pub mod uploads;

use axum::http::HeaderMap;

use crate::api::error::ApiError;
use crate::api::types::AppState;
use crate::error_handling::{AuthError, ErrorType};
use crate::storage::models::{Profile, Role};

/// Extracts the bearer token from the Authorization header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Resolves the caller's session or fails with 401.
pub(crate) async fn require_user(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Profile, ApiError> {
    let Some(token) = bearer_token(headers) else {
        state.stats.increment_error(ErrorType::AuthFailure);
        return Err(ApiError::Unauthorized("Missing bearer token".to_string()));
    };
    match crate::auth::get_user(&state.pool, token).await {
        Ok(profile) => Ok(profile),
        Err(AuthError::SessionExpired) => {
            state.stats.increment_error(ErrorType::SessionExpired);
            Err(AuthError::SessionExpired.into())
        }
        Err(e) => {
            state.stats.increment_error(ErrorType::AuthFailure);
            Err(e.into())
        }
    }
}

/// Resolves the caller and checks their role against a minimum.
pub(crate) async fn require_role(
    state: &AppState,
    headers: &HeaderMap,
    min: Role,
) -> Result<Profile, ApiError> {
    let profile = require_user(state, headers).await?;
    if !profile.role.at_least(min) {
        state.stats.increment_error(ErrorType::AuthFailure);
        return Err(ApiError::Forbidden(format!(
            "This action requires the {} role",
            min.as_str()
        )));
    }
    Ok(profile)
}
