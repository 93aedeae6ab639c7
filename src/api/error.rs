//! API error type and its HTTP mapping.
//!
//! Every handler returns `Result<_, ApiError>`; the `IntoResponse` impl
//! turns the error into a status code and an `{"error": "..."}` body.
//! Internal failures are logged with their chain and answered with a
//! generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error_handling::{AuthError, DatabaseError, ResolutionError};
use crate::uploads::UploadError;

/// Error returned by API handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or unacceptable request.
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("{0}")]
    Forbidden(String),

    /// Target record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Request conflicts with existing state.
    #[error("{0}")]
    Conflict(String),

    /// Request was understood but failed a domain check.
    #[error("{0}")]
    Unprocessable(String),

    /// Unexpected failure. Details are logged, not returned.
    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(ref e) => {
                log::error!("Internal error serving request: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(e: DatabaseError) -> Self {
        ApiError::Internal(anyhow::Error::new(e))
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidEmail | AuthError::PasswordTooShort(_) => {
                ApiError::BadRequest(e.to_string())
            }
            AuthError::DuplicateEmail => ApiError::Conflict(e.to_string()),
            AuthError::InvalidCredentials
            | AuthError::InvalidSession
            | AuthError::SessionExpired => ApiError::Unauthorized(e.to_string()),
            AuthError::NotApproved => ApiError::Forbidden(e.to_string()),
            AuthError::Database(db) => db.into(),
        }
    }
}

impl From<ResolutionError> for ApiError {
    fn from(e: ResolutionError) -> Self {
        match e {
            ResolutionError::MissingLocation
            | ResolutionError::InvalidLocation
            | ResolutionError::OutsideGeofence { .. } => ApiError::Unprocessable(e.to_string()),
            ResolutionError::Database(db) => db.into(),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::UnsupportedType(_) | UploadError::TooLarge { .. } => {
                ApiError::BadRequest(e.to_string())
            }
            UploadError::Io(io) => ApiError::Internal(anyhow::Error::new(io)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_mapping() {
        assert!(matches!(
            ApiError::from(AuthError::DuplicateEmail),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::InvalidCredentials),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::NotApproved),
            ApiError::Forbidden(_)
        ));
    }

    #[test]
    fn test_geofence_rejection_maps_to_unprocessable() {
        let err = ResolutionError::OutsideGeofence {
            distance_meters: 80.0,
            formatted_distance: "80m".into(),
            tier: crate::geo::AccuracyTier::Poor,
            threshold_meters: 50.0,
        };
        match ApiError::from(err) {
            ApiError::Unprocessable(msg) => assert!(msg.contains("80m")),
            other => panic!("expected Unprocessable, got {:?}", other),
        }
    }
}
