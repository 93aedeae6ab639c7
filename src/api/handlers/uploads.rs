//! Photo upload and serving handlers.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::api::error::ApiError;
use crate::api::types::AppState;
use crate::error_handling::{ErrorType, InfoType};
use crate::uploads::{content_type_for, photo_path, store_photo, StoredPhoto};

/// `POST /api/uploads` (multipart, field name `file`)
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<StoredPhoto>, ApiError> {
    super::require_user(&state, &headers).await?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;

        let stored = store_photo(&state.upload_dir, &content_type, &bytes)
            .await
            .map_err(|e| {
                state.stats.increment_error(ErrorType::UploadRejected);
                ApiError::from(e)
            })?;
        state.stats.increment_info(InfoType::UploadStored);
        return Ok(Json(stored));
    }

    state.stats.increment_error(ErrorType::UploadRejected);
    Err(ApiError::BadRequest(
        "Multipart body must contain a 'file' field".to_string(),
    ))
}

/// `GET /uploads/{filename}`: serves stored photo evidence.
pub async fn serve(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let Some(path) = photo_path(&state.upload_dir, &filename) else {
        return Err(ApiError::NotFound("No such file".to_string()));
    };
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(&filename))],
            bytes,
        )
            .into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ApiError::NotFound("No such file".to_string()))
        }
        Err(e) => Err(ApiError::Internal(anyhow::Error::new(e))),
    }
}
