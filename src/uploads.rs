//! Photo evidence storage.
//!
//! The blob-store contract is small: accept a file, hand back a URL. Files
//! land in the configured upload directory under a random name (the original
//! filename is never trusted), and are served back at `/uploads/{filename}`.

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::config::{ALLOWED_PHOTO_TYPES, MAX_UPLOAD_BYTES};

/// Why an upload was refused.
#[derive(Error, Debug)]
pub enum UploadError {
    /// Content type is not an accepted image format.
    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),

    /// File exceeds the configured size cap.
    #[error("File too large: {size} bytes (limit {limit})")]
    TooLarge {
        /// Size of the rejected upload.
        size: usize,
        /// Configured limit.
        limit: usize,
    },

    /// Filesystem failure while writing.
    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

/// A stored upload.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoredPhoto {
    /// Public URL path for the photo.
    pub url: String,
    /// Generated filename on disk.
    pub filename: String,
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/webp" => "webp",
        _ => "bin",
    }
}

/// Validates and writes photo bytes to the upload directory.
pub async fn store_photo(
    upload_dir: &Path,
    content_type: &str,
    bytes: &[u8],
) -> Result<StoredPhoto, UploadError> {
    if !ALLOWED_PHOTO_TYPES.contains(&content_type) {
        return Err(UploadError::UnsupportedType(content_type.to_string()));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            size: bytes.len(),
            limit: MAX_UPLOAD_BYTES,
        });
    }

    let filename = format!("{}.{}", Uuid::new_v4(), extension_for(content_type));
    let path = upload_dir.join(&filename);
    tokio::fs::write(&path, bytes).await?;

    log::debug!("Stored photo {} ({} bytes)", filename, bytes.len());
    Ok(StoredPhoto {
        url: format!("/uploads/{}", filename),
        filename,
    })
}

/// Resolves a stored filename to its on-disk path, refusing traversal.
///
/// Returns `None` for names containing separators or parent components.
pub fn photo_path(upload_dir: &Path, filename: &str) -> Option<PathBuf> {
    if filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
    {
        return None;
    }
    Some(upload_dir.join(filename))
}

/// Content type to serve a stored file under, from its extension.
pub fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_resolve_photo() {
        let dir = tempfile::tempdir().expect("tempdir");
        let stored = store_photo(dir.path(), "image/png", b"fake png bytes")
            .await
            .expect("store should succeed");

        assert!(stored.url.starts_with("/uploads/"));
        assert!(stored.filename.ends_with(".png"));

        let path = photo_path(dir.path(), &stored.filename).expect("path should resolve");
        let bytes = std::fs::read(path).expect("file should exist");
        assert_eq!(bytes, b"fake png bytes");
    }

    #[tokio::test]
    async fn test_rejects_unsupported_type() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = store_photo(dir.path(), "application/pdf", b"%PDF").await;
        assert!(matches!(result, Err(UploadError::UnsupportedType(_))));
    }

    #[tokio::test]
    async fn test_rejects_oversized_upload() {
        let dir = tempfile::tempdir().expect("tempdir");
        let big = vec![0u8; MAX_UPLOAD_BYTES + 1];
        let result = store_photo(dir.path(), "image/jpeg", &big).await;
        assert!(matches!(result, Err(UploadError::TooLarge { .. })));
    }

    #[test]
    fn test_photo_path_refuses_traversal() {
        let dir = Path::new("/tmp/uploads");
        assert!(photo_path(dir, "ok.png").is_some());
        assert!(photo_path(dir, "../etc/passwd").is_none());
        assert!(photo_path(dir, "a/b.png").is_none());
        assert!(photo_path(dir, "").is_none());
    }

    #[test]
    fn test_content_type_for_extension() {
        assert_eq!(content_type_for("x.jpg"), "image/jpeg");
        assert_eq!(content_type_for("x.webp"), "image/webp");
        assert_eq!(content_type_for("x.gif"), "application/octet-stream");
    }
}
