//! Service initialization.
//!
//! Logger setup and filesystem preparation performed once at startup.

mod logger;

pub use logger::init_logger_with;

use std::path::Path;

use crate::error_handling::InitializationError;

/// Ensures the upload directory exists and is a directory.
pub fn ensure_upload_dir(path: &Path) -> Result<(), InitializationError> {
    if path.exists() && !path.is_dir() {
        return Err(InitializationError::UploadDirError(format!(
            "{} exists but is not a directory",
            path.display()
        )));
    }
    std::fs::create_dir_all(path)
        .map_err(|e| InitializationError::UploadDirError(e.to_string()))?;
    Ok(())
}
