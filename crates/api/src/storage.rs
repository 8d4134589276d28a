//! Local file storage for uploaded documents.
//!
//! Files are written under `{storage_dir}/documents/` as
//! `{document_id}-{file_name}`, so each document owns its own file.

use std::path::{Path, PathBuf};

use crate::error::AppError;

const DOCUMENTS_DIR: &str = "documents";

/// Write `data` for document `document_id` and return the stored path.
pub async fn save_document(
    storage_dir: &Path,
    document_id: &str,
    file_name: &str,
    data: &[u8],
) -> Result<PathBuf, AppError> {
    let dir = storage_dir.join(DOCUMENTS_DIR);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create storage dir: {e}")))?;

    let path = dir.join(format!("{document_id}-{file_name}"));
    tokio::fs::write(&path, data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write file: {e}")))?;

    Ok(path)
}

/// Read a stored document back.
pub async fn read_document(path: &str) -> Result<Vec<u8>, AppError> {
    tokio::fs::read(path)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to read document {path}: {e}")))
}

/// Remove a stored document. A missing file is not an error.
pub async fn remove_document(path: &str) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path, error = %e, "Failed to remove stored document"),
    }
}
