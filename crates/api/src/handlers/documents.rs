//! Handlers for document upload, listing, status, and selection.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use docintake_core::document::{
    format_size, sanitize_file_name, Document, DocumentStatus, DocumentType,
};
use docintake_core::types::new_entity_id;
use docintake_genai::flows::MAX_DOCUMENT_CHARS;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage;

/// Body of `PATCH /documents/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateDocumentRequest {
    pub status: DocumentStatus,
}

/// GET /api/v1/documents
///
/// All uploaded documents, newest first.
pub async fn list_documents(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let ws = state.workspace.read().await;
    Ok(Json(DataResponse {
        data: ws.documents().to_vec(),
    }))
}

/// GET /api/v1/documents/{id}
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let ws = state.workspace.read().await;
    let document = ws.document(&id)?.clone();
    Ok(Json(DataResponse { data: document }))
}

/// POST /api/v1/documents
///
/// Accepts a multipart form with a required `file` field. The MIME type is
/// checked before anything is written. The new document becomes active.
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut upload: Option<(String, DocumentType, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = sanitize_file_name(field.file_name().unwrap_or_default())?;
        let mime = field.content_type().unwrap_or_default().to_string();
        let doc_type = DocumentType::from_mime(&mime)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some((file_name, doc_type, data.to_vec()));
    }

    let (file_name, doc_type, data) =
        upload.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    if data.len() > state.config.max_upload_bytes {
        return Err(AppError::BadRequest(format!(
            "File exceeds maximum size of {} bytes",
            state.config.max_upload_bytes
        )));
    }

    if doc_type.is_plain_text() {
        let chars = String::from_utf8_lossy(&data).chars().count();
        if chars > MAX_DOCUMENT_CHARS {
            return Err(AppError::BadRequest(format!(
                "Document text exceeds maximum length of {MAX_DOCUMENT_CHARS} characters"
            )));
        }
    }

    let id = new_entity_id();
    let path = storage::save_document(&state.config.storage_dir, &id, &file_name, &data).await?;

    let now = chrono::Utc::now();
    let document = Document {
        id,
        name: file_name,
        doc_type,
        size: format_size(data.len() as u64),
        project_id: state.config.default_project_id.clone(),
        created_at: now,
        modified_at: now,
        status: DocumentStatus::default(),
        storage_path: path.to_string_lossy().into_owned(),
        collaborators: Vec::new(),
    };

    tracing::info!(
        document_id = %document.id,
        name = %document.name,
        doc_type = document.doc_type.as_str(),
        bytes = data.len(),
        "Document uploaded"
    );

    state.workspace.write().await.add_document(document.clone());

    Ok((StatusCode::CREATED, Json(DataResponse { data: document })))
}

/// PATCH /api/v1/documents/{id}
///
/// Update the review status.
pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateDocumentRequest>,
) -> AppResult<impl IntoResponse> {
    let mut ws = state.workspace.write().await;
    let document = ws.update_document_status(&id, input.status)?.clone();
    Ok(Json(DataResponse { data: document }))
}

/// DELETE /api/v1/documents/{id}
///
/// Removes the document and its stored file.
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let removed = state.workspace.write().await.delete_document(&id)?;
    storage::remove_document(&removed.storage_path).await;

    tracing::info!(document_id = %id, "Document deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/documents/{id}/activate
///
/// Make this the active document. Switching clears requirements and test
/// cases; re-selecting the active document changes nothing.
pub async fn activate_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let mut ws = state.workspace.write().await;
    if ws.set_active(&id)? {
        tracing::info!(document_id = %id, "Active document changed");
    }
    Ok(Json(DataResponse { data: ws.summary() }))
}
