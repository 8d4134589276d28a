pub mod activity;
pub mod documents;
pub mod exports;
pub mod flows;
pub mod jira;
pub mod metrics;
pub mod requirements;
pub mod test_cases;
pub mod workspace;

use docintake_core::document::Document;

use crate::error::{AppError, AppResult};
use crate::storage;

/// Text to feed a flow: explicit `documentText` if given, otherwise the
/// stored bytes of `document` when it is a plain-text format.
pub(crate) async fn resolve_document_text(
    document: Option<&Document>,
    explicit: Option<String>,
) -> AppResult<String> {
    if let Some(text) = explicit.filter(|t| !t.trim().is_empty()) {
        return Ok(text);
    }

    let document = document.ok_or_else(|| {
        AppError::BadRequest("No document selected. Upload or select a document first.".into())
    })?;

    if !document.doc_type.is_plain_text() {
        return Err(AppError::BadRequest(format!(
            "Text cannot be read from {} files. Provide documentText in the request.",
            document.doc_type.as_str().to_uppercase()
        )));
    }

    let bytes = storage::read_document(&document.storage_path).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
