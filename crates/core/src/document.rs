//! Uploaded document records and upload validation.
//!
//! Documents are created on upload and deleted on user action. Only a
//! fixed set of MIME types is accepted; anything else is rejected before
//! the file is stored.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_XML: &str = "text/xml";
pub const MIME_TXT: &str = "text/plain";

/// MIME types accepted by the upload endpoint.
pub const ALLOWED_MIME_TYPES: &[&str] = &[MIME_PDF, MIME_DOCX, MIME_XML, MIME_TXT];

/// Maximum length of an uploaded file name.
pub const MAX_FILE_NAME_LENGTH: usize = 255;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// File format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Docx,
    Xml,
    Txt,
}

impl DocumentType {
    /// Map an upload MIME type to a document type.
    ///
    /// Parameters such as `; charset=utf-8` are ignored.
    pub fn from_mime(mime: &str) -> Result<Self, CoreError> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            MIME_PDF => Ok(Self::Pdf),
            MIME_DOCX => Ok(Self::Docx),
            MIME_XML => Ok(Self::Xml),
            MIME_TXT => Ok(Self::Txt),
            _ => Err(CoreError::Validation(format!(
                "Unsupported file type '{mime}'. Select a PDF, DOCX, XML, or TXT file."
            ))),
        }
    }

    /// Whether the raw bytes of this type are readable as document text.
    pub fn is_plain_text(self) -> bool {
        matches!(self, Self::Xml | Self::Txt)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Xml => "xml",
            Self::Txt => "txt",
        }
    }
}

/// Review status of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DocumentStatus {
    #[default]
    Draft,
    #[serde(rename = "In Review")]
    InReview,
    Approved,
}

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// A user collaborating on a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// An uploaded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Human-readable size, e.g. `"1.80 MB"`.
    pub size: String,
    pub project_id: String,
    pub created_at: Timestamp,
    pub modified_at: Timestamp,
    pub status: DocumentStatus,
    pub storage_path: String,
    pub collaborators: Vec<AppUser>,
}

// ---------------------------------------------------------------------------
// Validation / formatting
// ---------------------------------------------------------------------------

/// Format a byte count the way the document list displays it.
pub fn format_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / BYTES_PER_MB)
}

/// Validate an uploaded file name and strip any client-supplied directory
/// components.
pub fn sanitize_file_name(name: &str) -> Result<String, CoreError> {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "." || base == ".." {
        return Err(CoreError::Validation("File name is required".to_string()));
    }
    if base.len() > MAX_FILE_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "File name exceeds maximum length of {MAX_FILE_NAME_LENGTH}"
        )));
    }
    Ok(base.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
