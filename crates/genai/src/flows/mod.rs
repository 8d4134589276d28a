//! Concrete flows.

pub mod document_qa;
pub mod extract_requirements;
pub mod generate_test_cases;
pub mod redact_pii;

/// Largest document text accepted by any flow, in characters.
pub const MAX_DOCUMENT_CHARS: usize = 400_000;

/// Reject blank or oversized document text.
pub(crate) fn check_document_text(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("documentText must not be empty".to_string());
    }
    let chars = text.chars().count();
    if chars > MAX_DOCUMENT_CHARS {
        return Err(format!(
            "documentText has {chars} characters (max {MAX_DOCUMENT_CHARS})"
        ));
    }
    Ok(())
}

/// Schema for a string enum.
pub(crate) fn enum_schema(values: &[&str], description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "STRING",
        "enum": values,
        "description": description,
    })
}

/// Schema for an array of strings.
pub(crate) fn string_array_schema(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "ARRAY",
        "items": { "type": "STRING" },
        "description": description,
    })
}
