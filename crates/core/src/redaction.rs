//! PII categories and deterministic placeholder formatting.
//!
//! The redaction flow asks the model for both a list of findings and a
//! redacted text. The model's text is not trusted to use the right
//! placeholders, so [`enforce_placeholders`] rewrites any finding that
//! survived verbatim.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Category of personally identifiable information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PiiCategory {
    Person,
    Location,
    Organization,
    Contact,
    Id,
    Other,
}

impl PiiCategory {
    pub const ALL: [Self; 6] = [
        Self::Person,
        Self::Location,
        Self::Organization,
        Self::Contact,
        Self::Id,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Location => "LOCATION",
            Self::Organization => "ORGANIZATION",
            Self::Contact => "CONTACT",
            Self::Id => "ID",
            Self::Other => "OTHER",
        }
    }

    /// The placeholder substituted for findings of this category.
    pub fn placeholder(self) -> String {
        format!("[REDACTED_{}]", self.as_str())
    }
}

/// A single piece of PII found in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiiFinding {
    pub finding: String,
    pub category: PiiCategory,
}

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[REDACTED_([A-Z_]+)\]").expect("placeholder pattern is valid")
});

/// Replace every verbatim occurrence of a finding with its category
/// placeholder.
///
/// Longer findings are replaced first so that a finding contained in
/// another (`"Alice"` inside `"Alice Johnson"`) does not split it.
/// Blank findings are ignored.
pub fn enforce_placeholders(text: &str, findings: &[PiiFinding]) -> String {
    let mut ordered: Vec<&PiiFinding> = findings
        .iter()
        .filter(|f| !f.finding.trim().is_empty())
        .collect();
    ordered.sort_by(|a, b| b.finding.len().cmp(&a.finding.len()));

    let mut redacted = text.to_string();
    for finding in ordered {
        if redacted.contains(&finding.finding) {
            redacted = redacted.replace(&finding.finding, &finding.category.placeholder());
        }
    }
    redacted
}

/// Placeholders in `text` that do not name a known category, e.g. a
/// model-invented `[REDACTED_EMAIL]`.
pub fn unknown_placeholders(text: &str) -> Vec<String> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .filter(|caps| !PiiCategory::ALL.iter().any(|c| c.as_str() == &caps[1]))
        .map(|caps| caps[0].to_string())
        .collect()
}

/// Map an unknown placeholder such as `[REDACTED_EMAIL]` to the
/// catch-all `[REDACTED_OTHER]`, keeping the format uniform.
pub fn normalize_unknown_placeholders(text: &str) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            if PiiCategory::ALL.iter().any(|c| c.as_str() == &caps[1]) {
                caps[0].to_string()
            } else {
                PiiCategory::Other.placeholder()
            }
        })
        .into_owned()
}
