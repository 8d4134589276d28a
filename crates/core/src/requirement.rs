//! Requirements extracted from a document.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Prefix of sequential requirement ids (`REQ-001`).
pub const REQUIREMENT_ID_PREFIX: &str = "REQ";

/// Category assigned to a requirement by the extraction flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RequirementCategory {
    Functional,
    #[serde(rename = "Non-Functional")]
    NonFunctional,
    Compliance,
}

impl RequirementCategory {
    pub const ALL: [Self; 3] = [Self::Functional, Self::NonFunctional, Self::Compliance];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Functional => "Functional",
            Self::NonFunctional => "Non-Functional",
            Self::Compliance => "Compliance",
        }
    }
}

/// A single requirement statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub id: String,
    pub description: String,
    pub category: RequirementCategory,
}

/// Format the sequential id for the requirement at `index` (zero-based).
pub fn requirement_id(index: usize) -> String {
    format!("{REQUIREMENT_ID_PREFIX}-{:03}", index + 1)
}

/// Replace whatever ids the model produced with `REQ-001`, `REQ-002`, ...
/// in list order.
pub fn renumber_requirements(requirements: Vec<Requirement>) -> Vec<Requirement> {
    requirements
        .into_iter()
        .enumerate()
        .map(|(i, req)| Requirement {
            id: requirement_id(i),
            ..req
        })
        .collect()
}

/// Validate an edited requirement list before it replaces the stored one.
///
/// Ids must be non-empty and unique; descriptions must be non-empty.
pub fn validate_requirements(requirements: &[Requirement]) -> Result<(), CoreError> {
    let mut seen = std::collections::HashSet::new();
    for (i, req) in requirements.iter().enumerate() {
        if req.id.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "requirements[{i}].id must not be empty"
            )));
        }
        if req.description.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Requirement {} must have a description",
                req.id
            )));
        }
        if !seen.insert(req.id.as_str()) {
            return Err(CoreError::Conflict(format!(
                "Duplicate requirement id {}",
                req.id
            )));
        }
    }
    Ok(())
}

/// Reviewer edit to one requirement. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequirementUpdate {
    pub description: Option<String>,
    pub category: Option<RequirementCategory>,
}

/// Apply an edit to a requirement. A blank description is rejected.
pub fn apply_requirement_update(
    requirement: &mut Requirement,
    update: RequirementUpdate,
) -> Result<(), CoreError> {
    if let Some(description) = update.description {
        if description.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "Requirement {} must have a description",
                requirement.id
            )));
        }
        requirement.description = description;
    }
    if let Some(category) = update.category {
        requirement.category = category;
    }
    Ok(())
}
