//! Job board domain model.
//!
//! # Responsibility
//! - Define the five canonical records (profile, company, job, application,
//!   bookmark) and their enumerated states.
//! - Provide write-side validation shared by repositories and services.
//!
//! # Invariants
//! - Every record is identified by a stable UUID that is never reused.
//! - Enum values have exactly one storage spelling (`as_str`/`parse`).

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod application;
pub mod bookmark;
pub mod company;
pub mod job;
pub mod profile;

/// Write-side validation failures for model drafts and patches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Required text field is empty after trim.
    BlankField(&'static str),
    /// Job tech stack has no usable entries.
    EmptyTechStack,
    /// Value is well-formed but not accepted for this field.
    InvalidValue { field: &'static str, value: String },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField(field) => write!(f, "field `{field}` must not be blank"),
            Self::EmptyTechStack => write!(f, "tech stack must contain at least one entry"),
            Self::InvalidValue { field, value } => {
                write!(f, "field `{field}` does not accept `{value}`")
            }
        }
    }
}

impl Error for ModelValidationError {}

/// Rejects blank required text.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::BlankField(field));
    }
    Ok(())
}

/// Maps optional free text to `None` when blank.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|text| {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Trims entries, drops blanks and removes duplicates keeping first position.
pub fn normalize_string_list(values: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if trimmed.is_empty() || normalized.iter().any(|existing| existing == trimmed) {
            continue;
        }
        normalized.push(trimmed.to_string());
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::{non_blank, normalize_string_list, require_text, ModelValidationError};

    #[test]
    fn normalize_string_list_trims_and_dedups_in_order() {
        let input = vec![
            " Rust ".to_string(),
            "Go".to_string(),
            "".to_string(),
            "Rust".to_string(),
        ];
        assert_eq!(normalize_string_list(&input), vec!["Rust", "Go"]);
    }

    #[test]
    fn non_blank_drops_whitespace_only_values() {
        assert_eq!(non_blank(Some("   ".to_string())), None);
        assert_eq!(non_blank(Some(" bio ".to_string())).as_deref(), Some("bio"));
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn require_text_names_the_blank_field() {
        let err = require_text("title", " \t").unwrap_err();
        assert_eq!(err, ModelValidationError::BlankField("title"));
    }
}
