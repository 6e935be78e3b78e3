//! Profile domain model.
//!
//! # Invariants
//! - One profile exists per identity account and shares its id.
//! - `role` is fixed at sign-up; patches never carry a role.
//! - `skills` is either `None` or a non-empty, de-duplicated list.

use super::{non_blank, normalize_string_list, require_text, ModelValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier shared by an identity account and its profile.
pub type ProfileId = Uuid;

/// Account role partitioning all downstream behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Developer,
    Employer,
}

impl Role {
    /// Storage spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Developer => "developer",
            Self::Employer => "employer",
        }
    }

    /// Parses the storage spelling.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "developer" => Some(Self::Developer),
            "employer" => Some(Self::Employer),
            _ => None,
        }
    }

    /// Landing page for this role.
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Self::Developer => "/developer/dashboard",
            Self::Employer => "/employer/dashboard",
        }
    }
}

/// Canonical profile record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub portfolio_url: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds.
    pub updated_at: i64,
}

/// Self-service profile edit. Replaces every editable field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub full_name: String,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub portfolio_url: Option<String>,
}

impl ProfilePatch {
    /// Validates and returns the storage-ready form of this patch.
    ///
    /// Blank optional text collapses to `None`; an empty skill list is stored
    /// as `None`.
    pub fn normalized(&self) -> Result<ProfilePatch, ModelValidationError> {
        require_text("full_name", &self.full_name)?;
        Ok(ProfilePatch {
            full_name: self.full_name.trim().to_string(),
            bio: non_blank(self.bio.clone()),
            skills: normalize_string_list(&self.skills),
            portfolio_url: non_blank(self.portfolio_url.clone()),
        })
    }

    /// Skills column value for a normalized patch.
    pub fn stored_skills(&self) -> Option<&[String]> {
        if self.skills.is_empty() {
            None
        } else {
            Some(self.skills.as_slice())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ProfilePatch, Role};
    use crate::model::ModelValidationError;

    #[test]
    fn role_storage_spelling_round_trips() {
        for role in [Role::Developer, Role::Employer] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("Developer"), None);
    }

    #[test]
    fn patch_normalization_collapses_empty_optionals() {
        let patch = ProfilePatch {
            full_name: "  Ada Lovelace ".to_string(),
            bio: Some("   ".to_string()),
            skills: vec!["Rust".to_string(), " rust ".to_string(), "Rust".to_string()],
            portfolio_url: None,
        };
        let normalized = patch.normalized().unwrap();
        assert_eq!(normalized.full_name, "Ada Lovelace");
        assert_eq!(normalized.bio, None);
        assert_eq!(normalized.skills, vec!["Rust", "rust"]);
    }

    #[test]
    fn patch_requires_full_name() {
        let err = ProfilePatch::default().normalized().unwrap_err();
        assert_eq!(err, ModelValidationError::BlankField("full_name"));
    }

    #[test]
    fn empty_skill_list_is_stored_as_none() {
        let normalized = ProfilePatch {
            full_name: "Grace".to_string(),
            ..ProfilePatch::default()
        }
        .normalized()
        .unwrap();
        assert!(normalized.stored_skills().is_none());
    }
}
