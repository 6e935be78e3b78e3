//! Company domain model.

use super::profile::ProfileId;
use super::{non_blank, require_text, ModelValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CompanyId = Uuid;

/// Employer-owned company record. At most one per employer profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    /// Owning employer profile.
    pub user_id: ProfileId,
    pub company_name: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create-or-replace input for an employer's company.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyDraft {
    pub company_name: String,
    pub logo_url: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
}

impl CompanyDraft {
    /// Validates and returns the storage-ready form of this draft.
    pub fn normalized(&self) -> Result<CompanyDraft, ModelValidationError> {
        require_text("company_name", &self.company_name)?;
        Ok(CompanyDraft {
            company_name: self.company_name.trim().to_string(),
            logo_url: non_blank(self.logo_url.clone()),
            website: non_blank(self.website.clone()),
            description: non_blank(self.description.clone()),
        })
    }
}
