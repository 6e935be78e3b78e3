//! Application domain model.
//!
//! # Invariants
//! - New applications start as `ApplicationStatus::Pending`.
//! - `Accepted` and `Rejected` are terminal; nothing returns to `Pending`.
//! - At most one application exists per (job, developer) pair.

use super::job::{JobId, JobWithCompany};
use super::profile::{Profile, ProfileId};
use super::{non_blank, require_text, ModelValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ApplicationId = Uuid;

/// Review state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(Self::Pending),
            "Accepted" => Some(Self::Accepted),
            "Rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Allowed transitions: `Pending -> Accepted | Rejected`.
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Accepted) | (Self::Pending, Self::Rejected)
        )
    }
}

/// Canonical application record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub developer_id: ProfileId,
    pub resume_url: String,
    pub cover_letter: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Application {
    /// Builds a pending application after validating the resume link.
    pub fn submit(
        job_id: JobId,
        developer_id: ProfileId,
        resume_url: &str,
        cover_letter: Option<String>,
    ) -> Result<Self, ModelValidationError> {
        require_text("resume_url", resume_url)?;
        Ok(Self {
            id: Uuid::new_v4(),
            job_id,
            developer_id,
            resume_url: resume_url.trim().to_string(),
            cover_letter: non_blank(cover_letter),
            status: ApplicationStatus::Pending,
            created_at: 0,
            updated_at: 0,
        })
    }
}

/// Application joined with the applying developer's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationWithDeveloper {
    pub application: Application,
    pub developer: Profile,
}

/// Application joined with its job listing and company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationWithJob {
    pub application: Application,
    pub job: JobWithCompany,
}
