//! Role capability declarations for the authorization gate.

use crate::access::session::Actor;
use crate::model::profile::Role;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Named permission granted by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    ApplyToJobs,
    BookmarkJobs,
    EditOwnProfile,
    ManageCompany,
    ManageJobs,
    ReviewApplications,
}

impl Capability {
    /// Stable id used in logs and error messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ApplyToJobs => "apply_to_jobs",
            Self::BookmarkJobs => "bookmark_jobs",
            Self::EditOwnProfile => "edit_own_profile",
            Self::ManageCompany => "manage_company",
            Self::ManageJobs => "manage_jobs",
            Self::ReviewApplications => "review_applications",
        }
    }

    /// User-facing short description.
    pub fn description(self) -> &'static str {
        match self {
            Self::ApplyToJobs => "Submit applications to open job listings.",
            Self::BookmarkJobs => "Save and unsave job listings.",
            Self::EditOwnProfile => "Edit your own profile details.",
            Self::ManageCompany => "Create and edit your company profile.",
            Self::ManageJobs => "Post, edit, close and delete your job listings.",
            Self::ReviewApplications => "Review and decide applications to your listings.",
        }
    }
}

const DEVELOPER_CAPABILITIES: &[Capability] = &[
    Capability::ApplyToJobs,
    Capability::BookmarkJobs,
    Capability::EditOwnProfile,
];

const EMPLOYER_CAPABILITIES: &[Capability] = &[
    Capability::EditOwnProfile,
    Capability::ManageCompany,
    Capability::ManageJobs,
    Capability::ReviewApplications,
];

impl Role {
    /// Capabilities granted to this role.
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::Developer => DEVELOPER_CAPABILITIES,
            Self::Employer => EMPLOYER_CAPABILITIES,
        }
    }

    pub fn has_capability(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

/// Raised when an actor's role lacks a capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityDenied {
    pub role: Role,
    pub capability: Capability,
}

impl Display for CapabilityDenied {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "role `{}` lacks capability `{}`",
            self.role.as_str(),
            self.capability.as_str()
        )
    }
}

impl Error for CapabilityDenied {}

/// Deny-by-default capability gate.
pub fn require_capability(actor: &Actor, capability: Capability) -> Result<(), CapabilityDenied> {
    if actor.role.has_capability(capability) {
        return Ok(());
    }
    Err(CapabilityDenied {
        role: actor.role,
        capability,
    })
}
