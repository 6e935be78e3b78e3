//! Error taxonomy for the authorization & query rules layer.

use crate::access::capability::CapabilityDenied;
use crate::model::ModelValidationError;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure of one rules-layer operation.
#[derive(Debug)]
pub enum ServiceError {
    /// Missing or blank required field, or empty tech stack.
    Validation(ModelValidationError),
    /// Actor lacks the role or ownership for the operation.
    Authorization(String),
    /// Referenced record is absent.
    NotFound { entity: &'static str, id: Uuid },
    /// Duplicate action, e.g. a second application to the same job.
    Conflict(String),
    /// Status transition or action not allowed in the current state.
    InvalidState(String),
    /// Persistence collaborator failed.
    Collaborator(RepoError),
}

impl ServiceError {
    pub(crate) fn not_owner(entity: &'static str, id: Uuid) -> Self {
        Self::Authorization(format!("{entity} {id} is not owned by the caller"))
    }

    /// Stable short code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Authorization(_) => "authorization",
            Self::NotFound { .. } => "not_found",
            Self::Conflict(_) => "conflict",
            Self::InvalidState(_) => "invalid_state",
            Self::Collaborator(_) => "collaborator",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "validation failed: {err}"),
            Self::Authorization(message) => write!(f, "not authorized: {message}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Conflict(message) => write!(f, "conflict: {message}"),
            Self::InvalidState(message) => write!(f, "invalid state: {message}"),
            Self::Collaborator(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Collaborator(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for ServiceError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<CapabilityDenied> for ServiceError {
    fn from(value: CapabilityDenied) -> Self {
        Self::Authorization(value.to_string())
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::UniqueViolation(message) => Self::Conflict(message),
            other => Self::Collaborator(other),
        }
    }
}
