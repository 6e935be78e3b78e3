//! Explicit session values passed into every data-access call.

use crate::model::profile::{Profile, ProfileId, Role};
use serde::{Deserialize, Serialize};

/// Authenticated identity performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    pub profile_id: ProfileId,
    pub role: Role,
}

impl Actor {
    pub fn new(profile_id: ProfileId, role: Role) -> Self {
        Self { profile_id, role }
    }

    /// Whether this actor is the owner recorded on a row.
    pub fn owns(&self, owner_id: ProfileId) -> bool {
        self.profile_id == owner_id
    }
}

/// Signed-in session issued by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token.
    pub token: String,
    pub profile: Profile,
}

impl Session {
    pub fn actor(&self) -> Actor {
        Actor::new(self.profile.id, self.profile.role)
    }
}
