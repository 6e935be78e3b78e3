//! Profile self-service use-cases.
//!
//! # Invariants
//! - Actors only edit their own profile; role never changes.

use crate::access::capability::{require_capability, Capability};
use crate::access::session::Actor;
use crate::model::profile::{Profile, ProfileId, ProfilePatch};
use crate::repo::JobBoardStore;
use crate::service::error::{ServiceError, ServiceResult};
use log::info;

pub struct ProfileService<S: JobBoardStore> {
    store: S,
}

impl<S: JobBoardStore> ProfileService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn get_profile(&self, profile_id: ProfileId) -> ServiceResult<Profile> {
        self.store
            .get_profile(profile_id)?
            .ok_or(ServiceError::NotFound {
                entity: "profile",
                id: profile_id,
            })
    }

    /// Replaces the actor's editable profile fields.
    pub fn update_profile(&self, actor: &Actor, patch: &ProfilePatch) -> ServiceResult<Profile> {
        require_capability(actor, Capability::EditOwnProfile)?;
        let patch = patch.normalized()?;
        self.store.update_profile(actor.profile_id, &patch)?;
        info!(
            "event=profile_update module=service status=ok profile_id={} skills={}",
            actor.profile_id,
            patch.skills.len()
        );
        self.get_profile(actor.profile_id)
    }
}
