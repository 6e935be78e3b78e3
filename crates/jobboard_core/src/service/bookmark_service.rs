//! Bookmark use-case service.
//!
//! # Invariants
//! - Bookmark state is a boolean per (job, developer); two consecutive toggles
//!   restore the original state.
//! - Only the owning developer creates or removes their bookmarks.

use crate::access::capability::{require_capability, Capability};
use crate::access::session::Actor;
use crate::model::bookmark::Bookmark;
use crate::model::job::JobId;
use crate::repo::{JobBoardStore, RepoError};
use crate::service::error::{ServiceError, ServiceResult};
use log::debug;
use std::collections::BTreeSet;

pub struct BookmarkService<S: JobBoardStore> {
    store: S,
}

impl<S: JobBoardStore> BookmarkService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Inserts the bookmark when absent, removes it when present.
    ///
    /// Returns the new state: `true` when the job is now bookmarked.
    pub fn toggle_bookmark(&self, job_id: JobId, actor: &Actor) -> ServiceResult<bool> {
        require_capability(actor, Capability::BookmarkJobs)?;

        if self.store.delete_bookmark(job_id, actor.profile_id)? {
            debug!("event=bookmark_toggle module=service status=ok job_id={job_id} bookmarked=false");
            return Ok(false);
        }

        if self.store.get_job(job_id)?.is_none() {
            return Err(ServiceError::NotFound {
                entity: "job",
                id: job_id,
            });
        }

        match self
            .store
            .create_bookmark(&Bookmark::new(job_id, actor.profile_id))
        {
            // A concurrent toggle already inserted the pair.
            Ok(_) | Err(RepoError::UniqueViolation(_)) => {}
            Err(err) => return Err(err.into()),
        }
        debug!("event=bookmark_toggle module=service status=ok job_id={job_id} bookmarked=true");
        Ok(true)
    }

    /// Whether the developer has bookmarked `job_id`.
    pub fn is_bookmarked(&self, job_id: JobId, actor: &Actor) -> ServiceResult<bool> {
        require_capability(actor, Capability::BookmarkJobs)?;
        Ok(self.store.bookmark_exists(job_id, actor.profile_id)?)
    }

    /// Job ids the developer has bookmarked.
    pub fn bookmarked_job_ids(&self, actor: &Actor) -> ServiceResult<BTreeSet<JobId>> {
        require_capability(actor, Capability::BookmarkJobs)?;
        Ok(self
            .store
            .list_bookmarked_job_ids(actor.profile_id)?
            .into_iter()
            .collect())
    }
}
