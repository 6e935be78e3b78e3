//! Bookmark domain model.
//!
//! A bookmark is a boolean per (job, developer) pair; storage enforces the
//! pair's uniqueness.

use super::job::{JobId, JobWithCompany};
use super::profile::ProfileId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type BookmarkId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: BookmarkId,
    pub job_id: JobId,
    pub developer_id: ProfileId,
    pub created_at: i64,
}

impl Bookmark {
    pub fn new(job_id: JobId, developer_id: ProfileId) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_id,
            developer_id,
            created_at: 0,
        }
    }
}

/// Bookmark joined with its job listing and company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkWithJob {
    pub bookmark: Bookmark,
    pub job: JobWithCompany,
}
