//! Dashboard read models for developers and employers.
//!
//! # Invariants
//! - Every list is newest first.
//! - `application_count` is computed per job at read time.

use crate::access::capability::{require_capability, Capability};
use crate::access::session::Actor;
use crate::model::application::{ApplicationStatus, ApplicationWithJob};
use crate::model::bookmark::BookmarkWithJob;
use crate::model::job::{Job, JobStatus};
use crate::repo::{JobBoardStore, JobListQuery};
use crate::service::error::ServiceResult;
use serde::Serialize;

/// Developer dashboard: own applications and bookmarks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeveloperDashboard {
    pub applications: Vec<ApplicationWithJob>,
    pub bookmarks: Vec<BookmarkWithJob>,
}

/// Headline numbers for the developer dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeveloperStats {
    pub total_applications: usize,
    pub pending: usize,
    pub accepted: usize,
    pub bookmarks: usize,
}

impl DeveloperStats {
    pub fn from_dashboard(dashboard: &DeveloperDashboard) -> Self {
        let with_status = |status: ApplicationStatus| {
            dashboard
                .applications
                .iter()
                .filter(|item| item.application.status == status)
                .count()
        };
        Self {
            total_applications: dashboard.applications.len(),
            pending: with_status(ApplicationStatus::Pending),
            accepted: with_status(ApplicationStatus::Accepted),
            bookmarks: dashboard.bookmarks.len(),
        }
    }
}

/// Employer listing annotated with its application count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployerJobSummary {
    pub job: Job,
    pub application_count: u64,
}

/// Headline numbers for the employer dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EmployerStats {
    pub total_jobs: usize,
    pub open_jobs: usize,
    pub total_applications: u64,
}

impl EmployerStats {
    pub fn from_summaries(summaries: &[EmployerJobSummary]) -> Self {
        Self {
            total_jobs: summaries.len(),
            open_jobs: summaries
                .iter()
                .filter(|summary| summary.job.status == JobStatus::Open)
                .count(),
            total_applications: summaries
                .iter()
                .map(|summary| summary.application_count)
                .sum(),
        }
    }
}

pub struct DashboardService<S: JobBoardStore> {
    store: S,
}

impl<S: JobBoardStore> DashboardService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Loads the developer's applications and bookmarks.
    ///
    /// The two reads are independent; either failing aborts the whole call.
    pub fn list_dashboard_data(&self, actor: &Actor) -> ServiceResult<DeveloperDashboard> {
        require_capability(actor, Capability::ApplyToJobs)?;
        let applications = self
            .store
            .list_applications_for_developer(actor.profile_id)?;
        let bookmarks = self.store.list_bookmarks_for_developer(actor.profile_id)?;
        Ok(DeveloperDashboard {
            applications,
            bookmarks,
        })
    }

    /// Totals across the developer's applications and bookmarks.
    pub fn developer_stats(&self, actor: &Actor) -> ServiceResult<DeveloperStats> {
        let dashboard = self.list_dashboard_data(actor)?;
        Ok(DeveloperStats::from_dashboard(&dashboard))
    }

    /// Lists the employer's jobs in any status with application counts.
    pub fn list_employer_jobs(&self, actor: &Actor) -> ServiceResult<Vec<EmployerJobSummary>> {
        require_capability(actor, Capability::ManageJobs)?;
        let query = JobListQuery {
            employer_id: Some(actor.profile_id),
            ..JobListQuery::default()
        };

        let mut summaries = Vec::new();
        for listing in self.store.list_jobs(&query)? {
            let application_count = self.store.count_applications_for_job(listing.job.id)?;
            summaries.push(EmployerJobSummary {
                job: listing.job,
                application_count,
            });
        }
        Ok(summaries)
    }

    /// Totals across the employer's jobs.
    pub fn employer_stats(&self, actor: &Actor) -> ServiceResult<EmployerStats> {
        let summaries = self.list_employer_jobs(actor)?;
        Ok(EmployerStats::from_summaries(&summaries))
    }
}
