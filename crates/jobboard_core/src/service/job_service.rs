//! Job listing use-case service.
//!
//! # Responsibility
//! - Public browsing of open listings with search and structured filters.
//! - Employer-only create/update/delete with ownership enforcement.
//!
//! # Invariants
//! - Only `JobStatus::Open` listings are visible through `list_open_jobs`.
//! - A listing is only mutated by the profile recorded as its `employer_id`;
//!   every other caller gets `ServiceError::Authorization` and the row is
//!   unchanged.
//! - New listings reference a company owned by the creating employer.

use crate::access::capability::{require_capability, Capability};
use crate::access::session::Actor;
use crate::model::company::CompanyId;
use crate::model::job::{
    EmploymentType, ExperienceLevel, Job, JobDraft, JobId, JobPatch, JobStatus, JobWithCompany,
};
use crate::repo::{JobBoardStore, JobListQuery};
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};

/// Browse filters for the public job listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilters {
    /// Case-insensitive substring over title, company name and description.
    pub search: Option<String>,
    pub experience_level: Option<ExperienceLevel>,
    pub employment_type: Option<EmploymentType>,
    /// Exact tech-stack entry, e.g. `Rust`.
    pub tech_stack: Option<String>,
}

/// Job listing service facade over a store.
pub struct JobService<S: JobBoardStore> {
    store: S,
}

impl<S: JobBoardStore> JobService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists open jobs, newest first. No authentication required.
    ///
    /// Blank search and tech filters are ignored.
    pub fn list_open_jobs(&self, filters: &JobFilters) -> ServiceResult<Vec<JobWithCompany>> {
        let query = JobListQuery {
            status: Some(JobStatus::Open),
            employer_id: None,
            experience_level: filters.experience_level,
            employment_type: filters.employment_type,
            tech: filters
                .tech_stack
                .as_deref()
                .map(str::trim)
                .filter(|tech| !tech.is_empty())
                .map(str::to_string),
        };
        let needle = filters
            .search
            .as_deref()
            .map(|text| text.trim().to_lowercase())
            .unwrap_or_default();

        let jobs = self
            .store
            .list_jobs(&query)?
            .into_iter()
            .filter(|job| job.matches_search(&needle))
            .collect();
        Ok(jobs)
    }

    /// Gets one listing with its company regardless of status.
    pub fn get_job(&self, job_id: JobId) -> ServiceResult<JobWithCompany> {
        self.store
            .get_job_with_company(job_id)?
            .ok_or(ServiceError::NotFound {
                entity: "job",
                id: job_id,
            })
    }

    /// Posts a new open listing under the employer's company.
    ///
    /// # Errors
    /// - `Authorization` when the actor is not an employer or does not own
    ///   `company_id`.
    /// - `Validation` when required text is blank or the tech stack is empty.
    pub fn create_job(
        &self,
        actor: &Actor,
        company_id: CompanyId,
        draft: &JobDraft,
    ) -> ServiceResult<JobWithCompany> {
        require_capability(actor, Capability::ManageJobs)?;
        let draft = draft.normalized()?;

        let owns_company = self
            .store
            .get_company(company_id)?
            .is_some_and(|company| actor.owns(company.user_id));
        if !owns_company {
            warn!(
                "event=job_create module=service status=denied reason=company_not_owned company_id={company_id}"
            );
            return Err(ServiceError::Authorization(format!(
                "employer has no company {company_id}"
            )));
        }

        let job = Job::from_draft(actor.profile_id, company_id, draft);
        let job_id = self.store.create_job(&job)?;
        info!("event=job_create module=service status=ok job_id={job_id}");
        self.read_back(job_id)
    }

    /// Applies a partial edit, including open/closed status flips.
    pub fn update_job(
        &self,
        job_id: JobId,
        actor: &Actor,
        patch: &JobPatch,
    ) -> ServiceResult<JobWithCompany> {
        let mut job = self.load_owned_job(actor, job_id, "job_update")?;
        patch.apply_to(&mut job)?;
        self.store.update_job(&job)?;
        info!(
            "event=job_update module=service status=ok job_id={job_id} job_status={}",
            job.status.as_str()
        );
        self.read_back(job_id)
    }

    /// Deletes a listing together with its applications and bookmarks.
    pub fn delete_job(&self, job_id: JobId, actor: &Actor) -> ServiceResult<()> {
        self.load_owned_job(actor, job_id, "job_delete")?;
        self.store.delete_job(job_id)?;
        info!("event=job_delete module=service status=ok job_id={job_id}");
        Ok(())
    }

    fn load_owned_job(&self, actor: &Actor, job_id: JobId, event: &str) -> ServiceResult<Job> {
        require_capability(actor, Capability::ManageJobs)?;
        let job = self.store.get_job(job_id)?.ok_or(ServiceError::NotFound {
            entity: "job",
            id: job_id,
        })?;
        if !actor.owns(job.employer_id) {
            warn!("event={event} module=service status=denied reason=not_owner job_id={job_id}");
            return Err(ServiceError::not_owner("job", job_id));
        }
        Ok(job)
    }

    fn read_back(&self, job_id: JobId) -> ServiceResult<JobWithCompany> {
        self.store
            .get_job_with_company(job_id)?
            .ok_or(ServiceError::InvalidState(format!(
                "job {job_id} missing in read-back"
            )))
    }
}
