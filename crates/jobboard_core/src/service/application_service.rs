//! Application use-case service.
//!
//! # Responsibility
//! - Developer submissions against open listings.
//! - Employer review of applications to their own listings.
//!
//! # Invariants
//! - One application per (job, developer); repeats fail with `Conflict`.
//! - Applications start `Pending`; a decision is final. Deciding an already
//!   decided application fails with `InvalidState`.
//! - Only the employer owning the parent job may list or decide applications.

use crate::access::capability::{require_capability, Capability};
use crate::access::session::Actor;
use crate::model::application::{
    Application, ApplicationId, ApplicationStatus, ApplicationWithDeveloper,
};
use crate::model::job::{Job, JobId};
use crate::model::ModelValidationError;
use crate::repo::JobBoardStore;
use crate::service::error::{ServiceError, ServiceResult};
use log::{info, warn};

/// Application service facade over a store.
pub struct ApplicationService<S: JobBoardStore> {
    store: S,
}

impl<S: JobBoardStore> ApplicationService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Submits a pending application to an open listing.
    ///
    /// # Errors
    /// - `Validation` when `resume_url` is blank.
    /// - `Authorization` when the actor is not a developer.
    /// - `NotFound` when the job does not exist.
    /// - `InvalidState` when the job is closed.
    /// - `Conflict` when the developer already applied.
    pub fn apply_to_job(
        &self,
        job_id: JobId,
        actor: &Actor,
        resume_url: &str,
        cover_letter: Option<String>,
    ) -> ServiceResult<Application> {
        require_capability(actor, Capability::ApplyToJobs)?;
        let application = Application::submit(job_id, actor.profile_id, resume_url, cover_letter)?;

        let job = self.load_job(job_id)?;
        if !job.is_open() {
            return Err(ServiceError::InvalidState(format!(
                "job {job_id} is closed to applications"
            )));
        }
        if self
            .store
            .find_application(job_id, actor.profile_id)?
            .is_some()
        {
            warn!("event=application_submit module=service status=conflict job_id={job_id}");
            return Err(ServiceError::Conflict(format!(
                "already applied to job {job_id}"
            )));
        }

        let application_id = self.store.create_application(&application)?;
        info!(
            "event=application_submit module=service status=ok job_id={job_id} application_id={application_id}"
        );
        self.store
            .get_application(application_id)?
            .ok_or(ServiceError::InvalidState(format!(
                "application {application_id} missing in read-back"
            )))
    }

    /// Whether the developer already applied to `job_id`.
    pub fn has_applied(&self, job_id: JobId, actor: &Actor) -> ServiceResult<bool> {
        require_capability(actor, Capability::ApplyToJobs)?;
        Ok(self
            .store
            .find_application(job_id, actor.profile_id)?
            .is_some())
    }

    /// Lists applications to one of the employer's jobs, newest first.
    pub fn list_applications_for_job(
        &self,
        job_id: JobId,
        actor: &Actor,
    ) -> ServiceResult<Vec<ApplicationWithDeveloper>> {
        require_capability(actor, Capability::ReviewApplications)?;
        let job = self.load_job(job_id)?;
        if !actor.owns(job.employer_id) {
            warn!(
                "event=application_list module=service status=denied reason=not_owner job_id={job_id}"
            );
            return Err(ServiceError::not_owner("job", job_id));
        }
        Ok(self.store.list_applications_for_job(job_id)?)
    }

    /// Accepts or rejects a pending application.
    ///
    /// # Errors
    /// - `Validation` when `status` is `Pending`.
    /// - `Authorization` unless the parent job belongs to the actor.
    /// - `InvalidState` when the application was already decided.
    pub fn set_application_status(
        &self,
        application_id: ApplicationId,
        actor: &Actor,
        status: ApplicationStatus,
    ) -> ServiceResult<Application> {
        require_capability(actor, Capability::ReviewApplications)?;
        if status == ApplicationStatus::Pending {
            return Err(ServiceError::Validation(
                ModelValidationError::InvalidValue {
                    field: "status",
                    value: status.as_str().to_string(),
                },
            ));
        }

        let application =
            self.store
                .get_application(application_id)?
                .ok_or(ServiceError::NotFound {
                    entity: "application",
                    id: application_id,
                })?;
        let job = self.load_job(application.job_id)?;
        if !actor.owns(job.employer_id) {
            warn!(
                "event=application_decide module=service status=denied reason=not_owner application_id={application_id}"
            );
            return Err(ServiceError::not_owner("job", job.id));
        }

        if !application.status.can_transition_to(status)
            || !self.store.transition_application_status(
                application_id,
                ApplicationStatus::Pending,
                status,
            )?
        {
            return Err(ServiceError::InvalidState(format!(
                "application {application_id} was already decided"
            )));
        }

        info!(
            "event=application_decide module=service status=ok application_id={application_id} decision={}",
            status.as_str()
        );
        self.store
            .get_application(application_id)?
            .ok_or(ServiceError::NotFound {
                entity: "application",
                id: application_id,
            })
    }

    fn load_job(&self, job_id: JobId) -> ServiceResult<Job> {
        self.store.get_job(job_id)?.ok_or(ServiceError::NotFound {
            entity: "job",
            id: job_id,
        })
    }
}
