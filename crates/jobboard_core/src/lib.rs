//! Core domain logic for the job board.
//! This crate is the single source of truth for ownership and authorization
//! rules; pages only render what it returns.

pub mod access;
pub mod config;
pub mod db;
pub mod identity;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use access::capability::{Capability, CapabilityDenied};
pub use access::routes::{resolve, RouteResolution, RouteTarget};
pub use access::session::{Actor, Session};
pub use config::BoardConfig;
pub use identity::{
    IdentityError, IdentityProvider, IdentityResult, SignUpRequest, SqliteIdentityProvider,
};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status};
pub use model::application::{Application, ApplicationId, ApplicationStatus};
pub use model::bookmark::Bookmark;
pub use model::company::{Company, CompanyDraft, CompanyId};
pub use model::job::{
    EmploymentType, ExperienceLevel, Job, JobDraft, JobId, JobPatch, JobStatus, JobWithCompany,
};
pub use model::profile::{Profile, ProfileId, ProfilePatch, Role};
pub use model::ModelValidationError;
pub use repo::{
    ApplicationRepository, BookmarkRepository, CompanyRepository, JobBoardStore, JobListQuery,
    JobRepository, ProfileRepository, RepoError, RepoResult, SqliteStore,
};
pub use service::application_service::ApplicationService;
pub use service::bookmark_service::BookmarkService;
pub use service::company_service::CompanyService;
pub use service::dashboard_service::{
    DashboardService, DeveloperDashboard, DeveloperStats, EmployerJobSummary, EmployerStats,
};
pub use service::error::{ServiceError, ServiceResult};
pub use service::job_service::{JobFilters, JobService};
pub use service::profile_service::ProfileService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
