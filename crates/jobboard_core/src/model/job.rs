//! Job listing domain model.
//!
//! # Responsibility
//! - Define the job record, its enumerated attributes and the open/closed
//!   status toggle.
//! - Validate drafts and patches before they reach storage.
//!
//! # Invariants
//! - `tech_stack` always holds at least one non-blank, unique entry.
//! - `company_id` references a company owned by `employer_id`.
//! - New jobs start as `JobStatus::Open`.

use super::company::Company;
use super::profile::ProfileId;
use super::{non_blank, normalize_string_list, require_text, ModelValidationError};
use crate::model::company::CompanyId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type JobId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
}

impl ExperienceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Junior => "Junior",
            Self::Mid => "Mid",
            Self::Senior => "Senior",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Junior" => Some(Self::Junior),
            "Mid" => Some(Self::Mid),
            "Senior" => Some(Self::Senior),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-time")]
    FullTime,
    Contract,
    Internship,
}

impl EmploymentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullTime => "Full-time",
            Self::Contract => "Contract",
            Self::Internship => "Internship",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Full-time" => Some(Self::FullTime),
            "Contract" => Some(Self::Contract),
            "Internship" => Some(Self::Internship),
            _ => None,
        }
    }
}

/// Listing visibility. Toggled freely by the owning employer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Open,
    Closed,
}

impl JobStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Open" => Some(Self::Open),
            "Closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// Canonical job listing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub employer_id: ProfileId,
    pub company_id: CompanyId,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub experience_level: ExperienceLevel,
    /// Free text, e.g. `$120k - $150k`.
    pub salary_range: String,
    pub employment_type: EmploymentType,
    pub timezone: Option<String>,
    pub status: JobStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Job {
    /// Builds a new open listing from a normalized draft.
    pub fn from_draft(employer_id: ProfileId, company_id: CompanyId, draft: JobDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            employer_id,
            company_id,
            title: draft.title,
            description: draft.description,
            tech_stack: draft.tech_stack,
            experience_level: draft.experience_level,
            salary_range: draft.salary_range,
            employment_type: draft.employment_type,
            timezone: draft.timezone,
            status: JobStatus::Open,
            created_at: 0,
            updated_at: 0,
        }
    }

    /// Checks the persisted-shape invariants.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("salary_range", &self.salary_range)?;
        if self.tech_stack.iter().all(|tech| tech.trim().is_empty()) {
            return Err(ModelValidationError::EmptyTechStack);
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Open
    }
}

/// Employer input for a new listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub salary_range: String,
    pub employment_type: EmploymentType,
    pub timezone: Option<String>,
}

impl JobDraft {
    /// Validates and returns the storage-ready form of this draft.
    pub fn normalized(&self) -> Result<JobDraft, ModelValidationError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("salary_range", &self.salary_range)?;
        let tech_stack = normalize_string_list(&self.tech_stack);
        if tech_stack.is_empty() {
            return Err(ModelValidationError::EmptyTechStack);
        }

        Ok(JobDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            tech_stack,
            experience_level: self.experience_level,
            salary_range: self.salary_range.trim().to_string(),
            employment_type: self.employment_type,
            timezone: non_blank(self.timezone.clone()),
        })
    }
}

/// Partial listing edit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub experience_level: Option<ExperienceLevel>,
    pub salary_range: Option<String>,
    pub employment_type: Option<EmploymentType>,
    /// `Some(None)` clears the timezone.
    pub timezone: Option<Option<String>>,
    pub status: Option<JobStatus>,
}

impl JobPatch {
    /// Patch that only flips listing status.
    pub fn status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Applies this patch onto `job`, validating every supplied field.
    ///
    /// `job` is left untouched when validation fails.
    pub fn apply_to(&self, job: &mut Job) -> Result<(), ModelValidationError> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description)?;
        }
        if let Some(salary_range) = &self.salary_range {
            require_text("salary_range", salary_range)?;
        }
        let tech_stack = match &self.tech_stack {
            Some(values) => {
                let normalized = normalize_string_list(values);
                if normalized.is_empty() {
                    return Err(ModelValidationError::EmptyTechStack);
                }
                Some(normalized)
            }
            None => None,
        };

        if let Some(title) = &self.title {
            job.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            job.description = description.trim().to_string();
        }
        if let Some(tech_stack) = tech_stack {
            job.tech_stack = tech_stack;
        }
        if let Some(level) = self.experience_level {
            job.experience_level = level;
        }
        if let Some(salary_range) = &self.salary_range {
            job.salary_range = salary_range.trim().to_string();
        }
        if let Some(employment_type) = self.employment_type {
            job.employment_type = employment_type;
        }
        if let Some(timezone) = &self.timezone {
            job.timezone = non_blank(timezone.clone());
        }
        if let Some(status) = self.status {
            job.status = status;
        }
        Ok(())
    }
}

/// Listing joined with its company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobWithCompany {
    pub job: Job,
    pub company: Company,
}

impl JobWithCompany {
    /// Case-insensitive substring match on title, company name and
    /// description. `needle` must already be lowercase.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.job.title.to_lowercase().contains(needle)
            || self.company.company_name.to_lowercase().contains(needle)
            || self.job.description.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::{EmploymentType, ExperienceLevel, Job, JobDraft, JobPatch, JobStatus};
    use crate::model::ModelValidationError;
    use uuid::Uuid;

    fn draft() -> JobDraft {
        JobDraft {
            title: "Backend Engineer".to_string(),
            description: "Build services".to_string(),
            tech_stack: vec!["Go".to_string()],
            experience_level: ExperienceLevel::Mid,
            salary_range: "$100k".to_string(),
            employment_type: EmploymentType::FullTime,
            timezone: Some(" ".to_string()),
        }
    }

    #[test]
    fn draft_rejects_empty_tech_stack() {
        let mut input = draft();
        input.tech_stack = vec!["  ".to_string()];
        assert_eq!(
            input.normalized().unwrap_err(),
            ModelValidationError::EmptyTechStack
        );
    }

    #[test]
    fn new_job_starts_open() {
        let job = Job::from_draft(Uuid::new_v4(), Uuid::new_v4(), draft().normalized().unwrap());
        assert_eq!(job.status, JobStatus::Open);
        assert_eq!(job.timezone, None);
        job.validate().unwrap();
    }

    #[test]
    fn failed_patch_leaves_job_unchanged() {
        let mut job =
            Job::from_draft(Uuid::new_v4(), Uuid::new_v4(), draft().normalized().unwrap());
        let before = job.clone();
        let patch = JobPatch {
            title: Some("New title".to_string()),
            tech_stack: Some(Vec::new()),
            ..JobPatch::default()
        };
        assert!(patch.apply_to(&mut job).is_err());
        assert_eq!(job, before);
    }

    #[test]
    fn status_toggles_in_both_directions() {
        let mut job =
            Job::from_draft(Uuid::new_v4(), Uuid::new_v4(), draft().normalized().unwrap());
        JobPatch::status(JobStatus::Closed).apply_to(&mut job).unwrap();
        assert!(!job.is_open());
        JobPatch::status(JobStatus::Open).apply_to(&mut job).unwrap();
        assert!(job.is_open());
    }

    #[test]
    fn employment_type_uses_hyphenated_spelling() {
        assert_eq!(EmploymentType::FullTime.as_str(), "Full-time");
        assert_eq!(
            EmploymentType::parse("Full-time"),
            Some(EmploymentType::FullTime)
        );
        assert_eq!(
            serde_json::to_string(&EmploymentType::FullTime).unwrap(),
            "\"Full-time\""
        );
    }
}
