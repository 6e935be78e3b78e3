//! Job repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist job listings and read them joined with their company.
//! - Translate structured list filters into SQL predicates.
//!
//! # Invariants
//! - Write paths call `Job::validate()` before SQL mutations; a stored row
//!   that fails it reads back as `RepoError::InvalidData`.
//! - `tech_stack` is stored as a JSON array; membership filters use
//!   `json_each` exact matching.
//! - Deleting a job cascades to its applications and bookmarks.

use crate::model::job::{
    EmploymentType, ExperienceLevel, Job, JobId, JobStatus, JobWithCompany,
};
use crate::model::profile::ProfileId;
use crate::repo::company_repo::{read_company, COMPANY_COLUMNS};
use crate::repo::{
    decode_list, encode_list, parse_enum, PrefixedRow, RepoError, RepoResult, SqliteStore,
    NOW_MS_SQL,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

/// Job columns aliased with the `j_` prefix; expects `jobs j`.
pub(crate) const JOB_COLUMNS: &str = "j.id AS j_id,
    j.employer_id AS j_employer_id,
    j.company_id AS j_company_id,
    j.title AS j_title,
    j.description AS j_description,
    j.tech_stack AS j_tech_stack,
    j.experience_level AS j_experience_level,
    j.salary_range AS j_salary_range,
    j.employment_type AS j_employment_type,
    j.timezone AS j_timezone,
    j.status AS j_status,
    j.created_at AS j_created_at,
    j.updated_at AS j_updated_at";

/// Structured filters for listing jobs. Every `None` field is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobListQuery {
    pub status: Option<JobStatus>,
    pub employer_id: Option<ProfileId>,
    pub experience_level: Option<ExperienceLevel>,
    pub employment_type: Option<EmploymentType>,
    /// Exact (case-sensitive) membership in `tech_stack`.
    pub tech: Option<String>,
}

/// Repository interface for job listings.
pub trait JobRepository {
    fn create_job(&self, job: &Job) -> RepoResult<JobId>;
    /// Writes every mutable column of `job`; identity and ownership columns
    /// are left untouched.
    fn update_job(&self, job: &Job) -> RepoResult<()>;
    fn delete_job(&self, id: JobId) -> RepoResult<()>;
    fn get_job(&self, id: JobId) -> RepoResult<Option<Job>>;
    fn get_job_with_company(&self, id: JobId) -> RepoResult<Option<JobWithCompany>>;
    /// Lists jobs with their company, newest first.
    fn list_jobs(&self, query: &JobListQuery) -> RepoResult<Vec<JobWithCompany>>;
}

impl JobRepository for SqliteStore<'_> {
    fn create_job(&self, job: &Job) -> RepoResult<JobId> {
        job.validate()?;

        self.conn().execute(
            "INSERT INTO jobs (
                id,
                employer_id,
                company_id,
                title,
                description,
                tech_stack,
                experience_level,
                salary_range,
                employment_type,
                timezone,
                status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
            params![
                job.id.to_string(),
                job.employer_id.to_string(),
                job.company_id.to_string(),
                job.title.as_str(),
                job.description.as_str(),
                encode_list(&job.tech_stack)?,
                job.experience_level.as_str(),
                job.salary_range.as_str(),
                job.employment_type.as_str(),
                job.timezone.as_deref(),
                job.status.as_str(),
            ],
        )?;

        Ok(job.id)
    }

    fn update_job(&self, job: &Job) -> RepoResult<()> {
        job.validate()?;

        let changed = self.conn().execute(
            &format!(
                "UPDATE jobs
                 SET
                    title = ?2,
                    description = ?3,
                    tech_stack = ?4,
                    experience_level = ?5,
                    salary_range = ?6,
                    employment_type = ?7,
                    timezone = ?8,
                    status = ?9,
                    updated_at = {NOW_MS_SQL}
                 WHERE id = ?1;"
            ),
            params![
                job.id.to_string(),
                job.title.as_str(),
                job.description.as_str(),
                encode_list(&job.tech_stack)?,
                job.experience_level.as_str(),
                job.salary_range.as_str(),
                job.employment_type.as_str(),
                job.timezone.as_deref(),
                job.status.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "job",
                id: job.id,
            });
        }
        Ok(())
    }

    fn delete_job(&self, id: JobId) -> RepoResult<()> {
        let changed = self
            .conn()
            .execute("DELETE FROM jobs WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "job", id });
        }
        Ok(())
    }

    fn get_job(&self, id: JobId) -> RepoResult<Option<Job>> {
        self.conn()
            .query_row(
                &format!("SELECT {JOB_COLUMNS} FROM jobs j WHERE j.id = ?1;"),
                [id.to_string()],
                |row| Ok(read_job(row)),
            )
            .optional()?
            .transpose()
    }

    fn get_job_with_company(&self, id: JobId) -> RepoResult<Option<JobWithCompany>> {
        self.conn()
            .query_row(
                &format!(
                    "SELECT {JOB_COLUMNS}, {COMPANY_COLUMNS}
                     FROM jobs j
                     INNER JOIN companies c ON c.id = j.company_id
                     WHERE j.id = ?1;"
                ),
                [id.to_string()],
                |row| Ok(read_job_with_company(row)),
            )
            .optional()?
            .transpose()
    }

    fn list_jobs(&self, query: &JobListQuery) -> RepoResult<Vec<JobWithCompany>> {
        let mut sql = format!(
            "SELECT {JOB_COLUMNS}, {COMPANY_COLUMNS}
             FROM jobs j
             INNER JOIN companies c ON c.id = j.company_id
             WHERE 1 = 1"
        );
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = query.status {
            sql.push_str(" AND j.status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(employer_id) = query.employer_id {
            sql.push_str(" AND j.employer_id = ?");
            bind_values.push(Value::Text(employer_id.to_string()));
        }
        if let Some(level) = query.experience_level {
            sql.push_str(" AND j.experience_level = ?");
            bind_values.push(Value::Text(level.as_str().to_string()));
        }
        if let Some(employment_type) = query.employment_type {
            sql.push_str(" AND j.employment_type = ?");
            bind_values.push(Value::Text(employment_type.as_str().to_string()));
        }
        if let Some(tech) = query.tech.as_ref() {
            sql.push_str(
                " AND EXISTS (
                    SELECT 1
                    FROM json_each(j.tech_stack) tech
                    WHERE tech.value = ?
                )",
            );
            bind_values.push(Value::Text(tech.clone()));
        }

        sql.push_str(" ORDER BY j.created_at DESC, j.rowid DESC");

        let mut stmt = self.conn().prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut jobs = Vec::new();
        while let Some(row) = rows.next()? {
            jobs.push(read_job_with_company(row)?);
        }
        Ok(jobs)
    }
}

pub(crate) fn read_job(row: &Row<'_>) -> RepoResult<Job> {
    let columns = PrefixedRow::new(row, "j_");
    let tech_stack_text: String = columns.get("tech_stack")?;
    let level_text: String = columns.get("experience_level")?;
    let employment_text: String = columns.get("employment_type")?;
    let status_text: String = columns.get("status")?;

    let job = Job {
        id: columns.uuid("id")?,
        employer_id: columns.uuid("employer_id")?,
        company_id: columns.uuid("company_id")?,
        title: columns.get("title")?,
        description: columns.get("description")?,
        tech_stack: decode_list(&tech_stack_text, "jobs.tech_stack")?,
        experience_level: parse_enum(&level_text, "jobs.experience_level", ExperienceLevel::parse)?,
        salary_range: columns.get("salary_range")?,
        employment_type: parse_enum(
            &employment_text,
            "jobs.employment_type",
            EmploymentType::parse,
        )?,
        timezone: columns.get("timezone")?,
        status: parse_enum(&status_text, "jobs.status", JobStatus::parse)?,
        created_at: columns.get("created_at")?,
        updated_at: columns.get("updated_at")?,
    };
    job.validate()
        .map_err(|err| RepoError::InvalidData(format!("jobs row {}: {err}", job.id)))?;
    Ok(job)
}

pub(crate) fn read_job_with_company(row: &Row<'_>) -> RepoResult<JobWithCompany> {
    Ok(JobWithCompany {
        job: read_job(row)?,
        company: read_company(row)?,
    })
}
