//! Application repository contract and SQLite implementation.
//!
//! # Invariants
//! - (job_id, developer_id) is unique (`uq_applications_job_developer`).
//! - Status changes are compare-and-set against the expected current status.

use crate::model::application::{
    Application, ApplicationId, ApplicationStatus, ApplicationWithDeveloper, ApplicationWithJob,
};
use crate::model::job::{JobId, JobWithCompany};
use crate::model::profile::ProfileId;
use crate::repo::company_repo::{read_company, COMPANY_COLUMNS};
use crate::repo::job_repo::{read_job, JOB_COLUMNS};
use crate::repo::profile_repo::{read_profile, PROFILE_COLUMNS};
use crate::repo::{parse_enum, PrefixedRow, RepoResult, SqliteStore, NOW_MS_SQL};
use rusqlite::{params, OptionalExtension, Row};

/// Application columns aliased with the `a_` prefix; expects `applications a`.
const APPLICATION_COLUMNS: &str = "a.id AS a_id,
    a.job_id AS a_job_id,
    a.developer_id AS a_developer_id,
    a.resume_url AS a_resume_url,
    a.cover_letter AS a_cover_letter,
    a.status AS a_status,
    a.created_at AS a_created_at,
    a.updated_at AS a_updated_at";

/// Repository interface for applications.
pub trait ApplicationRepository {
    fn create_application(&self, application: &Application) -> RepoResult<ApplicationId>;
    fn get_application(&self, id: ApplicationId) -> RepoResult<Option<Application>>;
    fn find_application(
        &self,
        job_id: JobId,
        developer_id: ProfileId,
    ) -> RepoResult<Option<Application>>;
    /// Sets `next` only while the row still has status `expected`.
    ///
    /// Returns `false` when no row matched (absent or already moved on).
    fn transition_application_status(
        &self,
        id: ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> RepoResult<bool>;
    /// Applications for one job with the applicant profile, newest first.
    fn list_applications_for_job(&self, job_id: JobId)
        -> RepoResult<Vec<ApplicationWithDeveloper>>;
    /// One developer's applications with job and company, newest first.
    fn list_applications_for_developer(
        &self,
        developer_id: ProfileId,
    ) -> RepoResult<Vec<ApplicationWithJob>>;
    fn count_applications_for_job(&self, job_id: JobId) -> RepoResult<u64>;
}

impl ApplicationRepository for SqliteStore<'_> {
    fn create_application(&self, application: &Application) -> RepoResult<ApplicationId> {
        self.conn().execute(
            "INSERT INTO applications (
                id,
                job_id,
                developer_id,
                resume_url,
                cover_letter,
                status
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                application.id.to_string(),
                application.job_id.to_string(),
                application.developer_id.to_string(),
                application.resume_url.as_str(),
                application.cover_letter.as_deref(),
                application.status.as_str(),
            ],
        )?;
        Ok(application.id)
    }

    fn get_application(&self, id: ApplicationId) -> RepoResult<Option<Application>> {
        self.conn()
            .query_row(
                &format!("SELECT {APPLICATION_COLUMNS} FROM applications a WHERE a.id = ?1;"),
                [id.to_string()],
                |row| Ok(read_application(row)),
            )
            .optional()?
            .transpose()
    }

    fn find_application(
        &self,
        job_id: JobId,
        developer_id: ProfileId,
    ) -> RepoResult<Option<Application>> {
        self.conn()
            .query_row(
                &format!(
                    "SELECT {APPLICATION_COLUMNS}
                     FROM applications a
                     WHERE a.job_id = ?1
                       AND a.developer_id = ?2;"
                ),
                params![job_id.to_string(), developer_id.to_string()],
                |row| Ok(read_application(row)),
            )
            .optional()?
            .transpose()
    }

    fn transition_application_status(
        &self,
        id: ApplicationId,
        expected: ApplicationStatus,
        next: ApplicationStatus,
    ) -> RepoResult<bool> {
        let changed = self.conn().execute(
            &format!(
                "UPDATE applications
                 SET
                    status = ?3,
                    updated_at = {NOW_MS_SQL}
                 WHERE id = ?1
                   AND status = ?2;"
            ),
            params![id.to_string(), expected.as_str(), next.as_str()],
        )?;
        Ok(changed > 0)
    }

    fn list_applications_for_job(
        &self,
        job_id: JobId,
    ) -> RepoResult<Vec<ApplicationWithDeveloper>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {APPLICATION_COLUMNS}, {PROFILE_COLUMNS}
             FROM applications a
             INNER JOIN profiles p ON p.id = a.developer_id
             WHERE a.job_id = ?1
             ORDER BY a.created_at DESC, a.rowid DESC;"
        ))?;
        let mut rows = stmt.query([job_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(ApplicationWithDeveloper {
                application: read_application(row)?,
                developer: read_profile(row)?,
            });
        }
        Ok(items)
    }

    fn list_applications_for_developer(
        &self,
        developer_id: ProfileId,
    ) -> RepoResult<Vec<ApplicationWithJob>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {APPLICATION_COLUMNS}, {JOB_COLUMNS}, {COMPANY_COLUMNS}
             FROM applications a
             INNER JOIN jobs j ON j.id = a.job_id
             INNER JOIN companies c ON c.id = j.company_id
             WHERE a.developer_id = ?1
             ORDER BY a.created_at DESC, a.rowid DESC;"
        ))?;
        let mut rows = stmt.query([developer_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(ApplicationWithJob {
                application: read_application(row)?,
                job: JobWithCompany {
                    job: read_job(row)?,
                    company: read_company(row)?,
                },
            });
        }
        Ok(items)
    }

    fn count_applications_for_job(&self, job_id: JobId) -> RepoResult<u64> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM applications WHERE job_id = ?1;",
            [job_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}

fn read_application(row: &Row<'_>) -> RepoResult<Application> {
    let columns = PrefixedRow::new(row, "a_");
    let status_text: String = columns.get("status")?;
    Ok(Application {
        id: columns.uuid("id")?,
        job_id: columns.uuid("job_id")?,
        developer_id: columns.uuid("developer_id")?,
        resume_url: columns.get("resume_url")?,
        cover_letter: columns.get("cover_letter")?,
        status: parse_enum(&status_text, "applications.status", ApplicationStatus::parse)?,
        created_at: columns.get("created_at")?,
        updated_at: columns.get("updated_at")?,
    })
}
