//! Bookmark repository contract and SQLite implementation.

use crate::model::bookmark::{Bookmark, BookmarkId, BookmarkWithJob};
use crate::model::job::{JobId, JobWithCompany};
use crate::model::profile::ProfileId;
use crate::repo::company_repo::{read_company, COMPANY_COLUMNS};
use crate::repo::job_repo::{read_job, JOB_COLUMNS};
use crate::repo::{parse_uuid, PrefixedRow, RepoResult, SqliteStore};
use rusqlite::{params, Row};

const BOOKMARK_COLUMNS: &str = "b.id AS b_id,
    b.job_id AS b_job_id,
    b.developer_id AS b_developer_id,
    b.created_at AS b_created_at";

/// Repository interface for bookmarks.
pub trait BookmarkRepository {
    fn create_bookmark(&self, bookmark: &Bookmark) -> RepoResult<BookmarkId>;
    /// Returns whether a row was removed.
    fn delete_bookmark(&self, job_id: JobId, developer_id: ProfileId) -> RepoResult<bool>;
    fn bookmark_exists(&self, job_id: JobId, developer_id: ProfileId) -> RepoResult<bool>;
    fn list_bookmarked_job_ids(&self, developer_id: ProfileId) -> RepoResult<Vec<JobId>>;
    /// One developer's bookmarks with job and company, newest first.
    fn list_bookmarks_for_developer(
        &self,
        developer_id: ProfileId,
    ) -> RepoResult<Vec<BookmarkWithJob>>;
}

impl BookmarkRepository for SqliteStore<'_> {
    fn create_bookmark(&self, bookmark: &Bookmark) -> RepoResult<BookmarkId> {
        self.conn().execute(
            "INSERT INTO bookmarks (id, job_id, developer_id) VALUES (?1, ?2, ?3);",
            params![
                bookmark.id.to_string(),
                bookmark.job_id.to_string(),
                bookmark.developer_id.to_string(),
            ],
        )?;
        Ok(bookmark.id)
    }

    fn delete_bookmark(&self, job_id: JobId, developer_id: ProfileId) -> RepoResult<bool> {
        let changed = self.conn().execute(
            "DELETE FROM bookmarks WHERE job_id = ?1 AND developer_id = ?2;",
            params![job_id.to_string(), developer_id.to_string()],
        )?;
        Ok(changed > 0)
    }

    fn bookmark_exists(&self, job_id: JobId, developer_id: ProfileId) -> RepoResult<bool> {
        let exists: i64 = self.conn().query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM bookmarks
                WHERE job_id = ?1 AND developer_id = ?2
            );",
            params![job_id.to_string(), developer_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn list_bookmarked_job_ids(&self, developer_id: ProfileId) -> RepoResult<Vec<JobId>> {
        let mut stmt = self.conn().prepare(
            "SELECT job_id
             FROM bookmarks
             WHERE developer_id = ?1
             ORDER BY created_at DESC, rowid DESC;",
        )?;
        let mut rows = stmt.query([developer_id.to_string()])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            let value: String = row.get(0)?;
            ids.push(parse_uuid(&value, "bookmarks.job_id")?);
        }
        Ok(ids)
    }

    fn list_bookmarks_for_developer(
        &self,
        developer_id: ProfileId,
    ) -> RepoResult<Vec<BookmarkWithJob>> {
        let mut stmt = self.conn().prepare(&format!(
            "SELECT {BOOKMARK_COLUMNS}, {JOB_COLUMNS}, {COMPANY_COLUMNS}
             FROM bookmarks b
             INNER JOIN jobs j ON j.id = b.job_id
             INNER JOIN companies c ON c.id = j.company_id
             WHERE b.developer_id = ?1
             ORDER BY b.created_at DESC, b.rowid DESC;"
        ))?;
        let mut rows = stmt.query([developer_id.to_string()])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(BookmarkWithJob {
                bookmark: read_bookmark(row)?,
                job: JobWithCompany {
                    job: read_job(row)?,
                    company: read_company(row)?,
                },
            });
        }
        Ok(items)
    }
}

fn read_bookmark(row: &Row<'_>) -> RepoResult<Bookmark> {
    let columns = PrefixedRow::new(row, "b_");
    Ok(Bookmark {
        id: columns.uuid("id")?,
        job_id: columns.uuid("job_id")?,
        developer_id: columns.uuid("developer_id")?,
        created_at: columns.get("created_at")?,
    })
}
