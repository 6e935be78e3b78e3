//! Company repository contract and SQLite implementation.
//!
//! # Invariants
//! - At most one company row per owner (`uq_companies_user`).

use crate::model::company::{Company, CompanyDraft, CompanyId};
use crate::model::profile::ProfileId;
use crate::repo::{PrefixedRow, RepoError, RepoResult, SqliteStore, NOW_MS_SQL};
use rusqlite::{params, OptionalExtension, Row};

/// Company columns aliased with the `c_` prefix; expects `companies c`.
pub(crate) const COMPANY_COLUMNS: &str = "c.id AS c_id,
    c.user_id AS c_user_id,
    c.company_name AS c_company_name,
    c.logo_url AS c_logo_url,
    c.website AS c_website,
    c.description AS c_description,
    c.created_at AS c_created_at,
    c.updated_at AS c_updated_at";

/// Repository interface for company records.
pub trait CompanyRepository {
    fn create_company(&self, company: &Company) -> RepoResult<CompanyId>;
    /// Replaces every editable field. `draft` must already be normalized.
    fn update_company(&self, id: CompanyId, draft: &CompanyDraft) -> RepoResult<()>;
    fn get_company(&self, id: CompanyId) -> RepoResult<Option<Company>>;
    fn find_company_by_owner(&self, owner_id: ProfileId) -> RepoResult<Option<Company>>;
}

impl CompanyRepository for SqliteStore<'_> {
    fn create_company(&self, company: &Company) -> RepoResult<CompanyId> {
        self.conn().execute(
            "INSERT INTO companies (
                id,
                user_id,
                company_name,
                logo_url,
                website,
                description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                company.id.to_string(),
                company.user_id.to_string(),
                company.company_name.as_str(),
                company.logo_url.as_deref(),
                company.website.as_deref(),
                company.description.as_deref(),
            ],
        )?;
        Ok(company.id)
    }

    fn update_company(&self, id: CompanyId, draft: &CompanyDraft) -> RepoResult<()> {
        let changed = self.conn().execute(
            &format!(
                "UPDATE companies
                 SET
                    company_name = ?2,
                    logo_url = ?3,
                    website = ?4,
                    description = ?5,
                    updated_at = {NOW_MS_SQL}
                 WHERE id = ?1;"
            ),
            params![
                id.to_string(),
                draft.company_name.as_str(),
                draft.logo_url.as_deref(),
                draft.website.as_deref(),
                draft.description.as_deref(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "company",
                id,
            });
        }
        Ok(())
    }

    fn get_company(&self, id: CompanyId) -> RepoResult<Option<Company>> {
        self.conn()
            .query_row(
                &format!("SELECT {COMPANY_COLUMNS} FROM companies c WHERE c.id = ?1;"),
                [id.to_string()],
                |row| Ok(read_company(row)),
            )
            .optional()?
            .transpose()
    }

    fn find_company_by_owner(&self, owner_id: ProfileId) -> RepoResult<Option<Company>> {
        self.conn()
            .query_row(
                &format!(
                    "SELECT {COMPANY_COLUMNS}
                     FROM companies c
                     WHERE c.user_id = ?1
                     ORDER BY c.created_at ASC, c.rowid ASC
                     LIMIT 1;"
                ),
                [owner_id.to_string()],
                |row| Ok(read_company(row)),
            )
            .optional()?
            .transpose()
    }
}

pub(crate) fn read_company(row: &Row<'_>) -> RepoResult<Company> {
    let columns = PrefixedRow::new(row, "c_");
    Ok(Company {
        id: columns.uuid("id")?,
        user_id: columns.uuid("user_id")?,
        company_name: columns.get("company_name")?,
        logo_url: columns.get("logo_url")?,
        website: columns.get("website")?,
        description: columns.get("description")?,
        created_at: columns.get("created_at")?,
        updated_at: columns.get("updated_at")?,
    })
}
