//! Profile repository contract and SQLite implementation.
//!
//! # Invariants
//! - `role` is written once at insert; no update path touches it.
//! - An empty skill list is stored as NULL.

use crate::model::profile::{Profile, ProfileId, ProfilePatch, Role};
use crate::repo::{
    decode_list, encode_list, parse_enum, PrefixedRow, RepoError, RepoResult, SqliteStore,
    NOW_MS_SQL,
};
use rusqlite::{params, OptionalExtension, Row};

/// Profile columns aliased with the `p_` prefix; expects `profiles p`.
pub(crate) const PROFILE_COLUMNS: &str = "p.id AS p_id,
    p.email AS p_email,
    p.full_name AS p_full_name,
    p.role AS p_role,
    p.bio AS p_bio,
    p.skills AS p_skills,
    p.portfolio_url AS p_portfolio_url,
    p.created_at AS p_created_at,
    p.updated_at AS p_updated_at";

/// Repository interface for profile records.
pub trait ProfileRepository {
    fn create_profile(&self, profile: &Profile) -> RepoResult<ProfileId>;
    fn get_profile(&self, id: ProfileId) -> RepoResult<Option<Profile>>;
    /// Replaces every editable field. `patch` must already be normalized.
    fn update_profile(&self, id: ProfileId, patch: &ProfilePatch) -> RepoResult<()>;
}

impl ProfileRepository for SqliteStore<'_> {
    fn create_profile(&self, profile: &Profile) -> RepoResult<ProfileId> {
        let skills = match profile.skills.as_deref() {
            Some(values) if !values.is_empty() => Some(encode_list(values)?),
            _ => None,
        };

        self.conn().execute(
            "INSERT INTO profiles (
                id,
                email,
                full_name,
                role,
                bio,
                skills,
                portfolio_url
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                profile.id.to_string(),
                profile.email.as_str(),
                profile.full_name.as_str(),
                profile.role.as_str(),
                profile.bio.as_deref(),
                skills,
                profile.portfolio_url.as_deref(),
            ],
        )?;

        Ok(profile.id)
    }

    fn get_profile(&self, id: ProfileId) -> RepoResult<Option<Profile>> {
        let profile = self
            .conn()
            .query_row(
                &format!("SELECT {PROFILE_COLUMNS} FROM profiles p WHERE p.id = ?1;"),
                [id.to_string()],
                |row| Ok(read_profile(row)),
            )
            .optional()?;
        profile.transpose()
    }

    fn update_profile(&self, id: ProfileId, patch: &ProfilePatch) -> RepoResult<()> {
        let skills = match patch.stored_skills() {
            Some(values) => Some(encode_list(values)?),
            None => None,
        };

        let changed = self.conn().execute(
            &format!(
                "UPDATE profiles
                 SET
                    full_name = ?2,
                    bio = ?3,
                    skills = ?4,
                    portfolio_url = ?5,
                    updated_at = {NOW_MS_SQL}
                 WHERE id = ?1;"
            ),
            params![
                id.to_string(),
                patch.full_name.as_str(),
                patch.bio.as_deref(),
                skills,
                patch.portfolio_url.as_deref(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "profile",
                id,
            });
        }
        Ok(())
    }
}

pub(crate) fn read_profile(row: &Row<'_>) -> RepoResult<Profile> {
    let columns = PrefixedRow::new(row, "p_");
    let role_text: String = columns.get("role")?;
    let skills = match columns.get::<Option<String>>("skills")? {
        Some(text) => Some(decode_list(&text, "profiles.skills")?),
        None => None,
    };

    Ok(Profile {
        id: columns.uuid("id")?,
        email: columns.get("email")?,
        full_name: columns.get("full_name")?,
        role: parse_enum(&role_text, "profiles.role", Role::parse)?,
        bio: columns.get("bio")?,
        skills,
        portfolio_url: columns.get("portfolio_url")?,
        created_at: columns.get("created_at")?,
        updated_at: columns.get("updated_at")?,
    })
}
