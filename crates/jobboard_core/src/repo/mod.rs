//! Persistence boundary: per-table repository contracts and their SQLite
//! implementation.
//!
//! # Responsibility
//! - Define select/insert/update/delete/count contracts for the five tables.
//! - Isolate SQL, column encoding and join shapes from the rules layer.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Every list is ordered newest first: `created_at DESC, rowid DESC`.
//! - UNIQUE failures surface as `RepoError::UniqueViolation`, never as a raw
//!   driver error.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::ModelValidationError;
use rusqlite::types::FromSql;
use rusqlite::{Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod application_repo;
pub mod bookmark_repo;
pub mod company_repo;
pub mod job_repo;
pub mod profile_repo;

pub use application_repo::ApplicationRepository;
pub use bookmark_repo::BookmarkRepository;
pub use company_repo::CompanyRepository;
pub use job_repo::{JobListQuery, JobRepository};
pub use profile_repo::ProfileRepository;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    NotFound { entity: &'static str, id: Uuid },
    /// A UNIQUE or PRIMARY KEY constraint rejected the write.
    UniqueViolation(String),
    InvalidData(String),
    /// Connection schema is not at the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::UniqueViolation(message) => write!(f, "duplicate record: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        if let Some(message) = value.unique_violation().map(str::to_string) {
            return Self::UniqueViolation(message);
        }
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::from(DbError::Sqlite(value))
    }
}

/// The whole persistence collaborator consumed by the rules layer.
pub trait JobBoardStore:
    ProfileRepository + CompanyRepository + JobRepository + ApplicationRepository + BookmarkRepository
{
}

impl<T> JobBoardStore for T where
    T: ProfileRepository
        + CompanyRepository
        + JobRepository
        + ApplicationRepository
        + BookmarkRepository
{
}

/// SQLite-backed store over one migrated connection.
///
/// Cheap to copy; every service can hold its own handle.
#[derive(Debug, Clone, Copy)]
pub struct SqliteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStore<'conn> {
    /// Wraps a connection after checking it is fully migrated.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    pub(crate) fn conn(&self) -> &'conn Connection {
        self.conn
    }
}

/// SQL expression for "now" in epoch milliseconds.
pub(crate) const NOW_MS_SQL: &str = "(CAST(unixepoch('subsec') * 1000 AS INTEGER))";

pub(crate) fn parse_uuid(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}

pub(crate) fn parse_enum<T>(
    value: &str,
    column: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> RepoResult<T> {
    parse(value).ok_or_else(|| RepoError::InvalidData(format!("invalid value `{value}` in {column}")))
}

pub(crate) fn encode_list(values: &[String]) -> RepoResult<String> {
    serde_json::to_string(values)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode list: {err}")))
}

pub(crate) fn decode_list(value: &str, column: &str) -> RepoResult<Vec<String>> {
    serde_json::from_str(value)
        .map_err(|err| RepoError::InvalidData(format!("invalid list in {column}: {err}")))
}

/// Reads columns selected under a table alias prefix, e.g. `j_title`.
pub(crate) struct PrefixedRow<'row, 'stmt> {
    row: &'row Row<'stmt>,
    prefix: &'static str,
}

impl<'row, 'stmt> PrefixedRow<'row, 'stmt> {
    pub(crate) fn new(row: &'row Row<'stmt>, prefix: &'static str) -> Self {
        Self { row, prefix }
    }

    pub(crate) fn get<T: FromSql>(&self, name: &str) -> RepoResult<T> {
        let column = format!("{}{name}", self.prefix);
        Ok(self.row.get(column.as_str())?)
    }

    pub(crate) fn uuid(&self, name: &str) -> RepoResult<Uuid> {
        let value: String = self.get(name)?;
        parse_uuid(&value, &format!("{}{name}", self.prefix))
    }
}
