//! Identity collaborator: accounts, password checks and sessions.
//!
//! # Responsibility
//! - Create an account and its profile together at sign-up.
//! - Exchange credentials for an explicit `Session` value.
//!
//! # Invariants
//! - Account emails are unique ignoring case.
//! - Account id and profile id are the same uuid.
//! - Passwords are stored only as argon2 PHC strings.
//! - Emails and passwords never reach the log.

use crate::access::session::Session;
use crate::model::profile::{Profile, Role};
use crate::repo::{ProfileRepository, RepoError, SqliteStore};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use log::{info, warn};
use rand::rngs::OsRng;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub const MIN_PASSWORD_CHARS: usize = 6;

pub type IdentityResult<T> = Result<T, IdentityError>;

#[derive(Debug)]
pub enum IdentityError {
    Validation(String),
    /// Email already registered.
    Conflict(String),
    /// Unknown email or wrong password; deliberately indistinguishable.
    InvalidCredentials,
    /// Password hashing backend failed.
    Hashing(String),
    Collaborator(RepoError),
}

impl Display for IdentityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::Conflict(message) => write!(f, "{message}"),
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::Hashing(message) => write!(f, "password hashing failed: {message}"),
            Self::Collaborator(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IdentityError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Collaborator(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for IdentityError {
    fn from(value: RepoError) -> Self {
        Self::Collaborator(value)
    }
}

impl From<rusqlite::Error> for IdentityError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Collaborator(RepoError::from(value))
    }
}

/// Sign-up form values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub role: Role,
}

impl SignUpRequest {
    fn validate(&self) -> IdentityResult<()> {
        if self.email.trim().is_empty() {
            return Err(IdentityError::Validation("email is required".to_string()));
        }
        if self.full_name.trim().is_empty() {
            return Err(IdentityError::Validation(
                "full name is required".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(IdentityError::Validation(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }
        if self.password != self.confirm_password {
            return Err(IdentityError::Validation(
                "passwords do not match".to_string(),
            ));
        }
        Ok(())
    }
}

/// Authentication collaborator consumed by callers before any data access.
pub trait IdentityProvider {
    fn sign_up(&self, request: &SignUpRequest) -> IdentityResult<Session>;
    fn sign_in(&self, email: &str, password: &str) -> IdentityResult<Session>;
    /// Removes the session; unknown tokens are ignored.
    fn sign_out(&self, token: &str) -> IdentityResult<()>;
    fn current_user(&self, token: &str) -> IdentityResult<Option<Session>>;
}

/// Identity provider backed by the `accounts` and `sessions` tables.
#[derive(Debug, Clone, Copy)]
pub struct SqliteIdentityProvider<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteIdentityProvider<'conn> {
    pub fn try_new(conn: &'conn Connection) -> IdentityResult<Self> {
        SqliteStore::try_new(conn)?;
        Ok(Self { conn })
    }

    fn store(&self) -> IdentityResult<SqliteStore<'conn>> {
        Ok(SqliteStore::try_new(self.conn)?)
    }

    fn open_session(&self, profile: Profile) -> IdentityResult<Session> {
        let token = Uuid::new_v4().simple().to_string();
        self.conn.execute(
            "INSERT INTO sessions (token, account_id) VALUES (?1, ?2);",
            params![token, profile.id.to_string()],
        )?;
        Ok(Session { token, profile })
    }

    fn load_profile(&self, id: Uuid) -> IdentityResult<Profile> {
        self.store()?
            .get_profile(id)?
            .ok_or(IdentityError::Collaborator(RepoError::NotFound {
                entity: "profile",
                id,
            }))
    }
}

impl IdentityProvider for SqliteIdentityProvider<'_> {
    fn sign_up(&self, request: &SignUpRequest) -> IdentityResult<Session> {
        request.validate()?;
        let email = request.email.trim();
        let password_hash = hash_password(&request.password)?;
        let profile = Profile {
            id: Uuid::new_v4(),
            email: email.to_string(),
            full_name: request.full_name.trim().to_string(),
            role: request.role,
            bio: None,
            skills: None,
            portfolio_url: None,
            created_at: 0,
            updated_at: 0,
        };

        let tx = self.conn.unchecked_transaction()?;
        let inserted = tx.execute(
            "INSERT INTO accounts (id, email, password_hash) VALUES (?1, ?2, ?3);",
            params![profile.id.to_string(), email, password_hash],
        );
        match inserted.map_err(RepoError::from) {
            Ok(_) => {}
            Err(RepoError::UniqueViolation(_)) => {
                warn!("event=identity_sign_up module=identity status=conflict");
                return Err(IdentityError::Conflict(
                    "an account with this email already exists".to_string(),
                ));
            }
            Err(err) => return Err(err.into()),
        }
        SqliteStore::try_new(&tx)?.create_profile(&profile)?;
        tx.commit()?;

        info!(
            "event=identity_sign_up module=identity status=ok profile_id={} role={}",
            profile.id,
            profile.role.as_str()
        );
        let profile = self.load_profile(profile.id)?;
        self.open_session(profile)
    }

    fn sign_in(&self, email: &str, password: &str) -> IdentityResult<Session> {
        let account: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT id, password_hash FROM accounts WHERE email = ?1;",
                [email.trim()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((account_id, password_hash)) = account else {
            warn!("event=identity_sign_in module=identity status=denied reason=unknown_account");
            return Err(IdentityError::InvalidCredentials);
        };
        if !verify_password(password, &password_hash)? {
            warn!("event=identity_sign_in module=identity status=denied reason=bad_password");
            return Err(IdentityError::InvalidCredentials);
        }

        let account_id = Uuid::parse_str(&account_id).map_err(|_| {
            RepoError::InvalidData(format!("invalid uuid `{account_id}` in accounts.id"))
        })?;
        let profile = self.load_profile(account_id)?;
        info!("event=identity_sign_in module=identity status=ok profile_id={account_id}");
        self.open_session(profile)
    }

    fn sign_out(&self, token: &str) -> IdentityResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM sessions WHERE token = ?1;", [token])?;
        info!("event=identity_sign_out module=identity status=ok removed={removed}");
        Ok(())
    }

    fn current_user(&self, token: &str) -> IdentityResult<Option<Session>> {
        let account_id: Option<String> = self
            .conn
            .query_row(
                "SELECT account_id FROM sessions WHERE token = ?1;",
                [token],
                |row| row.get(0),
            )
            .optional()?;
        let Some(account_id) = account_id else {
            return Ok(None);
        };

        let account_id = Uuid::parse_str(&account_id).map_err(|_| {
            RepoError::InvalidData(format!("invalid uuid `{account_id}` in sessions.account_id"))
        })?;
        Ok(self
            .store()?
            .get_profile(account_id)?
            .map(|profile| Session {
                token: token.to_string(),
                profile,
            }))
    }
}

fn hash_password(password: &str) -> IdentityResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| IdentityError::Hashing(err.to_string()))
}

fn verify_password(password: &str, hash: &str) -> IdentityResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|err| IdentityError::Hashing(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
