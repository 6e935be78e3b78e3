//! Authorization & query rules.
//!
//! # Responsibility
//! - Turn (actor, intent) into capability checks, ownership checks and
//!   repository calls.
//! - Keep callers decoupled from storage details.
//!
//! # Invariants
//! - Every authorization check runs before the first mutating store call.
//! - Errors surface immediately; nothing is retried or compensated.

pub mod application_service;
pub mod bookmark_service;
pub mod company_service;
pub mod dashboard_service;
pub mod error;
pub mod job_service;
pub mod profile_service;
