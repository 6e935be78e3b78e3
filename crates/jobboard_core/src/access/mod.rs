//! Actor identity, role capabilities and route gating.
//!
//! Capability checks happen once, at the data-access boundary; callers render
//! whatever the rules layer returns.

pub mod capability;
pub mod routes;
pub mod session;
