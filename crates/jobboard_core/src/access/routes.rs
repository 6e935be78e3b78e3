//! Declarative page route table.
//!
//! # Responsibility
//! - Map a request path to a page target and its access requirement.
//! - Decide between rendering, login redirect and role redirect.
//!
//! # Invariants
//! - Entries are evaluated in table order; the first match wins.
//! - Unmatched paths fall back to `RouteTarget::Home`, which is public.

use crate::access::session::Actor;
use crate::model::job::JobId;
use crate::model::profile::Role;
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

/// Who may visit a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    SignedIn,
    Role(Role),
}

/// Page selected by the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget {
    Home,
    SignUp,
    Login,
    Jobs,
    JobDetail(JobId),
    DeveloperDashboard,
    DeveloperProfile,
    EmployerDashboard,
    CompanyProfile,
    CreateJob,
    EditJob(JobId),
    JobApplications(JobId),
}

/// Outcome of resolving one path for one (optional) actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteResolution {
    Render(RouteTarget),
    RedirectToLogin,
    /// Signed-in actor lacks the required role; send them to this path.
    RedirectTo(&'static str),
}

#[derive(Clone, Copy)]
enum TargetBuilder {
    Fixed(fn() -> RouteTarget),
    WithJobId(fn(JobId) -> RouteTarget),
}

struct RouteEntry {
    pattern: Regex,
    access: Access,
    build: TargetBuilder,
}

fn entry(pattern: &str, access: Access, build: TargetBuilder) -> RouteEntry {
    RouteEntry {
        pattern: Regex::new(pattern).expect("valid route pattern"),
        access,
        build,
    }
}

static ROUTES: Lazy<Vec<RouteEntry>> = Lazy::new(|| {
    use TargetBuilder::{Fixed, WithJobId};
    vec![
        entry(r"^/signup$", Access::Public, Fixed(|| RouteTarget::SignUp)),
        entry(r"^/login$", Access::Public, Fixed(|| RouteTarget::Login)),
        entry(
            r"^/jobs/([^/]+)$",
            Access::SignedIn,
            WithJobId(RouteTarget::JobDetail),
        ),
        entry(r"^/jobs$", Access::SignedIn, Fixed(|| RouteTarget::Jobs)),
        entry(
            r"^/developer/dashboard$",
            Access::Role(Role::Developer),
            Fixed(|| RouteTarget::DeveloperDashboard),
        ),
        entry(
            r"^/developer/profile$",
            Access::Role(Role::Developer),
            Fixed(|| RouteTarget::DeveloperProfile),
        ),
        entry(
            r"^/employer/dashboard$",
            Access::Role(Role::Employer),
            Fixed(|| RouteTarget::EmployerDashboard),
        ),
        entry(
            r"^/employer/company$",
            Access::Role(Role::Employer),
            Fixed(|| RouteTarget::CompanyProfile),
        ),
        entry(
            r"^/employer/create-job$",
            Access::Role(Role::Employer),
            Fixed(|| RouteTarget::CreateJob),
        ),
        entry(
            r"^/employer/jobs/([^/]+)/edit$",
            Access::Role(Role::Employer),
            WithJobId(RouteTarget::EditJob),
        ),
        entry(
            r"^/employer/jobs/([^/]+)/applications$",
            Access::Role(Role::Employer),
            WithJobId(RouteTarget::JobApplications),
        ),
    ]
});

/// Matches `path` against the table, returning the target and its access
/// requirement.
///
/// A path segment that is not a valid job id does not match its entry and
/// falls through to later entries or the home fallback.
pub fn match_route(path: &str) -> (RouteTarget, Access) {
    for route in ROUTES.iter() {
        let Some(captures) = route.pattern.captures(path) else {
            continue;
        };
        let target = match route.build {
            TargetBuilder::Fixed(build) => Some(build()),
            TargetBuilder::WithJobId(build) => captures
                .get(1)
                .and_then(|segment| Uuid::parse_str(segment.as_str()).ok())
                .map(build),
        };
        if let Some(target) = target {
            return (target, route.access);
        }
    }
    (RouteTarget::Home, Access::Public)
}

/// Resolves `path` for the current actor (`None` when signed out).
pub fn resolve(path: &str, actor: Option<&Actor>) -> RouteResolution {
    let (target, access) = match_route(path);
    match (access, actor) {
        (Access::Public, _) => RouteResolution::Render(target),
        (_, None) => RouteResolution::RedirectToLogin,
        (Access::SignedIn, Some(_)) => RouteResolution::Render(target),
        (Access::Role(required), Some(actor)) if actor.role == required => {
            RouteResolution::Render(target)
        }
        (Access::Role(_), Some(actor)) => RouteResolution::RedirectTo(actor.role.dashboard_path()),
    }
}
