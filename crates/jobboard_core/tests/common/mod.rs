#![allow(dead_code)]

use jobboard_core::{
    Actor, Company, CompanyDraft, CompanyService, EmploymentType, ExperienceLevel, JobDraft,
    JobService, JobWithCompany, Profile, ProfileRepository, Role, SqliteStore,
};
use uuid::Uuid;

pub fn store(conn: &rusqlite::Connection) -> SqliteStore<'_> {
    SqliteStore::try_new(conn).unwrap()
}

/// Inserts a profile directly, skipping password hashing.
pub fn actor(store: SqliteStore<'_>, role: Role, full_name: &str) -> Actor {
    let id = Uuid::new_v4();
    store
        .create_profile(&Profile {
            id,
            email: format!("{id}@example.com"),
            full_name: full_name.to_string(),
            role,
            bio: None,
            skills: None,
            portfolio_url: None,
            created_at: 0,
            updated_at: 0,
        })
        .unwrap();
    Actor::new(id, role)
}

pub fn company(store: SqliteStore<'_>, employer: &Actor, name: &str) -> Company {
    CompanyService::new(store)
        .save_company(
            employer,
            &CompanyDraft {
                company_name: name.to_string(),
                ..CompanyDraft::default()
            },
        )
        .unwrap()
}

pub fn draft(title: &str, tech: &[&str]) -> JobDraft {
    JobDraft {
        title: title.to_string(),
        description: format!("{title} role description"),
        tech_stack: tech.iter().map(|value| value.to_string()).collect(),
        experience_level: ExperienceLevel::Mid,
        salary_range: "$100k - $130k".to_string(),
        employment_type: EmploymentType::FullTime,
        timezone: None,
    }
}

pub fn post_job(
    store: SqliteStore<'_>,
    employer: &Actor,
    company: &Company,
    job: JobDraft,
) -> JobWithCompany {
    JobService::new(store)
        .create_job(employer, company.id, &job)
        .unwrap()
}

pub fn count_rows(conn: &rusqlite::Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}
