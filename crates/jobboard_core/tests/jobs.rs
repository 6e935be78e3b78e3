mod common;

use common::{actor, company, count_rows, draft, post_job, store};
use jobboard_core::db::open_db_in_memory;
use jobboard_core::{
    ApplicationService, BookmarkService, EmploymentType, ExperienceLevel, JobFilters, JobPatch,
    JobService, JobStatus, ModelValidationError, RepoError, Role, ServiceError,
};
use uuid::Uuid;

#[test]
fn listing_shows_only_open_jobs_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let employer = actor(store, Role::Employer, "E");
    let acme = company(store, &employer, "Acme");
    let jobs = JobService::new(store);

    let first = post_job(store, &employer, &acme, draft("Backend Engineer", &["Rust"]));
    let second = post_job(store, &employer, &acme, draft("Frontend Engineer", &["TypeScript"]));
    let closed = post_job(store, &employer, &acme, draft("Data Engineer", &["Python"]));
    jobs.update_job(closed.job.id, &employer, &JobPatch::status(JobStatus::Closed))
        .unwrap();

    let listed = jobs.list_open_jobs(&JobFilters::default()).unwrap();
    let ids: Vec<_> = listed.iter().map(|item| item.job.id).collect();
    assert_eq!(ids, vec![second.job.id, first.job.id]);
    assert!(listed.iter().all(|item| item.job.status == JobStatus::Open));
    assert_eq!(listed[0].company.company_name, "Acme");
}

#[test]
fn search_matches_title_company_and_description_ignoring_case() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let employer = actor(store, Role::Employer, "E");
    let acme = company(store, &employer, "Acme Rockets");
    let jobs = JobService::new(store);
    let backend = post_job(store, &employer, &acme, draft("Backend Engineer", &["Rust"]));

    for needle in ["backend", "ROCKETS", "role DESCRIPTION", "  engineer  "] {
        let found = jobs
            .list_open_jobs(&JobFilters {
                search: Some(needle.to_string()),
                ..JobFilters::default()
            })
            .unwrap();
        assert_eq!(found.len(), 1, "needle {needle:?}");
        assert_eq!(found[0].job.id, backend.job.id);
    }

    let none = jobs
        .list_open_jobs(&JobFilters {
            search: Some("designer".to_string()),
            ..JobFilters::default()
        })
        .unwrap();
    assert!(none.is_empty());
}

#[test]
fn structured_filters_narrow_the_listing() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let employer = actor(store, Role::Employer, "E");
    let acme = company(store, &employer, "Acme");
    let jobs = JobService::new(store);

    let rust = post_job(store, &employer, &acme, draft("Systems", &["Rust", "Linux"]));
    let mut contract = draft("Contractor", &["Go"]);
    contract.employment_type = EmploymentType::Contract;
    contract.experience_level = ExperienceLevel::Senior;
    let contract = post_job(store, &employer, &acme, contract);

    let by_tech = jobs
        .list_open_jobs(&JobFilters {
            tech_stack: Some("Rust".to_string()),
            ..JobFilters::default()
        })
        .unwrap();
    assert_eq!(by_tech.len(), 1);
    assert_eq!(by_tech[0].job.id, rust.job.id);

    let by_type = jobs
        .list_open_jobs(&JobFilters {
            employment_type: Some(EmploymentType::Contract),
            experience_level: Some(ExperienceLevel::Senior),
            ..JobFilters::default()
        })
        .unwrap();
    assert_eq!(by_type.len(), 1);
    assert_eq!(by_type[0].job.id, contract.job.id);

    let blank_tech = jobs
        .list_open_jobs(&JobFilters {
            tech_stack: Some("   ".to_string()),
            ..JobFilters::default()
        })
        .unwrap();
    assert_eq!(blank_tech.len(), 2);
}

#[test]
fn empty_tech_stack_fails_without_insert() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let employer = actor(store, Role::Employer, "E");
    let acme = company(store, &employer, "Acme");

    let err = JobService::new(store)
        .create_job(&employer, acme.id, &draft("Empty", &[" ", ""]))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ModelValidationError::EmptyTechStack)
    ));
    assert_eq!(count_rows(&conn, "jobs"), 0);
}

#[test]
fn create_job_requires_employer_owning_the_company() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let owner = actor(store, Role::Employer, "Owner");
    let other = actor(store, Role::Employer, "Other");
    let developer = actor(store, Role::Developer, "Dev");
    let acme = company(store, &owner, "Acme");
    let jobs = JobService::new(store);

    assert!(matches!(
        jobs.create_job(&other, acme.id, &draft("Stolen", &["Rust"])),
        Err(ServiceError::Authorization(_))
    ));
    assert!(matches!(
        jobs.create_job(&developer, acme.id, &draft("Nope", &["Rust"])),
        Err(ServiceError::Authorization(_))
    ));
    assert!(matches!(
        jobs.create_job(&owner, Uuid::new_v4(), &draft("Ghost", &["Rust"])),
        Err(ServiceError::Authorization(_))
    ));
    assert_eq!(count_rows(&conn, "jobs"), 0);
}

#[test]
fn non_owner_cannot_update_or_delete() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let owner = actor(store, Role::Employer, "Owner");
    let other = actor(store, Role::Employer, "Other");
    let acme = company(store, &owner, "Acme");
    let jobs = JobService::new(store);
    let posted = post_job(store, &owner, &acme, draft("Backend", &["Rust"]));

    let patch = JobPatch {
        title: Some("Hijacked".to_string()),
        ..JobPatch::default()
    };
    assert!(matches!(
        jobs.update_job(posted.job.id, &other, &patch),
        Err(ServiceError::Authorization(_))
    ));
    assert!(matches!(
        jobs.delete_job(posted.job.id, &other),
        Err(ServiceError::Authorization(_))
    ));
    assert_eq!(jobs.get_job(posted.job.id).unwrap(), posted);
}

#[test]
fn owner_can_edit_reopen_and_clear_timezone() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let owner = actor(store, Role::Employer, "Owner");
    let acme = company(store, &owner, "Acme");
    let jobs = JobService::new(store);
    let mut with_zone = draft("Backend", &["Rust"]);
    with_zone.timezone = Some("UTC+1".to_string());
    let posted = post_job(store, &owner, &acme, with_zone);

    let edited = jobs
        .update_job(
            posted.job.id,
            &owner,
            &JobPatch {
                title: Some(" Senior Backend ".to_string()),
                tech_stack: Some(vec!["Rust".to_string(), "Postgres".to_string()]),
                timezone: Some(None),
                status: Some(JobStatus::Closed),
                ..JobPatch::default()
            },
        )
        .unwrap();
    assert_eq!(edited.job.title, "Senior Backend");
    assert_eq!(edited.job.tech_stack, vec!["Rust", "Postgres"]);
    assert_eq!(edited.job.timezone, None);
    assert_eq!(edited.job.status, JobStatus::Closed);

    let reopened = jobs
        .update_job(posted.job.id, &owner, &JobPatch::status(JobStatus::Open))
        .unwrap();
    assert!(reopened.job.is_open());
}

#[test]
fn invalid_patch_leaves_job_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let owner = actor(store, Role::Employer, "Owner");
    let acme = company(store, &owner, "Acme");
    let jobs = JobService::new(store);
    let posted = post_job(store, &owner, &acme, draft("Backend", &["Rust"]));

    let err = jobs
        .update_job(
            posted.job.id,
            &owner,
            &JobPatch {
                title: Some("Renamed".to_string()),
                tech_stack: Some(Vec::new()),
                ..JobPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
    assert_eq!(jobs.get_job(posted.job.id).unwrap().job.title, "Backend");
}

#[test]
fn missing_job_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let owner = actor(store, Role::Employer, "Owner");
    let jobs = JobService::new(store);
    let missing = Uuid::new_v4();

    assert!(matches!(
        jobs.get_job(missing),
        Err(ServiceError::NotFound { entity: "job", .. })
    ));
    assert!(matches!(
        jobs.delete_job(missing, &owner),
        Err(ServiceError::NotFound { .. })
    ));
}

#[test]
fn deleting_job_removes_its_applications_and_bookmarks() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let owner = actor(store, Role::Employer, "Owner");
    let developer = actor(store, Role::Developer, "Dev");
    let acme = company(store, &owner, "Acme");
    let posted = post_job(store, &owner, &acme, draft("Backend", &["Rust"]));

    ApplicationService::new(store)
        .apply_to_job(posted.job.id, &developer, "https://cv.example/dev", None)
        .unwrap();
    assert!(BookmarkService::new(store)
        .toggle_bookmark(posted.job.id, &developer)
        .unwrap());

    JobService::new(store).delete_job(posted.job.id, &owner).unwrap();
    assert_eq!(count_rows(&conn, "jobs"), 0);
    assert_eq!(count_rows(&conn, "applications"), 0);
    assert_eq!(count_rows(&conn, "bookmarks"), 0);
}

#[test]
fn corrupt_stored_job_reads_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let employer = actor(store, Role::Employer, "E");
    let acme = company(store, &employer, "Acme");
    let posted = post_job(store, &employer, &acme, draft("Backend", &["Rust"]));
    conn.execute(
        "UPDATE jobs SET tech_stack = '[]' WHERE id = ?1;",
        [posted.job.id.to_string()],
    )
    .unwrap();

    let jobs = JobService::new(store);
    assert!(matches!(
        jobs.get_job(posted.job.id),
        Err(ServiceError::Collaborator(RepoError::InvalidData(_)))
    ));
    assert!(matches!(
        jobs.list_open_jobs(&JobFilters::default()),
        Err(ServiceError::Collaborator(RepoError::InvalidData(_)))
    ));
}

#[test]
fn timestamps_have_millisecond_resolution() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let employer = actor(store, Role::Employer, "E");
    let acme = company(store, &employer, "Acme");

    let first = post_job(store, &employer, &acme, draft("First", &["Rust"]));
    std::thread::sleep(std::time::Duration::from_millis(25));
    let second = post_job(store, &employer, &acme, draft("Second", &["Rust"]));

    let gap = second.job.created_at - first.job.created_at;
    assert!(gap >= 20, "created_at gap was {gap}ms");
    assert!(gap < 1_000, "created_at gap was {gap}ms");
}
