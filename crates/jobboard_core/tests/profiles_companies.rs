mod common;

use common::{actor, count_rows, store};
use jobboard_core::db::open_db_in_memory;
use jobboard_core::{
    CompanyDraft, CompanyService, ModelValidationError, ProfilePatch, ProfileService, Role,
    ServiceError,
};
use uuid::Uuid;

#[test]
fn developer_updates_own_profile_with_normalized_skills() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let developer = actor(store, Role::Developer, "Dev");
    let profiles = ProfileService::new(store);

    let updated = profiles
        .update_profile(
            &developer,
            &ProfilePatch {
                full_name: " Dev Eloper ".to_string(),
                bio: Some("Builds things".to_string()),
                skills: vec![
                    "Rust".to_string(),
                    " ".to_string(),
                    "SQL".to_string(),
                    "Rust".to_string(),
                ],
                portfolio_url: Some("".to_string()),
            },
        )
        .unwrap();
    assert_eq!(updated.full_name, "Dev Eloper");
    assert_eq!(updated.role, Role::Developer);
    assert_eq!(
        updated.skills,
        Some(vec!["Rust".to_string(), "SQL".to_string()])
    );
    assert_eq!(updated.portfolio_url, None);
    assert_eq!(profiles.get_profile(developer.profile_id).unwrap(), updated);

    let cleared = profiles
        .update_profile(
            &developer,
            &ProfilePatch {
                full_name: "Dev".to_string(),
                ..ProfilePatch::default()
            },
        )
        .unwrap();
    assert_eq!(cleared.skills, None);
    assert_eq!(cleared.bio, None);
}

#[test]
fn profile_update_requires_full_name() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let developer = actor(store, Role::Developer, "Dev");

    let err = ProfileService::new(store)
        .update_profile(&developer, &ProfilePatch::default())
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ModelValidationError::BlankField("full_name"))
    ));
}

#[test]
fn missing_profile_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);

    assert!(matches!(
        ProfileService::new(store).get_profile(Uuid::new_v4()),
        Err(ServiceError::NotFound {
            entity: "profile",
            ..
        })
    ));
}

#[test]
fn save_company_creates_then_updates_in_place() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let employer = actor(store, Role::Employer, "Emp");
    let companies = CompanyService::new(store);

    assert!(companies.get_company(&employer).unwrap().is_none());

    let created = companies
        .save_company(
            &employer,
            &CompanyDraft {
                company_name: "Acme".to_string(),
                website: Some("https://acme.example".to_string()),
                ..CompanyDraft::default()
            },
        )
        .unwrap();
    assert_eq!(created.user_id, employer.profile_id);

    let updated = companies
        .save_company(
            &employer,
            &CompanyDraft {
                company_name: "Acme Rockets".to_string(),
                description: Some("Launches".to_string()),
                ..CompanyDraft::default()
            },
        )
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.company_name, "Acme Rockets");
    assert_eq!(updated.website, None);
    assert_eq!(companies.get_company(&employer).unwrap(), Some(updated));
    assert_eq!(count_rows(&conn, "companies"), 1);
}

#[test]
fn company_management_is_employer_only_and_validated() {
    let conn = open_db_in_memory().unwrap();
    let store = store(&conn);
    let developer = actor(store, Role::Developer, "Dev");
    let employer = actor(store, Role::Employer, "Emp");
    let companies = CompanyService::new(store);
    let draft = CompanyDraft {
        company_name: "Acme".to_string(),
        ..CompanyDraft::default()
    };

    assert!(matches!(
        companies.save_company(&developer, &draft),
        Err(ServiceError::Authorization(_))
    ));
    assert!(matches!(
        companies.save_company(&employer, &CompanyDraft::default()),
        Err(ServiceError::Validation(ModelValidationError::BlankField(
            "company_name"
        )))
    ));
    assert_eq!(count_rows(&conn, "companies"), 0);
}
