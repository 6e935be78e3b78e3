use jobboard_core::db::open_db_in_memory;
use jobboard_core::{
    IdentityError, IdentityProvider, Role, SignUpRequest, SqliteIdentityProvider,
};

fn sign_up_request(email: &str, role: Role) -> SignUpRequest {
    SignUpRequest {
        email: email.to_string(),
        password: "hunter22".to_string(),
        confirm_password: "hunter22".to_string(),
        full_name: "Casey Example".to_string(),
        role,
    }
}

#[test]
fn sign_up_creates_profile_and_session() {
    let conn = open_db_in_memory().unwrap();
    let identity = SqliteIdentityProvider::try_new(&conn).unwrap();

    let session = identity
        .sign_up(&sign_up_request("casey@example.com", Role::Employer))
        .unwrap();
    assert_eq!(session.profile.role, Role::Employer);
    assert_eq!(session.profile.full_name, "Casey Example");
    assert_eq!(session.actor().profile_id, session.profile.id);

    let current = identity.current_user(&session.token).unwrap().unwrap();
    assert_eq!(current.profile, session.profile);
}

#[test]
fn sign_up_rejects_duplicate_email_ignoring_case() {
    let conn = open_db_in_memory().unwrap();
    let identity = SqliteIdentityProvider::try_new(&conn).unwrap();

    identity
        .sign_up(&sign_up_request("dev@example.com", Role::Developer))
        .unwrap();
    let err = identity
        .sign_up(&sign_up_request("DEV@Example.com", Role::Employer))
        .unwrap_err();
    assert!(matches!(err, IdentityError::Conflict(_)));

    let profiles: i64 = conn
        .query_row("SELECT COUNT(*) FROM profiles;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(profiles, 1);
}

#[test]
fn sign_in_checks_password() {
    let conn = open_db_in_memory().unwrap();
    let identity = SqliteIdentityProvider::try_new(&conn).unwrap();
    let created = identity
        .sign_up(&sign_up_request("dev@example.com", Role::Developer))
        .unwrap();

    let session = identity.sign_in("Dev@example.com", "hunter22").unwrap();
    assert_eq!(session.profile.id, created.profile.id);
    assert_ne!(session.token, created.token);

    assert!(matches!(
        identity.sign_in("dev@example.com", "wrong-password"),
        Err(IdentityError::InvalidCredentials)
    ));
    assert!(matches!(
        identity.sign_in("nobody@example.com", "hunter22"),
        Err(IdentityError::InvalidCredentials)
    ));
}

#[test]
fn sign_out_ends_session_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let identity = SqliteIdentityProvider::try_new(&conn).unwrap();
    let session = identity
        .sign_up(&sign_up_request("dev@example.com", Role::Developer))
        .unwrap();

    identity.sign_out(&session.token).unwrap();
    identity.sign_out(&session.token).unwrap();
    assert!(identity.current_user(&session.token).unwrap().is_none());
}

#[test]
fn invalid_sign_up_creates_nothing() {
    let conn = open_db_in_memory().unwrap();
    let identity = SqliteIdentityProvider::try_new(&conn).unwrap();

    let mut request = sign_up_request("dev@example.com", Role::Developer);
    request.confirm_password = "different".to_string();
    assert!(matches!(
        identity.sign_up(&request),
        Err(IdentityError::Validation(_))
    ));

    let accounts: i64 = conn
        .query_row("SELECT COUNT(*) FROM accounts;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(accounts, 0);
}
