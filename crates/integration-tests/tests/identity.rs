//! Registration, login and session tests.

use pet_portal::ErrorKind;
use pet_portal::models::{Account, Registration, RegistrationKind};
use pet_portal_core::{Role, ShelterId};
use pet_portal_integration_tests::{ADMIN, ADOPTER, SUNNY_TAILS, TestContext};

fn registration(kind: RegistrationKind, email: &str) -> Registration {
    Registration {
        kind,
        name: "Maya Patel".to_owned(),
        email: email.to_owned(),
        password: "Secret@99".to_owned(),
        phone: "+1 (555) 222-3333".to_owned(),
        city: "Laketown".to_owned(),
    }
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn test_registered_user_is_found_by_any_case() {
    let ctx = TestContext::new();
    let account = ctx
        .portal
        .register(&registration(RegistrationKind::User, "Maya@Example.com"))
        .unwrap();

    for email in ["maya@example.com", "MAYA@EXAMPLE.COM", "  maya@example.com "] {
        let found = ctx.portal.find_account_by_email(email).unwrap();
        assert_eq!(found.id(), account.id(), "lookup by {email:?}");
    }
}

#[test]
fn test_duplicate_email_rejected_across_account_kinds() {
    let ctx = TestContext::new();
    ctx.portal
        .register(&registration(RegistrationKind::User, "maya@example.com"))
        .unwrap();

    let err = ctx
        .portal
        .register(&registration(RegistrationKind::Shelter, "MAYA@example.com"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Duplicate);

    let err = ctx
        .portal
        .register(&registration(RegistrationKind::User, ADMIN.0))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Duplicate);
}

#[test]
fn test_weak_password_and_bad_email_are_validation_errors() {
    let ctx = TestContext::new();

    let mut weak = registration(RegistrationKind::User, "weak@example.com");
    weak.password = "short".to_owned();
    assert_eq!(
        ctx.portal.register(&weak).unwrap_err().kind(),
        ErrorKind::Validation
    );

    let bad = registration(RegistrationKind::User, "not-an-email");
    assert_eq!(
        ctx.portal.register(&bad).unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert!(ctx.portal.find_account_by_email("not-an-email").is_none());
}

// =============================================================================
// Authentication
// =============================================================================

#[test]
fn test_login_failures_map_to_kinds() {
    let ctx = TestContext::new();

    let cases = [
        ("nobody@example.com", "User@1234", ErrorKind::NotFound),
        (ADOPTER.0, "wrong-password", ErrorKind::BadCredential),
        (SUNNY_TAILS.0, SUNNY_TAILS.1, ErrorKind::PendingApproval),
    ];
    for (email, password, kind) in cases {
        let err = ctx.portal.authenticate(email, password).unwrap_err();
        assert_eq!(err.kind(), kind, "login as {email}");
    }
    assert!(ctx.portal.current_session().is_none());
}

#[test]
fn test_pending_shelter_logs_in_after_approval() {
    let ctx = TestContext::new();
    let shelter = ctx
        .portal
        .register(&registration(RegistrationKind::Shelter, "hounds@shelter.org"))
        .unwrap();
    let Account::Shelter(shelter) = shelter else {
        panic!("expected a shelter account");
    };
    assert!(!shelter.approved);

    let err = ctx
        .portal
        .authenticate("hounds@shelter.org", "Secret@99")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PendingApproval);

    let admin = ctx.admin();
    ctx.portal.admin_approve_shelter(&admin, &shelter.id).unwrap();

    let session = ctx
        .portal
        .authenticate("hounds@shelter.org", "Secret@99")
        .unwrap();
    assert_eq!(session.role, Role::Shelter);
    assert!(session.is_account(shelter.id.as_str()));
}

#[test]
fn test_blocked_user_cannot_log_in() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let user = ctx.portal.find_account_by_email(ADOPTER.0).unwrap();
    ctx.portal
        .admin_toggle_user_block(&admin, &user.id().to_user_id())
        .unwrap();

    let err = ctx.portal.authenticate(ADOPTER.0, ADOPTER.1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Blocked);
}

// =============================================================================
// Sessions
// =============================================================================

#[test]
fn test_session_role_checks() {
    let ctx = TestContext::new();
    let _session = ctx.adopter();

    assert!(ctx.portal.require_session(&[]).is_ok());
    assert!(ctx.portal.require_session(&[Role::User]).is_ok());
    assert_eq!(
        ctx.portal.require_session(&[Role::Admin]).unwrap_err().kind(),
        ErrorKind::Forbidden
    );

    ctx.portal.logout().unwrap();
    assert_eq!(
        ctx.portal.require_session(&[]).unwrap_err().kind(),
        ErrorKind::Unauthenticated
    );
}

#[test]
fn test_admin_only_operations_reject_other_roles() {
    let ctx = TestContext::new();
    let adopter = ctx.adopter();
    let shelter = ctx.green_paws();

    for session in [&adopter, &shelter] {
        let err = ctx
            .portal
            .admin_approve_shelter(session, &ShelterId::new("shelter-2"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }
}
