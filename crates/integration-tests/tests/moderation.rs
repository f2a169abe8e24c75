//! Administrator moderation tests.

use pet_portal::ErrorKind;
use pet_portal_core::{ShelterId, ShelterState, UserId};
use pet_portal_integration_tests::{GREEN_PAWS, TestContext};

#[test]
fn test_blocking_revokes_approval_and_unblocking_does_not_restore_it() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let green_paws = ShelterId::new("shelter-1");

    let blocked = ctx
        .portal
        .admin_toggle_shelter_block(&admin, &green_paws)
        .unwrap();
    assert!(blocked.blocked);
    assert!(!blocked.approved);
    assert_eq!(blocked.state(), ShelterState::Blocked);

    let err = ctx
        .portal
        .authenticate(GREEN_PAWS.0, GREEN_PAWS.1)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Blocked);

    let unblocked = ctx
        .portal
        .admin_toggle_shelter_block(&admin, &green_paws)
        .unwrap();
    assert!(!unblocked.blocked);
    assert!(!unblocked.approved);
    assert_eq!(unblocked.state(), ShelterState::Unapproved);

    let err = ctx
        .portal
        .authenticate(GREEN_PAWS.0, GREEN_PAWS.1)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PendingApproval);
}

#[test]
fn test_approving_clears_block() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let green_paws = ShelterId::new("shelter-1");
    ctx.portal
        .admin_toggle_shelter_block(&admin, &green_paws)
        .unwrap();

    let approved = ctx.portal.admin_approve_shelter(&admin, &green_paws).unwrap();
    assert!(approved.approved);
    assert!(!approved.blocked);
    let _session = ctx.green_paws();
}

#[test]
fn test_approve_all_skips_blocked_shelters() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    ctx.portal
        .admin_toggle_shelter_block(&admin, &ShelterId::new("shelter-1"))
        .unwrap();

    let approved = ctx.portal.admin_approve_all_shelters(&admin).unwrap();
    assert_eq!(approved, 1);
    assert_eq!(ctx.portal.stats().verified_shelters, 1);
    assert_eq!(ctx.portal.admin_approve_all_shelters(&admin).unwrap(), 0);
}

#[test]
fn test_user_block_toggles() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let aarav = UserId::new("user-1");

    assert!(ctx.portal.admin_toggle_user_block(&admin, &aarav).unwrap().blocked);
    assert!(!ctx.portal.admin_toggle_user_block(&admin, &aarav).unwrap().blocked);
    let _session = ctx.adopter();
}

#[test]
fn test_unknown_targets_are_not_found() {
    let ctx = TestContext::new();
    let admin = ctx.admin();

    let err = ctx
        .portal
        .admin_toggle_shelter_block(&admin, &ShelterId::new("shelter-404"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = ctx
        .portal
        .admin_toggle_user_block(&admin, &UserId::new("user-404"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
