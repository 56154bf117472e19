/// Authorization predicate scenarios
///
/// This test module covers:
/// - Ownership grants regardless of role
/// - Administrator grants regardless of authorship
/// - Denial when neither predicate holds
use uuid::Uuid;

use ads_service::error::AppError;
use ads_service::permissions::{author_or_admin, ensure_can_modify, AccessRule};
use auth_core::{AuthenticatedUser, UserRole};

fn actor(id: Uuid, role: UserRole) -> AuthenticatedUser {
    AuthenticatedUser {
        id,
        email: "actor@example.com".to_string(),
        role,
    }
}

// ============================================================================
// Ownership
// ============================================================================

#[test]
fn test_author_may_modify_own_record() {
    let author_id = Uuid::new_v4();
    let user = actor(author_id, UserRole::User);

    assert!(author_or_admin().allows(&user, Some(author_id)));
    assert!(ensure_can_modify(&user, Some(author_id)).is_ok());
}

#[test]
fn test_admin_author_may_modify_own_record() {
    let author_id = Uuid::new_v4();
    let admin = actor(author_id, UserRole::Administrator);

    assert!(author_or_admin().allows(&admin, Some(author_id)));
}

// ============================================================================
// Elevated role
// ============================================================================

#[test]
fn test_admin_may_modify_any_record() {
    let admin = actor(Uuid::new_v4(), UserRole::Administrator);
    let someone_elses = Some(Uuid::new_v4());

    assert!(author_or_admin().allows(&admin, someone_elses));
    assert!(ensure_can_modify(&admin, someone_elses).is_ok());
}

#[test]
fn test_admin_may_modify_orphaned_record() {
    let admin = actor(Uuid::new_v4(), UserRole::Administrator);
    assert!(author_or_admin().allows(&admin, None));
}

// ============================================================================
// Denial
// ============================================================================

#[test]
fn test_stranger_denied() {
    let stranger = actor(Uuid::new_v4(), UserRole::User);
    let someone_elses = Some(Uuid::new_v4());

    assert!(!author_or_admin().allows(&stranger, someone_elses));
    match ensure_can_modify(&stranger, someone_elses) {
        Err(AppError::Forbidden(_)) => {}
        other => panic!("expected Forbidden, got {:?}", other),
    }
}

#[test]
fn test_regular_user_denied_on_orphaned_record() {
    let user = actor(Uuid::new_v4(), UserRole::User);
    assert!(!author_or_admin().allows(&user, None));
}

#[test]
fn test_decision_is_pure() {
    let author_id = Uuid::new_v4();
    let stranger = actor(Uuid::new_v4(), UserRole::User);

    for _ in 0..3 {
        assert!(!author_or_admin().allows(&stranger, Some(author_id)));
    }
}
