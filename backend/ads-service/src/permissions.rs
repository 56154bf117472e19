use auth_core::AuthenticatedUser;
use uuid::Uuid;

use crate::error::AppError;

/// Authorization predicate over `(actor, record author)` pairs
///
/// Evaluated per request after the target record has been located and before
/// any mutation is applied. Predicates are pure; composition happens with
/// `Either`.
pub trait AccessRule {
    fn allows(&self, actor: &AuthenticatedUser, record_author: Option<Uuid>) -> bool;
}

/// Grants access when the actor authored the record
///
/// A record whose author was deleted (author is None) has no owner, so
/// ownership never matches.
pub struct IsAuthor;

impl AccessRule for IsAuthor {
    fn allows(&self, actor: &AuthenticatedUser, record_author: Option<Uuid>) -> bool {
        record_author == Some(actor.id)
    }
}

/// Grants access to administrators regardless of authorship
pub struct IsAdministrator;

impl AccessRule for IsAdministrator {
    fn allows(&self, actor: &AuthenticatedUser, _record_author: Option<Uuid>) -> bool {
        actor.role.is_admin()
    }
}

/// OR-combinator: allows when either rule allows
pub struct Either<A, B>(pub A, pub B);

impl<A: AccessRule, B: AccessRule> AccessRule for Either<A, B> {
    fn allows(&self, actor: &AuthenticatedUser, record_author: Option<Uuid>) -> bool {
        self.0.allows(actor, record_author) || self.1.allows(actor, record_author)
    }
}

/// The mutation policy for advertisements and reviews
pub fn author_or_admin() -> Either<IsAuthor, IsAdministrator> {
    Either(IsAuthor, IsAdministrator)
}

/// Evaluate the mutation policy, mapping denial to 403
pub fn ensure_can_modify(
    actor: &AuthenticatedUser,
    record_author: Option<Uuid>,
) -> Result<(), AppError> {
    if author_or_admin().allows(actor, record_author) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You do not have permission to modify this resource".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth_core::UserRole;

    fn actor(id: Uuid, role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            email: "user@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_author_allowed_regardless_of_role() {
        let author_id = Uuid::new_v4();
        let user = actor(author_id, UserRole::User);
        assert!(author_or_admin().allows(&user, Some(author_id)));
    }

    #[test]
    fn test_other_user_denied() {
        let author_id = Uuid::new_v4();
        let stranger = actor(Uuid::new_v4(), UserRole::User);
        assert!(!author_or_admin().allows(&stranger, Some(author_id)));
        assert!(ensure_can_modify(&stranger, Some(author_id)).is_err());
    }

    #[test]
    fn test_admin_allowed_without_authorship() {
        let author_id = Uuid::new_v4();
        let admin = actor(Uuid::new_v4(), UserRole::Administrator);
        assert!(author_or_admin().allows(&admin, Some(author_id)));
        assert!(ensure_can_modify(&admin, Some(author_id)).is_ok());
    }

    #[test]
    fn test_orphaned_record_only_admin_allowed() {
        let user = actor(Uuid::new_v4(), UserRole::User);
        let admin = actor(Uuid::new_v4(), UserRole::Administrator);
        assert!(!author_or_admin().allows(&user, None));
        assert!(author_or_admin().allows(&admin, None));
    }

    #[test]
    fn test_denial_maps_to_forbidden() {
        let stranger = actor(Uuid::new_v4(), UserRole::User);
        match ensure_can_modify(&stranger, Some(Uuid::new_v4())) {
            Err(AppError::Forbidden(_)) => {}
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }
}
