//! Role-based access checks.
//!
//! A role check is a structural set-membership test: each guarded endpoint
//! names the set of roles it admits. New role values work without touching
//! this module.

use bookly_core::error::AppError;
use bookly_core::result::AppResult;
use bookly_entity::user::UserRole;

/// Returns whether `role` is a member of the allowed set.
pub fn is_member(role: &UserRole, allowed: &[UserRole]) -> bool {
    allowed.contains(role)
}

/// Fails with `Forbidden` unless `role` is a member of the allowed set.
pub fn require_any(role: &UserRole, allowed: &[UserRole]) -> AppResult<()> {
    if is_member(role, allowed) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "Role '{role}' is not permitted to perform this action"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookly_core::error::ErrorKind;

    #[test]
    fn test_user_not_in_admin_only_set() {
        let err = require_any(&UserRole::User, &[UserRole::Admin]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_admin_in_mixed_set() {
        assert!(require_any(&UserRole::Admin, &[UserRole::Admin, UserRole::User]).is_ok());
    }

    #[test]
    fn test_membership_is_structural() {
        assert!(is_member(&UserRole::User, &[UserRole::User]));
        assert!(!is_member(&UserRole::User, &[]));
    }
}
