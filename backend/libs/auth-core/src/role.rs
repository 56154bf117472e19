use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User role enum matching the database `user_role` type
///
/// An unknown or absent role never compares equal to `Administrator`;
/// callers that parse roles from untrusted claims fall back to `User`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, utoipa::ToSchema,
)]
#[sqlx(type_name = "user_role")]
pub enum UserRole {
    #[default]
    User,
    Administrator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "User",
            UserRole::Administrator => "Administrator",
        }
    }

    /// Check whether this role carries elevated privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Administrator)
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(UserRole::User),
            "Administrator" => Ok(UserRole::Administrator),
            other => Err(format!("unknown user role: {}", other)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!("User".parse::<UserRole>().unwrap(), UserRole::User);
        assert_eq!(
            "Administrator".parse::<UserRole>().unwrap(),
            UserRole::Administrator
        );
    }

    #[test]
    fn test_unknown_role_falls_back_to_user() {
        let role: UserRole = "Moderator".parse().unwrap_or_default();
        assert_eq!(role, UserRole::User);
        assert!(!role.is_admin());
    }

    #[test]
    fn test_is_admin() {
        assert!(UserRole::Administrator.is_admin());
        assert!(!UserRole::User.is_admin());
    }
}
