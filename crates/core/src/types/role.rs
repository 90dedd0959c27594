//! User roles.

use serde::{Deserialize, Serialize};

/// Role attached to an account by the backend.
///
/// The client never enforces authorization - the role is only used for
/// advisory behavior such as picking a post-login landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular account with self-service access only.
    #[default]
    User,
    /// Administrator with access to the user-management dashboard.
    Admin,
}

impl UserRole {
    /// Suggested landing page after a successful login.
    ///
    /// Advisory only; the backend remains the authority on what the
    /// session may actually access.
    #[must_use]
    pub const fn dashboard_path(self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::User => "/user/dashboard",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_path() {
        assert_eq!(UserRole::Admin.dashboard_path(), "/admin/dashboard");
        assert_eq!(UserRole::User.dashboard_path(), "/user/dashboard");
    }

    #[test]
    fn test_serde_rename() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        let role: UserRole = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, UserRole::User);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("root".parse::<UserRole>().is_err());
    }
}
