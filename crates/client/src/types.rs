//! Wire types shared across endpoint modules.
//!
//! The backend wraps every success body in `{ success, message?, data }`;
//! endpoint modules deserialize the `data` payload they care about and
//! leave the rest loosely typed.

use serde::Deserialize;
use userdeck_core::User;

/// Standard success envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    /// Backend-reported success flag (informational - the HTTP status is
    /// what this crate branches on).
    #[serde(default)]
    pub success: bool,
    /// Optional human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Endpoint-specific payload.
    pub data: T,
}

/// `data` payload of login, signup, and admin login.
#[derive(Debug, Deserialize)]
pub struct AuthPayload {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The authenticated account.
    pub user: User,
}

/// `data` payload of `GET /api/auth/me`.
#[derive(Debug, Deserialize)]
pub struct SessionPayload {
    /// The account the token belongs to.
    pub user: User,
}

/// Result of a session check.
#[derive(Debug)]
pub enum SessionState {
    /// A token is present and the backend vouched for it.
    Authenticated(Box<User>),
    /// No token, or the backend rejected it.
    Anonymous {
        /// Why the session is not authenticated.
        reason: String,
    },
}

impl SessionState {
    /// Whether the session is authenticated.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The authenticated user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous { .. } => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_decodes_nested_auth_payload() {
        let json = serde_json::json!({
            "success": true,
            "data": {
                "token": "jwt-abc",
                "user": {
                    "id": "u1",
                    "firstName": "Ada",
                    "lastName": "Lovelace",
                    "email": "ada@example.com",
                    "role": "user"
                }
            }
        });
        let envelope: Envelope<AuthPayload> = serde_json::from_value(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.token, "jwt-abc");
        assert_eq!(envelope.data.user.email, "ada@example.com");
    }

    #[test]
    fn test_session_state_accessors() {
        let anonymous = SessionState::Anonymous {
            reason: "No authentication token found".to_owned(),
        };
        assert!(!anonymous.is_authenticated());
        assert!(anonymous.user().is_none());
    }
}
