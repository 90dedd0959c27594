//! API errors.
//!
//! The backend speaks three dialects of failure: validation problems the
//! client catches before any network call, transport failures, and
//! server-reported errors with a message in the JSON body. All three
//! collapse into [`ApiError`]. Callers can match on the kind, while the
//! `Display` output is finished user-facing copy that can be shown as-is.

use thiserror::Error;

/// Result alias returned by every network-calling function in this crate.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors surfaced by the API access layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input rejected client-side; no request was issued.
    #[error("{0}")]
    Validation(String),

    /// An authenticated operation was attempted without a stored token.
    #[error("No authentication token found")]
    NotAuthenticated,

    /// HTTP 409 - the signup email is already taken. The fixed message
    /// overrides whatever the response body said.
    #[error("This email is already registered. Please try logging in instead.")]
    EmailAlreadyRegistered,

    /// HTTP 422 - the submission was rejected. Fixed message, body ignored.
    #[error("Please check your information and try again.")]
    InvalidSubmission,

    /// Any other non-2xx status, with the message extracted from the JSON
    /// body (or the status reason phrase when the body is not JSON).
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Human-readable message.
        message: String,
    },

    /// The request never completed (connection refused, DNS, timeout).
    #[error("Failed to connect to server. Please check if the backend is running.")]
    Transport(#[source] reqwest::Error),

    /// A 2xx response carried a body this crate could not decode.
    #[error("Unexpected response from server: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ApiError {
    /// Build a [`ApiError::Validation`] from any message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status associated with this error, when one exists.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::EmailAlreadyRegistered => Some(409),
            Self::InvalidSubmission => Some(422),
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}
