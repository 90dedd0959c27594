//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `USERDECK_API_URL` - Backend origin (default: `http://localhost:5000`)
//! - `USERDECK_TOKEN_FILE` - Bearer-token storage path
//!   (default: `$HOME/.userdeck/token`)
//! - `USERDECK_REPUTATION_API_KEY` - Domain-reputation API key; enables
//!   signup email checks
//! - `USERDECK_REPUTATION_API_URL` - Reputation service origin
//!   (default: `https://mailcheck.p.rapidapi.com`)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Default backend origin when `USERDECK_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default domain-reputation service origin.
pub const DEFAULT_REPUTATION_URL: &str = "https://mailcheck.p.rapidapi.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash.
    pub base_url: String,
    /// Path where the bearer token is persisted between runs.
    pub token_path: PathBuf,
    /// Domain-reputation service configuration (optional - signup email
    /// checks are skipped entirely when absent).
    pub reputation: Option<ReputationConfig>,
}

/// Domain-reputation service configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ReputationConfig {
    /// Service origin.
    pub base_url: String,
    /// API key sent in the `x-rapidapi-key` header.
    pub api_key: SecretString,
}

impl std::fmt::Debug for ReputationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReputationConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from the environment.
    ///
    /// Every variable is optional; unset values fall back to local-dev
    /// defaults so a freshly cloned checkout can talk to a backend on
    /// `localhost:5000` with zero setup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if `USERDECK_API_URL` or
    /// `USERDECK_REPUTATION_API_URL` has a trailing slash or is empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = match std::env::var("USERDECK_API_URL") {
            Ok(url) => validate_origin("USERDECK_API_URL", url)?,
            Err(_) => DEFAULT_API_URL.to_owned(),
        };

        let token_path = std::env::var("USERDECK_TOKEN_FILE").map_or_else(
            |_| default_token_path(),
            PathBuf::from,
        );

        let reputation = match std::env::var("USERDECK_REPUTATION_API_KEY") {
            Ok(key) if !key.is_empty() => {
                let rep_url = match std::env::var("USERDECK_REPUTATION_API_URL") {
                    Ok(url) => validate_origin("USERDECK_REPUTATION_API_URL", url)?,
                    Err(_) => DEFAULT_REPUTATION_URL.to_owned(),
                };
                Some(ReputationConfig {
                    base_url: rep_url,
                    api_key: SecretString::from(key),
                })
            }
            _ => None,
        };

        Ok(Self {
            base_url,
            token_path,
            reputation,
        })
    }

    /// Build a config pointing at an explicit origin, keeping defaults for
    /// everything else. Handy for tests and embedding.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token_path: default_token_path(),
            reputation: None,
        }
    }
}

fn default_token_path() -> PathBuf {
    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(".userdeck").join("token"),
        |home| PathBuf::from(home).join(".userdeck").join("token"),
    )
}

fn validate_origin(name: &str, url: String) -> Result<String, ConfigError> {
    if url.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            name.to_owned(),
            "must not be empty".to_owned(),
        ));
    }
    if url.ends_with('/') {
        return Err(ConfigError::InvalidEnvVar(
            name.to_owned(),
            "must not end with a slash".to_owned(),
        ));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url() {
        let config = ClientConfig::with_base_url("http://127.0.0.1:9999");
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert!(config.reputation.is_none());
    }

    #[test]
    fn test_validate_origin_rejects_trailing_slash() {
        let err = validate_origin("X", "http://localhost:5000/".to_owned());
        assert!(err.is_err());
    }

    #[test]
    fn test_validate_origin_rejects_empty() {
        assert!(validate_origin("X", String::new()).is_err());
    }

    #[test]
    fn test_reputation_debug_redacts_key() {
        let config = ReputationConfig {
            base_url: DEFAULT_REPUTATION_URL.to_owned(),
            api_key: SecretString::from("super-secret"),
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }
}
