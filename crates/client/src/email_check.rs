//! Fail-open email-domain reputation checks.
//!
//! [`EmailVerifier`] asks an external reputation service about the domain
//! of a signup email before the account is created. The check is advisory:
//! when the service is unreachable, times out, returns a non-2xx status,
//! or answers in a shape we do not recognize, the verdict is "valid" so an
//! upstream outage never blocks a legitimate signup.

use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use userdeck_core::Email;

use crate::config::ReputationConfig;

/// Risk score above which a domain is rejected.
const RISK_THRESHOLD: u32 = 50;

/// Outcome of a reputation check.
///
/// `is_valid` drives the signup flow; `message` is suitable for showing to
/// the user as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailVerdict {
    pub is_valid: bool,
    pub message: String,
}

impl EmailVerdict {
    fn valid(message: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            message: message.into(),
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
        }
    }

    /// The fallback verdict used whenever the service cannot answer.
    fn service_unavailable() -> Self {
        Self::valid("Email validation service unavailable, proceeding with signup")
    }
}

/// Response shape of the reputation service.
#[derive(Debug, Deserialize)]
struct ReputationReport {
    #[serde(default)]
    valid: Option<bool>,
    #[serde(default)]
    block: bool,
    #[serde(default)]
    disposable: bool,
    #[serde(default)]
    risk: Option<u32>,
    #[serde(default)]
    text: Option<String>,
}

/// Client for the domain-reputation service.
#[derive(Clone)]
pub struct EmailVerifier {
    http: reqwest::Client,
    config: ReputationConfig,
}

impl std::fmt::Debug for EmailVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailVerifier")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl EmailVerifier {
    #[must_use]
    pub fn new(config: ReputationConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Check the reputation of an email's domain.
    ///
    /// Never fails: any problem talking to the service produces the
    /// fail-open verdict instead of an error.
    #[instrument(skip(self), fields(domain = %email.domain()))]
    pub async fn check(&self, email: &Email) -> EmailVerdict {
        let url = format!(
            "{}/?domain={}",
            self.config.base_url,
            urlencoding::encode(email.domain())
        );

        let response = match self
            .http
            .get(&url)
            .header("x-rapidapi-key", self.config.api_key.expose_secret())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "reputation service unreachable");
                return EmailVerdict::service_unavailable();
            }
        };

        if !response.status().is_success() {
            warn!(status = %response.status(), "reputation service returned an error");
            return EmailVerdict::service_unavailable();
        }

        match response.json::<ReputationReport>().await {
            Ok(report) => {
                let verdict = Self::classify(&report);
                debug!(is_valid = verdict.is_valid, "reputation check complete");
                verdict
            }
            Err(e) => {
                warn!(error = %e, "reputation response was not parseable");
                EmailVerdict::service_unavailable()
            }
        }
    }

    /// Turn a service report into a verdict.
    ///
    /// Rejection reasons are checked in order of severity: outright block,
    /// then disposable-domain, then risk score. A report that claims
    /// neither validity nor invalidity is treated as valid.
    fn classify(report: &ReputationReport) -> EmailVerdict {
        match report.valid {
            Some(true) => {
                if report.block {
                    EmailVerdict::invalid("Email domain is blacklisted")
                } else if report.disposable {
                    EmailVerdict::invalid("Disposable/temporary email addresses are not allowed")
                } else if report.risk.is_some_and(|r| r > RISK_THRESHOLD) {
                    EmailVerdict::invalid("Email domain has high risk score")
                } else {
                    EmailVerdict::valid(
                        report.text.clone().unwrap_or_else(|| "Email is valid".to_owned()),
                    )
                }
            }
            Some(false) => EmailVerdict::invalid(
                report
                    .text
                    .clone()
                    .unwrap_or_else(|| "Email domain is invalid".to_owned()),
            ),
            None => EmailVerdict::valid("Email appears to be valid"),
        }
    }
}
