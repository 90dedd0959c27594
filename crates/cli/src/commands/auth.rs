//! Session commands: signup, login, whoami, logout.
//!
//! # Usage
//!
//! ```bash
//! # Create an account
//! userdeck signup -f Ada -l Lovelace -e ada@example.com -p 'Sup3rSecret'
//!
//! # Log in (the token is persisted for later commands)
//! userdeck login -e ada@example.com -p 'Sup3rSecret'
//!
//! # Show the account the stored token belongs to
//! userdeck whoami
//!
//! # Drop the stored token
//! userdeck logout
//! ```
//!
//! # Environment Variables
//!
//! - `USERDECK_API_URL` - Backend origin
//! - `USERDECK_TOKEN_FILE` - Where the bearer token is persisted
//! - `USERDECK_REPUTATION_API_KEY` - Enables the signup email-domain check

use secrecy::SecretString;
use userdeck_client::auth::SignupForm;
use userdeck_client::{ClientConfig, EmailVerifier};
use userdeck_core::Email;

use super::{CliError, client};

/// Register a new account and persist the returned token.
///
/// When a reputation API key is configured, the email's domain is checked
/// first; a rejected domain aborts before any account is created. An
/// unreachable reputation service does not block signup.
pub async fn signup(
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    let config = ClientConfig::from_env()?;
    let api = userdeck_client::ApiClient::new(&config);

    if let Some(reputation) = config.reputation
        && let Ok(parsed) = Email::parse(email)
    {
        let verdict = EmailVerifier::new(reputation).check(&parsed).await;
        if !verdict.is_valid {
            return Err(userdeck_client::ApiError::validation(verdict.message).into());
        }
        tracing::info!("Email domain check: {}", verdict.message);
    }

    let form = SignupForm::new(first_name, last_name, email, SecretString::from(password));
    let payload = api.signup(form, None).await?;

    tracing::info!(
        "Account created: {} <{}>",
        payload.user.full_name(),
        payload.user.email
    );
    Ok(())
}

/// Log in and persist the returned token.
pub async fn login(email: &str, password: &str) -> Result<(), CliError> {
    let api = client()?;
    let outcome = api.login(email, &SecretString::from(password)).await?;

    tracing::info!(
        "Logged in as {} <{}> ({})",
        outcome.user.full_name(),
        outcome.user.email,
        outcome.user.role
    );
    tracing::info!("Dashboard: {}", outcome.redirect_to);
    Ok(())
}

/// Show the account the stored token belongs to.
pub async fn whoami() -> Result<(), CliError> {
    let api = client()?;
    let user = api.current_user().await?;

    tracing::info!("{} <{}>", user.full_name(), user.email);
    tracing::info!("Role: {}", user.role);
    tracing::info!("Active: {}", user.is_active);
    if let Some(phone) = &user.phone_number {
        tracing::info!("Phone: {phone}");
    }
    Ok(())
}

/// End the session and drop the stored token.
pub async fn logout() -> Result<(), CliError> {
    let api = client()?;
    api.logout().await?;
    tracing::info!("Logged out");
    Ok(())
}
