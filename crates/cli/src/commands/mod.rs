//! Command implementations.

pub mod admin;
pub mod auth;

use thiserror::Error;
use userdeck_client::{ApiClient, ApiError, ClientConfig, ConfigError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The backend rejected the operation or was unreachable.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Local file I/O failed (export output, mostly).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build a client from `.env` and the process environment.
pub fn client() -> Result<ApiClient, CliError> {
    dotenvy::dotenv().ok();
    let config = ClientConfig::from_env()?;
    Ok(ApiClient::new(&config))
}
