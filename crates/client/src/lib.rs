//! Userdeck Client - Typed bindings for the user-management REST backend.
//!
//! Everything business-logical (persistence, password hashing, token
//! issuance, authorization) lives in the external backend; this crate is
//! the single choke point that turns logical operations into HTTP requests
//! and every response into an [`ApiResult`].
//!
//! # Contract
//!
//! - Every operation returns [`ApiResult`]; no panic and no raw transport
//!   error ever crosses this crate's boundary.
//! - Client-side validation runs before any network call and short-circuits
//!   with [`ApiError::Validation`].
//! - Authenticated operations read the bearer token from a [`TokenStore`]
//!   and short-circuit with [`ApiError::NotAuthenticated`] when it is
//!   absent. The authoritative check remains the backend's.
//! - Login and signup persist the returned token; logout always clears it,
//!   even when the network call fails.
//! - No retry, no backoff, no client-side token expiry tracking.
//!
//! # Modules
//!
//! - [`auth`] - signup, login, session, and self-service profile operations
//! - [`account`] - `/api/user` profile management
//! - [`admin`] - `/api/admin` user management, stats, bulk ops, export
//! - [`email_check`] - fail-open email-domain reputation lookups
//! - [`token`] - bearer-token storage

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod admin;
pub mod auth;
pub mod config;
pub mod email_check;
mod error;
mod http;
pub mod token;
pub mod types;

pub use config::{ClientConfig, ConfigError, ReputationConfig};
pub use email_check::{EmailVerdict, EmailVerifier};
pub use error::{ApiError, ApiResult};
pub use http::ApiClient;
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
