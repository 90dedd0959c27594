//! Userdeck Core - Shared types library.
//!
//! This crate provides common types used across all Userdeck components:
//! - `client` - Typed bindings for the user-management REST backend
//! - `cli` - Command-line tools built on top of the client
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Emails, password policy, roles, and user wire models

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
