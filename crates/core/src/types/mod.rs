//! Shared domain types.

mod email;
mod password;
mod role;
mod user;

pub use email::{Email, EmailError};
pub use password::{PasswordError, validate_new_password, validate_signup_password};
pub use role::UserRole;
pub use user::{Address, Gender, SocialLinks, User};
