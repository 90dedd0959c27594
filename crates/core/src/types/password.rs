//! Password policy.
//!
//! The backend enforces its own rules; these checks exist so a signup or
//! password change with an obviously unacceptable password never reaches
//! the network at all.

/// Errors produced by password validation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PasswordError {
    /// The password is shorter than the required minimum.
    #[error("Password must be at least {min} characters long")]
    TooShort {
        /// Minimum required length.
        min: usize,
    },
    /// The password is missing a required character class.
    #[error(
        "Password must contain at least one uppercase letter, one lowercase letter, and one number"
    )]
    MissingCharacterClass,
}

/// Minimum length for a new account's password.
pub const SIGNUP_MIN_LENGTH: usize = 8;

/// Minimum length when changing an existing password.
pub const CHANGE_MIN_LENGTH: usize = 6;

/// Validate a password for account creation.
///
/// Requires at least [`SIGNUP_MIN_LENGTH`] characters and one lowercase
/// letter, one uppercase letter, and one ASCII digit.
///
/// # Errors
///
/// Returns [`PasswordError::TooShort`] or
/// [`PasswordError::MissingCharacterClass`].
pub fn validate_signup_password(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < SIGNUP_MIN_LENGTH {
        return Err(PasswordError::TooShort {
            min: SIGNUP_MIN_LENGTH,
        });
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if has_lower && has_upper && has_digit {
        Ok(())
    } else {
        Err(PasswordError::MissingCharacterClass)
    }
}

/// Validate a replacement password for the change-password operation.
///
/// # Errors
///
/// Returns [`PasswordError::TooShort`] if shorter than
/// [`CHANGE_MIN_LENGTH`].
pub fn validate_new_password(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < CHANGE_MIN_LENGTH {
        return Err(PasswordError::TooShort {
            min: CHANGE_MIN_LENGTH,
        });
    }
    Ok(())
}
