//! Username and password rules for registration.
//!
//! Both the JSON request check and [`register`](super::register) read these
//! rules, so a request that passes one passes the other.

use thiserror::Error;

use super::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 32;

/// A broken registration rule.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("username must be {MIN_USERNAME_LENGTH} to {MAX_USERNAME_LENGTH} characters")]
    UsernameLength,

    #[error("username may only contain letters, digits and underscores")]
    UsernameChars,

    #[error("password must be {MIN_PASSWORD_LENGTH} to {MAX_PASSWORD_LENGTH} characters")]
    PasswordLength,

    #[error("password must differ from the username")]
    PasswordIsUsername,
}

impl ValidationError {
    /// Request field the rule applies to.
    pub fn field(self) -> &'static str {
        match self {
            Self::UsernameLength | Self::UsernameChars => "username",
            Self::PasswordLength | Self::PasswordIsUsername => "password",
        }
    }

    /// Machine-readable rule name.
    pub fn code(self) -> &'static str {
        match self {
            Self::UsernameLength => "username_length",
            Self::UsernameChars => "username_chars",
            Self::PasswordLength => "password_length",
            Self::PasswordIsUsername => "password_is_username",
        }
    }
}

fn char_len_within(value: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&value.chars().count())
}

/// Every rule the credentials break, username rules first.
pub fn registration_violations(username: &str, password: &str) -> Vec<ValidationError> {
    let mut broken = Vec::new();

    if !char_len_within(username, MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH) {
        broken.push(ValidationError::UsernameLength);
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        broken.push(ValidationError::UsernameChars);
    }
    if !char_len_within(password, MIN_PASSWORD_LENGTH, MAX_PASSWORD_LENGTH) {
        broken.push(ValidationError::PasswordLength);
    }
    if password.eq_ignore_ascii_case(username) {
        broken.push(ValidationError::PasswordIsUsername);
    }

    broken
}

/// First broken rule, if any.
pub fn validate_registration(username: &str, password: &str) -> Result<(), ValidationError> {
    match registration_violations(username, password).first() {
        Some(&broken) => Err(broken),
        None => Ok(()),
    }
}
