//! Authentication module.
//!
//! Password hashing, token issuance and verification, login orchestration,
//! and user registration.

mod authenticator;
mod password;
mod registration;
mod token;
pub mod validation;

pub use authenticator::{Authenticator, LoginOutcome};
pub use password::{CredentialHasher, PasswordError, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
pub use registration::{register, RegistrationError, RegistrationRequest};
pub use token::{Claims, TokenCodec, TokenError, TokenStatus};
pub use validation::{registration_violations, ValidationError};
