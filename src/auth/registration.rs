//! User registration.

use thiserror::Error;
use tracing::info;

use super::authenticator::Authenticator;
use super::validation::{validate_registration, ValidationError};
use crate::db::{NewUser, User, UserRepository};
use crate::FeedError;

/// Registration-specific errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Validation failed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Username already exists.
    #[error("user is already registered")]
    UsernameExists,

    /// Hashing or storage failed.
    #[error(transparent)]
    Internal(#[from] FeedError),
}

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Desired username.
    pub username: String,
    /// Plaintext password; only its hash is stored.
    pub password: String,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Register a new user with the default role.
///
/// The username's uniqueness is enforced by the `users` table, so two
/// concurrent registrations of one name cannot both succeed. A storage error
/// other than the uniqueness conflict is reported as `Internal`, never as
/// "already registered".
pub async fn register(
    repo: &UserRepository<'_>,
    authenticator: &Authenticator,
    request: RegistrationRequest,
) -> Result<User, RegistrationError> {
    validate_registration(&request.username, &request.password)?;

    // Cheap early exit before paying for the hash
    if repo.username_exists(&request.username).await? {
        return Err(RegistrationError::UsernameExists);
    }

    let password_hash = authenticator.hash_password(&request.password).await?;
    let new_user = NewUser::new(&request.username, password_hash);

    let user = repo.create(&new_user).await.map_err(|e| match e {
        FeedError::Conflict(_) => RegistrationError::UsernameExists,
        other => RegistrationError::Internal(other),
    })?;

    info!(user_id = user.id, username = %user.username, "User registered");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CredentialHasher, LoginOutcome, TokenCodec};
    use crate::db::{Database, DEFAULT_ROLE};

    fn authenticator() -> Authenticator {
        Authenticator::new(
            CredentialHasher::new(1024, 1, 1).unwrap(),
            TokenCodec::new("test-secret", 3600),
        )
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        let auth = authenticator();

        let user = register(&repo, &auth, RegistrationRequest::new("alice", "password123"))
            .await
            .unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, DEFAULT_ROLE);
        assert!(user.password.starts_with("$argon2id$"));
        assert_ne!(user.password, "password123");

        let outcome = auth.login(&repo, "alice", "password123").await.unwrap();
        assert!(outcome.is_authorized());
        let outcome = auth.login(&repo, "alice", "password124").await.unwrap();
        assert_eq!(outcome, LoginOutcome::Rejected);
    }

    #[tokio::test]
    async fn test_register_duplicate() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        let auth = authenticator();

        register(&repo, &auth, RegistrationRequest::new("alice", "password123"))
            .await
            .unwrap();
        let result = register(&repo, &auth, RegistrationRequest::new("ALICE", "password456")).await;

        assert!(matches!(result, Err(RegistrationError::UsernameExists)));
    }

    #[tokio::test]
    async fn test_register_validation() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());
        let auth = authenticator();

        let result = register(&repo, &auth, RegistrationRequest::new("al", "password123")).await;
        assert!(matches!(
            result,
            Err(RegistrationError::Validation(ValidationError::UsernameLength))
        ));

        let result = register(&repo, &auth, RegistrationRequest::new("alice", "short")).await;
        assert!(matches!(
            result,
            Err(RegistrationError::Validation(ValidationError::PasswordLength))
        ));
    }
}
