//! Login and per-request authorization.

use tracing::{debug, info};

use super::password::CredentialHasher;
use super::token::{Claims, TokenCodec, TokenError, TokenStatus};
use crate::db::CredentialStore;
use crate::{FeedError, Result};

/// Result of a login attempt.
///
/// Unknown usernames and wrong passwords both produce `Rejected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials matched; a fresh token was issued.
    Authorized {
        /// Signed token.
        token: String,
        /// Claims carried by the token.
        claims: Claims,
    },
    /// Credentials did not match.
    Rejected,
}

impl LoginOutcome {
    /// Whether the login succeeded.
    pub fn is_authorized(&self) -> bool {
        matches!(self, LoginOutcome::Authorized { .. })
    }
}

/// Orchestrates password checks and token validation.
#[derive(Debug, Clone)]
pub struct Authenticator {
    hasher: CredentialHasher,
    codec: TokenCodec,
}

impl Authenticator {
    /// Create an authenticator.
    pub fn new(hasher: CredentialHasher, codec: TokenCodec) -> Self {
        Self { hasher, codec }
    }

    /// The token codec.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Hash a password on the blocking pool.
    pub async fn hash_password(&self, password: &str) -> Result<String> {
        let hasher = self.hasher.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| FeedError::Internal(format!("hashing task failed: {e}")))?
            .map_err(|e| FeedError::Internal(e.to_string()))
    }

    /// Check credentials and mint a token on success.
    ///
    /// Storage failures are returned as errors; credential failures are
    /// `Ok(LoginOutcome::Rejected)`.
    pub async fn login<S>(&self, store: &S, username: &str, password: &str) -> Result<LoginOutcome>
    where
        S: CredentialStore + Sync,
    {
        let credentials = store.find_credentials(username).await?;

        let hasher = self.hasher.clone();
        let password = password.to_owned();
        let stored_hash = credentials.as_ref().map(|c| c.password_hash.clone());

        let verified = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => hasher.verify(&password, &hash),
            None => {
                hasher.verify_dummy(&password);
                false
            }
        })
        .await
        .map_err(|e| FeedError::Internal(format!("verification task failed: {e}")))?;

        let credentials = match credentials {
            Some(c) if verified => c,
            Some(_) => {
                debug!(username, "Login rejected: password mismatch");
                return Ok(LoginOutcome::Rejected);
            }
            None => {
                debug!(username, "Login rejected: unknown user");
                return Ok(LoginOutcome::Rejected);
            }
        };

        let (token, claims) = self
            .codec
            .issue(credentials.user_id, &credentials.username)
            .map_err(|e| FeedError::Internal(e.to_string()))?;

        info!(user_id = claims.user_id, "User logged in");
        Ok(LoginOutcome::Authorized { token, claims })
    }

    /// Validate a raw `Authorization` header value.
    pub fn authorize(&self, raw_header: &str) -> std::result::Result<TokenStatus, TokenError> {
        self.codec.decode(strip_scheme(raw_header))
    }

    /// Validate a raw `Authorization` header value as observed at `now`.
    pub fn authorize_at(
        &self,
        raw_header: &str,
        now: i64,
    ) -> std::result::Result<TokenStatus, TokenError> {
        self.codec.decode_at(strip_scheme(raw_header), now)
    }
}

/// Remove a leading `<scheme> ` (e.g. `Bearer `) from a header value.
fn strip_scheme(raw: &str) -> &str {
    let raw = raw.trim();
    match raw.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.chars().all(|c| c.is_ascii_alphabetic()) => rest.trim(),
        _ => raw,
    }
}
