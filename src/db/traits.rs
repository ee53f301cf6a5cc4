//! Storage boundary used by the authentication core and the like guard.
//!
//! The core never builds SQL itself; it asks for these operations and the
//! sqlx repositories answer them. Tests substitute in-memory stores.

use std::future::Future;

use super::user::StoredCredentials;
use crate::feed::LikeKey;
use crate::Result;

/// Credential lookup for login.
pub trait CredentialStore {
    /// Find the stored hash for a username, or `None` if no such user.
    fn find_credentials(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<StoredCredentials>>> + Send;
}

/// Existence check and insert for like records.
pub trait LikeStore {
    /// Whether a like for `key` is already stored.
    fn exists_like(&self, key: LikeKey) -> impl Future<Output = Result<bool>> + Send;

    /// Insert a like for `key`.
    ///
    /// Returns `false` when the uniqueness constraint rejected the row because
    /// an identical like already exists.
    fn insert_like(&self, key: LikeKey) -> impl Future<Output = Result<bool>> + Send;
}
