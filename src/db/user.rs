//! User model.

use serde::Serialize;

/// Role assigned to newly registered users.
pub const DEFAULT_ROLE: &str = "user";

/// User entity representing a registered user.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique, case-insensitive).
    pub username: String,
    /// Password hash (Argon2 PHC string).
    pub password: String,
    /// Role label.
    pub role: String,
    /// Registration timestamp.
    pub registered_at: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Password hash (must already be hashed).
    pub password: String,
    /// Role label (defaults to `"user"`).
    pub role: String,
}

impl NewUser {
    /// Create a new user with the default role.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password_hash.into(),
            role: DEFAULT_ROLE.to_string(),
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

/// The fields login needs: who the user is and their stored hash.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredCredentials {
    /// User ID.
    #[sqlx(rename = "id")]
    pub user_id: i64,
    /// Username as stored.
    pub username: String,
    /// Password hash.
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

/// Public listing row for users.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserSummary {
    /// Username.
    pub name: String,
    /// Role label.
    pub role: String,
}
