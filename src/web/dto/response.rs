//! Response DTOs for the JSON API.

use serde::Serialize;

use crate::auth::Claims;
use crate::db::User;

/// Message for a like created by this request.
pub const LIKE_CREATED: &str = "like has been created";

/// Message for a like that already existed.
pub const LIKE_EXISTS: &str = "there is like already";

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed access token.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    /// The logged-in user.
    pub user: UserInfo,
}

/// User information in responses.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
}

impl From<&Claims> for UserInfo {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.user_id,
            username: claims.username.clone(),
        }
    }
}

/// Registered user.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Role.
    pub role: String,
    /// Registration timestamp.
    pub registered_at: String,
}

impl From<User> for RegisterResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            registered_at: user.registered_at,
        }
    }
}

/// Result of inspecting a token.
#[derive(Debug, Serialize)]
pub struct TokenInfoResponse {
    /// Whether the token is currently accepted.
    pub validity: bool,
    /// Token subject, when valid.
    pub user_id: Option<i64>,
    /// Token username, when valid.
    pub username: Option<String>,
    /// Expiry as a Unix timestamp, when valid.
    pub expires_at: Option<i64>,
    /// Server time the check was made at.
    pub now: i64,
}

/// Result of a like request.
#[derive(Debug, Serialize)]
pub struct LikeResponse {
    /// Whether this request created the like.
    pub created: bool,
    /// Human-readable outcome.
    pub message: &'static str,
}

impl LikeResponse {
    /// Build the response for an insert-once outcome.
    pub fn new(created: bool) -> Self {
        Self {
            created,
            message: if created { LIKE_CREATED } else { LIKE_EXISTS },
        }
    }
}

/// Acknowledgement of a write that returns no entity.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}

impl MessageResponse {
    /// Create a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
