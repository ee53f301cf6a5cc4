//! Post and comment models.

use serde::Serialize;

/// Maximum length of a post or comment body, in characters.
pub const MAX_BODY_LENGTH: usize = 2000;

/// Post entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// Author user ID.
    pub user_id: i64,
    /// Post text.
    pub body: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Author user ID.
    pub user_id: i64,
    /// Post text.
    pub body: String,
}

impl NewPost {
    /// Create a new post.
    pub fn new(user_id: i64, body: impl Into<String>) -> Self {
        Self {
            user_id,
            body: body.into(),
        }
    }
}

/// Post as shown in the feed, joined with its author.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PostView {
    /// Post ID.
    pub id: i64,
    /// Author username.
    pub name: String,
    /// Post text.
    pub text: String,
    /// Number of likes.
    pub like_count: i64,
    /// Creation timestamp.
    pub created_at: String,
}

/// Comment entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Comment {
    /// Unique comment ID.
    pub id: i64,
    /// Post the comment belongs to.
    pub post_id: i64,
    /// Author user ID.
    pub user_id: i64,
    /// Comment text.
    pub body: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Data for creating a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Post to comment on.
    pub post_id: i64,
    /// Author user ID.
    pub user_id: i64,
    /// Comment text.
    pub body: String,
}

impl NewComment {
    /// Create a new comment.
    pub fn new(post_id: i64, user_id: i64, body: impl Into<String>) -> Self {
        Self {
            post_id,
            user_id,
            body: body.into(),
        }
    }
}

/// Comment as listed under a post, joined with its author.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CommentView {
    /// Comment ID.
    pub id: i64,
    /// Post ID.
    pub post_id: i64,
    /// Author username.
    pub name: String,
    /// Comment text.
    pub text: String,
    /// Number of likes.
    pub like_count: i64,
    /// Creation timestamp.
    pub created_at: String,
}
