//! Post repository.

use sqlx::SqlitePool;

use super::post::{NewPost, Post, PostView};
use crate::db::is_foreign_key_violation;
use crate::{FeedError, Result};

/// Repository for post operations.
pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new post.
    ///
    /// Returns the created post with the assigned ID.
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let result = sqlx::query("INSERT INTO posts (user_id, body) VALUES (?, ?)")
            .bind(new_post.user_id)
            .bind(&new_post.body)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    FeedError::NotFound("user".to_string())
                } else {
                    FeedError::Database(e.to_string())
                }
            })?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| FeedError::NotFound("post".to_string()))
    }

    /// Get a post by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            "SELECT id, user_id, body, created_at, updated_at FROM posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(post)
    }

    /// List posts with their authors, newest first.
    pub async fn list_recent(&self, limit: i64, offset: i64) -> Result<Vec<PostView>> {
        let posts = sqlx::query_as::<_, PostView>(
            "SELECT p.id, u.username AS name, p.body AS text,
                    (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id) AS like_count,
                    p.created_at
             FROM posts p JOIN users u ON p.user_id = u.id
             ORDER BY p.created_at DESC, p.id DESC
             LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// Delete a post by ID. Comments and likes cascade.
    ///
    /// Returns true if a post was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all posts.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
