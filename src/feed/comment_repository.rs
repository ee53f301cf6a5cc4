//! Comment repository.

use sqlx::SqlitePool;

use super::post::{Comment, CommentView, NewComment};
use crate::db::is_foreign_key_violation;
use crate::{FeedError, Result};

/// Repository for comment operations.
pub struct CommentRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new CommentRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a comment on a post.
    ///
    /// A missing post or author is `FeedError::NotFound`, naming the post
    /// when it is the post that is gone.
    pub async fn create(&self, new_comment: &NewComment) -> Result<Comment> {
        let result = sqlx::query("INSERT INTO comments (post_id, user_id, body) VALUES (?, ?, ?)")
            .bind(new_comment.post_id)
            .bind(new_comment.user_id)
            .bind(&new_comment.body)
            .execute(self.pool)
            .await;

        let result = match result {
            Ok(done) => done,
            Err(e) if is_foreign_key_violation(&e) => {
                let post_exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM posts WHERE id = ?)")
                        .bind(new_comment.post_id)
                        .fetch_one(self.pool)
                        .await?;
                let missing = if post_exists { "user" } else { "post" };
                return Err(FeedError::NotFound(missing.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| FeedError::NotFound("comment".to_string()))
    }

    /// Get a comment by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            "SELECT id, post_id, user_id, body, created_at, updated_at FROM comments WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(comment)
    }

    /// List comments of a post with their authors, newest first.
    pub async fn list_by_post(
        &self,
        post_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentView>> {
        let comments = sqlx::query_as::<_, CommentView>(
            "SELECT c.id, c.post_id, u.username AS name, c.body AS text,
                    (SELECT COUNT(*) FROM comment_likes l WHERE l.comment_id = c.id) AS like_count,
                    c.created_at
             FROM comments c JOIN users u ON c.user_id = u.id
             WHERE c.post_id = ?
             ORDER BY c.created_at DESC, c.id DESC
             LIMIT ? OFFSET ?",
        )
        .bind(post_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(comments)
    }

    /// Delete a comment by ID.
    ///
    /// Returns true if a comment was deleted, false if not found.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, NewUser, UserRepository};
    use crate::feed::{NewPost, PostRepository};

    async fn setup() -> (Database, i64, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let user = UserRepository::new(db.pool())
            .create(&NewUser::new("alice", "hash"))
            .await
            .unwrap();
        let post = PostRepository::new(db.pool())
            .create(&NewPost::new(user.id, "a post"))
            .await
            .unwrap();
        (db, user.id, post.id)
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let (db, user_id, post_id) = setup().await;
        let repo = CommentRepository::new(db.pool());

        repo.create(&NewComment::new(post_id, user_id, "first"))
            .await
            .unwrap();
        let second = repo
            .create(&NewComment::new(post_id, user_id, "second"))
            .await
            .unwrap();
        assert_eq!(second.post_id, post_id);

        let comments = repo.list_by_post(post_id, 10, 0).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "second");
        assert_eq!(comments[0].name, "alice");
        assert_eq!(comments[1].text, "first");

        let comments = repo.list_by_post(post_id, 1, 1).await.unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].text, "first");

        assert!(repo.list_by_post(999, 10, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_on_missing_post() {
        let (db, user_id, _) = setup().await;
        let repo = CommentRepository::new(db.pool());

        let result = repo.create(&NewComment::new(999, user_id, "lost")).await;
        assert!(matches!(result, Err(FeedError::NotFound(ref what)) if what == "post"));
    }

    #[tokio::test]
    async fn test_create_by_missing_user() {
        let (db, _, post_id) = setup().await;
        let repo = CommentRepository::new(db.pool());

        let result = repo.create(&NewComment::new(post_id, 999, "ghost")).await;
        assert!(matches!(result, Err(FeedError::NotFound(ref what)) if what == "user"));
    }

    #[tokio::test]
    async fn test_delete_post_cascades() {
        let (db, user_id, post_id) = setup().await;
        let repo = CommentRepository::new(db.pool());

        let comment = repo
            .create(&NewComment::new(post_id, user_id, "gone soon"))
            .await
            .unwrap();
        PostRepository::new(db.pool()).delete(post_id).await.unwrap();

        assert!(repo.get_by_id(comment.id).await.unwrap().is_none());
        assert!(!repo.delete(comment.id).await.unwrap());
    }
}
