//! Likes and the insert-once guard.
//!
//! A like is identified by `(subject, user)`. Liking something twice is a
//! no-op: the second call reports `created = false` and no error. The
//! existence check is only a fast path; the UNIQUE constraint on the like
//! tables is what keeps two concurrent requests from both inserting.

use sqlx::SqlitePool;
use tracing::debug;

use crate::db::{is_foreign_key_violation, LikeStore};
use crate::{FeedError, Result};

/// What kind of subject is liked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeTarget {
    /// A post.
    Post,
    /// A comment.
    Comment,
}

impl LikeTarget {
    /// Name of the liked subject.
    pub fn as_str(&self) -> &'static str {
        match self {
            LikeTarget::Post => "post",
            LikeTarget::Comment => "comment",
        }
    }

    fn subject_table(&self) -> &'static str {
        match self {
            LikeTarget::Post => "posts",
            LikeTarget::Comment => "comments",
        }
    }

    fn table(&self) -> &'static str {
        match self {
            LikeTarget::Post => "post_likes",
            LikeTarget::Comment => "comment_likes",
        }
    }

    fn subject_column(&self) -> &'static str {
        match self {
            LikeTarget::Post => "post_id",
            LikeTarget::Comment => "comment_id",
        }
    }
}

/// Identity of a like: subject plus acting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LikeKey {
    /// Kind of subject.
    pub target: LikeTarget,
    /// Post or comment ID.
    pub subject_id: i64,
    /// User who likes it.
    pub user_id: i64,
}

impl LikeKey {
    /// Key for a user liking a post.
    pub fn post(post_id: i64, user_id: i64) -> Self {
        Self {
            target: LikeTarget::Post,
            subject_id: post_id,
            user_id,
        }
    }

    /// Key for a user liking a comment.
    pub fn comment(comment_id: i64, user_id: i64) -> Self {
        Self {
            target: LikeTarget::Comment,
            subject_id: comment_id,
            user_id,
        }
    }
}

/// Record `key` once.
///
/// Returns `Ok(true)` if this call created the like and `Ok(false)` if it
/// already existed, including when a concurrent caller inserted it between the
/// check and the insert. Storage errors are returned unchanged.
pub async fn ensure_once<S>(store: &S, key: LikeKey) -> Result<bool>
where
    S: LikeStore + Sync,
{
    if store.exists_like(key).await? {
        debug!(?key, "Like already present");
        return Ok(false);
    }

    let created = store.insert_like(key).await?;
    if !created {
        debug!(?key, "Like inserted concurrently by another request");
    }
    Ok(created)
}

/// sqlx-backed like storage.
pub struct LikeRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LikeRepository<'a> {
    /// Create a new LikeRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Count likes on a subject.
    pub async fn count(&self, target: LikeTarget, subject_id: i64) -> Result<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = ?",
            target.table(),
            target.subject_column()
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(subject_id)
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Name the parent row a failed foreign key points at: the subject when
    /// it is gone, otherwise the user.
    async fn missing_parent(&self, key: LikeKey) -> Result<FeedError> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)",
            key.target.subject_table()
        );
        let subject_exists: bool = sqlx::query_scalar(&sql)
            .bind(key.subject_id)
            .fetch_one(self.pool)
            .await?;

        let missing = if subject_exists {
            "user"
        } else {
            key.target.as_str()
        };
        Ok(FeedError::NotFound(missing.to_string()))
    }
}

impl LikeStore for LikeRepository<'_> {
    async fn exists_like(&self, key: LikeKey) -> Result<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE {} = ? AND user_id = ?)",
            key.target.table(),
            key.target.subject_column()
        );
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(key.subject_id)
            .bind(key.user_id)
            .fetch_one(self.pool)
            .await?;

        Ok(exists)
    }

    async fn insert_like(&self, key: LikeKey) -> Result<bool> {
        let column = key.target.subject_column();
        let sql = format!(
            "INSERT INTO {} ({column}, user_id) VALUES (?, ?)
             ON CONFLICT({column}, user_id) DO NOTHING",
            key.target.table()
        );
        let result = sqlx::query(&sql)
            .bind(key.subject_id)
            .bind(key.user_id)
            .execute(self.pool)
            .await;

        match result {
            Ok(done) => Ok(done.rows_affected() == 1),
            Err(e) if is_foreign_key_violation(&e) => Err(self.missing_parent(key).await?),
            Err(e) => Err(e.into()),
        }
    }
}
