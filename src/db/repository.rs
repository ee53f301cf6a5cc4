//! User repository.

use sqlx::SqlitePool;

use super::traits::CredentialStore;
use super::user::{NewUser, StoredCredentials, User, UserSummary};
use super::is_unique_violation;
use crate::{FeedError, Result};

/// Repository for user operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new UserRepository with the given pool reference.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user.
    ///
    /// A taken username (case-insensitive) is `FeedError::Conflict`.
    pub async fn create(&self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (username, password, role) VALUES (?, ?, ?)")
            .bind(&new_user.username)
            .bind(&new_user.password)
            .bind(&new_user.role)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    FeedError::Conflict("username".to_string())
                } else {
                    FeedError::Database(e.to_string())
                }
            })?;

        let id = result.last_insert_rowid();
        self.get_by_id(id)
            .await?
            .ok_or_else(|| FeedError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, role, registered_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Get a user by username (case-insensitive).
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password, role, registered_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Check if a username is already taken (case-insensitive).
    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
            .bind(username)
            .fetch_one(self.pool)
            .await?;

        Ok(exists)
    }

    /// List users, most recently registered first.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<UserSummary>> {
        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT username AS name, role FROM users
             ORDER BY registered_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Count all users.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}

impl CredentialStore for UserRepository<'_> {
    async fn find_credentials(&self, username: &str) -> Result<Option<StoredCredentials>> {
        let credentials = sqlx::query_as::<_, StoredCredentials>(
            "SELECT id, username, password FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    #[tokio::test]
    async fn test_create_and_get() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&NewUser::new("alice", "hash")).await.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, "user");
        assert!(!user.registered_at.is_empty());

        let found = repo.get_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.username, "alice");

        let found = repo.get_by_username("ALICE").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);

        assert!(repo.get_by_id(999).await.unwrap().is_none());
        assert!(repo.get_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        repo.create(&NewUser::new("alice", "hash")).await.unwrap();
        let result = repo.create(&NewUser::new("Alice", "hash2")).await;

        assert!(matches!(result, Err(FeedError::Conflict(_))));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_username_exists() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        assert!(!repo.username_exists("alice").await.unwrap());
        repo.create(&NewUser::new("alice", "hash")).await.unwrap();
        assert!(repo.username_exists("alice").await.unwrap());
        assert!(repo.username_exists("ALICE").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        for name in ["alice", "bob", "carol"] {
            repo.create(&NewUser::new(name, "hash")).await.unwrap();
        }
        repo.create(&NewUser::new("dave", "hash").with_role("admin"))
            .await
            .unwrap();

        let page = repo.list(2, 0).await.unwrap();
        let names: Vec<&str> = page.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["dave", "carol"]);
        assert_eq!(page[0].role, "admin");

        let page = repo.list(10, 2).await.unwrap();
        let names: Vec<&str> = page.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["bob", "alice"]);
    }

    #[tokio::test]
    async fn test_find_credentials() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = UserRepository::new(db.pool());

        let user = repo.create(&NewUser::new("alice", "$argon2id$x")).await.unwrap();

        let creds = repo.find_credentials("alice").await.unwrap().unwrap();
        assert_eq!(creds.user_id, user.id);
        assert_eq!(creds.username, "alice");
        assert_eq!(creds.password_hash, "$argon2id$x");

        assert!(repo.find_credentials("nobody").await.unwrap().is_none());
    }
}
