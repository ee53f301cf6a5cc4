//! API handlers.

pub mod auth;
pub mod comment;
pub mod health;
pub mod post;
pub mod user;

pub use auth::*;
pub use comment::*;
pub use health::*;
pub use post::*;
pub use user::*;

use std::sync::Arc;

use crate::auth::Authenticator;
use crate::db::Database;

/// Application state shared across handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database pool.
    pub db: Database,
    /// Password and token checks.
    pub authenticator: Arc<Authenticator>,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, authenticator: Arc<Authenticator>) -> Self {
        Self { db, authenticator }
    }
}
