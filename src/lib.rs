//! socialfeed - a social feed backend
//!
//! Users, posts, comments and likes behind a JSON API, with password login
//! and signed bearer tokens.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod feed;
pub mod logging;
pub mod web;

pub use auth::{
    register, Authenticator, Claims, CredentialHasher, LoginOutcome, PasswordError,
    RegistrationError, RegistrationRequest, TokenCodec, TokenError, TokenStatus, ValidationError,
};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{FeedError, Result};
pub use feed::{ensure_once, LikeKey, LikeRepository, LikeTarget};
pub use web::WebServer;
