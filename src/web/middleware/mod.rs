//! Middleware for the JSON API.

pub mod auth;
pub mod cors;

pub use auth::{inject_authenticator, AuthUser};
pub use cors::create_cors_layer;
