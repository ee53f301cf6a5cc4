//! JSON API over HTTP.
//!
//! Routes, request/response shapes and the token check applied to protected
//! routes. Everything here sits on top of the `auth`, `db` and `feed` modules.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
