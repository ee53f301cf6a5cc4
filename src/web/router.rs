//! Router configuration for the JSON API.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    check_token, create_comment, create_post, db_health_check, delete_comment, delete_post,
    health_check, like_comment, like_post, list_comments, list_posts, list_users, login, register,
    AppState,
};
use super::middleware::{create_cors_layer, inject_authenticator};

/// Create the main API router.
///
/// Routes that take an [`AuthUser`](super::middleware::AuthUser) reject
/// requests without a valid token; the rest are public.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/token", post(check_token));

    let post_routes = Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/:id", delete(delete_post))
        .route("/:id/like", post(like_post));

    let comment_routes = Router::new()
        .route("/", get(list_comments).post(create_comment))
        .route("/:id", delete(delete_comment))
        .route("/:id/like", post(like_comment));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/posts", post_routes)
        .nest("/comments", comment_routes)
        .route("/users", get(list_users));

    let authenticator = app_state.authenticator.clone();

    Router::new()
        .nest("/api", api_routes)
        .merge(create_health_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let authenticator = authenticator.clone();
                    inject_authenticator(authenticator, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create the health check router.
pub fn create_health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/db", get(db_health_check))
}
