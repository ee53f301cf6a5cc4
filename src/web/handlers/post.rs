//! Post handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::feed::{ensure_once, LikeKey, LikeRepository, NewPost, PostRepository, PostView};
use crate::web::dto::{
    ApiResponse, CreatePostRequest, LikeResponse, ListQuery, ValidatedJson, ValidatedQuery,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /api/posts - List posts, newest first.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<PostView>>>, ApiError> {
    let posts = PostRepository::new(state.db.pool())
        .list_recent(query.limit(), query.offset())
        .await?;

    Ok(Json(ApiResponse::new(posts)))
}

/// POST /api/posts - Create a post as the token's user.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PostView>>), ApiError> {
    let post = PostRepository::new(state.db.pool())
        .create(&NewPost::new(claims.user_id, req.text))
        .await?;

    tracing::info!(post_id = post.id, user_id = claims.user_id, "Post created");

    let view = PostView {
        id: post.id,
        name: claims.username,
        text: post.body,
        like_count: 0,
        created_at: post.created_at,
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::new(view))))
}

/// DELETE /api/posts/:id - Delete a post. Only its author may.
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let repo = PostRepository::new(state.db.pool());

    let post = repo
        .get_by_id(post_id)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;

    if post.user_id != claims.user_id {
        return Err(ApiError::forbidden("You can only delete your own posts"));
    }

    repo.delete(post_id).await?;
    tracing::info!(post_id, user_id = claims.user_id, "Post deleted");

    Ok(Json(ApiResponse::new(())))
}

/// POST /api/posts/:id/like - Like a post once.
pub async fn like_post(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<LikeResponse>>, ApiError> {
    let repo = LikeRepository::new(state.db.pool());
    let created = ensure_once(&repo, LikeKey::post(post_id, claims.user_id)).await?;

    Ok(Json(ApiResponse::new(LikeResponse::new(created))))
}
