//! Comment handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::AppState;
use crate::feed::{
    ensure_once, CommentRepository, CommentView, LikeKey, LikeRepository, NewComment,
};
use crate::web::dto::{
    ApiResponse, CommentListQuery, CreateCommentRequest, LikeResponse, ValidatedJson,
    ValidatedQuery,
};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /api/comments?post_id= - List comments of a post, newest first.
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    ValidatedQuery(query): ValidatedQuery<CommentListQuery>,
) -> Result<Json<ApiResponse<Vec<CommentView>>>, ApiError> {
    let post_id = query
        .post_id
        .ok_or_else(|| ApiError::bad_request("post_id is not specified"))?;
    let page = query.page();

    let comments = CommentRepository::new(state.db.pool())
        .list_by_post(post_id, page.limit(), page.offset())
        .await?;

    Ok(Json(ApiResponse::new(comments)))
}

/// POST /api/comments - Comment on a post as the token's user.
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    ValidatedJson(req): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentView>>), ApiError> {
    let comment = CommentRepository::new(state.db.pool())
        .create(&NewComment::new(req.post_id, claims.user_id, req.text))
        .await?;

    tracing::info!(
        comment_id = comment.id,
        post_id = comment.post_id,
        user_id = claims.user_id,
        "Comment created"
    );

    let view = CommentView {
        id: comment.id,
        post_id: comment.post_id,
        name: claims.username,
        text: comment.body,
        like_count: 0,
        created_at: comment.created_at,
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::new(view))))
}

/// DELETE /api/comments/:id - Delete a comment. Only its author may.
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(comment_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let repo = CommentRepository::new(state.db.pool());

    let comment = repo
        .get_by_id(comment_id)
        .await?
        .ok_or_else(|| ApiError::not_found("comment not found"))?;

    if comment.user_id != claims.user_id {
        return Err(ApiError::forbidden("You can only delete your own comments"));
    }

    repo.delete(comment_id).await?;
    tracing::info!(comment_id, user_id = claims.user_id, "Comment deleted");

    Ok(Json(ApiResponse::new(())))
}

/// POST /api/comments/:id/like - Like a comment once.
pub async fn like_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(comment_id): Path<i64>,
) -> Result<Json<ApiResponse<LikeResponse>>, ApiError> {
    let repo = LikeRepository::new(state.db.pool());
    let created = ensure_once(&repo, LikeKey::comment(comment_id, claims.user_id)).await?;

    Ok(Json(ApiResponse::new(LikeResponse::new(created))))
}
