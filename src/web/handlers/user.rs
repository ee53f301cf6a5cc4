//! User handlers.

use axum::{extract::State, Json};
use std::sync::Arc;

use super::AppState;
use crate::db::{UserRepository, UserSummary};
use crate::web::dto::{ApiResponse, ListQuery, ValidatedQuery};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

/// GET /api/users - List users, newest first.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<UserSummary>>>, ApiError> {
    let users = UserRepository::new(state.db.pool())
        .list(query.limit(), query.offset())
        .await?;

    Ok(Json(ApiResponse::new(users)))
}
