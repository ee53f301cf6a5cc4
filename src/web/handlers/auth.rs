//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::AppState;
use crate::auth::{register as register_user, LoginOutcome, RegistrationRequest, TokenError};
use crate::db::UserRepository;
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
    TokenInfoResponse, TokenRequest, UserInfo, ValidatedJson,
};
use crate::web::error::ApiError;

/// POST /api/auth/register - Create an account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RegisterResponse>>), ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let user = register_user(
        &repo,
        &state.authenticator,
        RegistrationRequest::new(req.username, req.password),
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(RegisterResponse::from(user))),
    ))
}

/// POST /api/auth/login - Exchange credentials for a token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let repo = UserRepository::new(state.db.pool());
    let outcome = state
        .authenticator
        .login(&repo, &req.username, &req.password)
        .await?;

    match outcome {
        LoginOutcome::Authorized { token, claims } => Ok(Json(ApiResponse::new(LoginResponse {
            token,
            expires_in: state.authenticator.codec().ttl_secs(),
            user: UserInfo::from(&claims),
        }))),
        LoginOutcome::Rejected => Err(ApiError::login_rejected()),
    }
}

/// POST /api/auth/token - Report whether a token is currently accepted.
///
/// 200 with the claims when valid, 401 with `validity: false` otherwise.
/// A token that cannot be parsed at all is a 400.
pub async fn check_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TokenRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TokenInfoResponse>>), ApiError> {
    let now = chrono::Utc::now().timestamp();

    let status = state
        .authenticator
        .authorize_at(&req.token, now)
        .map_err(|e| match e {
            TokenError::Malformed(msg) => {
                tracing::debug!("Malformed token submitted for inspection: {}", msg);
                ApiError::malformed_token()
            }
            other => {
                tracing::error!("Token inspection failed: {}", other);
                ApiError::internal("Failed to check token")
            }
        })?;

    let (code, info) = match status.into_claims() {
        Some(claims) => (
            StatusCode::OK,
            TokenInfoResponse {
                validity: true,
                user_id: Some(claims.user_id),
                username: Some(claims.username),
                expires_at: Some(claims.exp),
                now,
            },
        ),
        None => (
            StatusCode::UNAUTHORIZED,
            TokenInfoResponse {
                validity: false,
                user_id: None,
                username: None,
                expires_at: None,
                now,
            },
        ),
    };

    Ok((code, Json(ApiResponse::new(info))))
}
