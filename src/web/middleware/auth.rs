//! Token authentication for protected routes.

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{Authenticator, Claims, TokenError, TokenStatus};
use crate::web::error::ApiError;

/// Extractor for authenticated users.
///
/// Reads the `Authorization` header and hands it to the [`Authenticator`].
/// Missing, malformed, forged and expired tokens are all a 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::invalid_token())?;

        // Set by the `inject_authenticator` middleware
        let authenticator = parts
            .extensions
            .get::<Arc<Authenticator>>()
            .ok_or_else(|| ApiError::internal("Authenticator not configured"))?;

        match authenticator.authorize(header) {
            Ok(TokenStatus::Valid(claims)) => Ok(AuthUser(claims)),
            Ok(TokenStatus::Invalid) => Err(ApiError::invalid_token()),
            Err(TokenError::Malformed(e)) => {
                tracing::debug!("Malformed token: {}", e);
                Err(ApiError::invalid_token())
            }
            Err(e) => {
                tracing::error!("Token check failed: {}", e);
                Err(ApiError::internal("Failed to check token"))
            }
        }
    }
}

/// Middleware function to inject the authenticator into request extensions.
pub async fn inject_authenticator(
    authenticator: Arc<Authenticator>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(authenticator);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CredentialHasher, TokenCodec};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(
            CredentialHasher::new(1024, 1, 1).unwrap(),
            TokenCodec::new("test-secret", 3600),
        ))
    }

    async fn extract(
        header: Option<&str>,
        auth: Option<Arc<Authenticator>>,
    ) -> Result<AuthUser, ApiError> {
        let mut builder = Request::builder().uri("/api/posts");
        if let Some(h) = header {
            builder = builder.header(AUTHORIZATION, h);
        }
        let mut request = builder.body(Body::empty()).unwrap();
        if let Some(a) = auth {
            request.extensions_mut().insert(a);
        }
        let (mut parts, _) = request.into_parts();
        AuthUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_valid_bearer_token() {
        let auth = authenticator();
        let (token, _) = auth.codec().issue(7, "alice").unwrap();

        let user = extract(Some(format!("Bearer {token}").as_str()), Some(auth))
            .await
            .unwrap();
        assert_eq!(user.0.user_id, 7);
        assert_eq!(user.0.username, "alice");
    }

    #[tokio::test]
    async fn test_missing_header() {
        let err = extract(None, Some(authenticator())).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_token() {
        let err = extract(Some("Bearer not.a.token"), Some(authenticator()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret() {
        let other = TokenCodec::new("another-secret", 3600);
        let (token, _) = other.issue(7, "alice").unwrap();

        let err = extract(Some(format!("Bearer {token}").as_str()), Some(authenticator()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_authenticator_not_configured() {
        let err = extract(Some("Bearer x"), None).await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
