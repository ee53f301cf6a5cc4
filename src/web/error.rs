//! JSON error responses.
//!
//! Every failure leaves the API as `{"error": {"code", "message", "details"}}`.
//! Storage and internal causes are logged here and never reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::auth::{RegistrationError, ValidationError};
use crate::FeedError;

/// Message for every rejected token on a protected route, including a missing one.
pub const INVALID_TOKEN: &str = "invalid token";

/// Message for a token that cannot be parsed at all.
pub const MALFORMED_TOKEN: &str = "malformed token";

/// Same message for unknown users and wrong passwords.
pub const LOGIN_REJECTED: &str = "user is not registered or invalid password";

/// Machine-readable error code, one per failure the API reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Body or query string could not be parsed, or a required field is missing.
    BadRequest,
    /// Token inspection was handed something that is not a token.
    MalformedToken,
    /// Missing, forged or expired token on a protected route.
    InvalidToken,
    /// Login failed.
    BadCredentials,
    /// Authenticated, but not the author.
    Forbidden,
    NotFound,
    Conflict,
    /// A field broke a rule; see `details`.
    ValidationError,
    /// The database failed.
    StorageError,
    InternalError,
}

impl ErrorCode {
    /// HTTP status reported with this code.
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorCode::BadRequest | ErrorCode::MalformedToken => StatusCode::BAD_REQUEST,
            ErrorCode::InvalidToken | ErrorCode::BadCredentials => StatusCode::UNAUTHORIZED,
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::StorageError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: ErrorCode,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a FieldErrors>,
}

/// Error returned by handlers and extractors.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<FieldErrors>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    pub fn malformed_token() -> Self {
        Self::new(ErrorCode::MalformedToken, MALFORMED_TOKEN)
    }

    pub fn invalid_token() -> Self {
        Self::new(ErrorCode::InvalidToken, INVALID_TOKEN)
    }

    pub fn login_rejected() -> Self {
        Self::new(ErrorCode::BadCredentials, LOGIN_REJECTED)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// The code this error is reported with.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    fn invalid_fields(details: FieldErrors) -> Self {
        Self {
            code: ErrorCode::ValidationError,
            message: "Validation failed".to_string(),
            details: Some(details),
        }
    }

    /// 422 from a failed `validator` check, one entry per offending field.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .into_iter()
            .map(|(field, field_errors)| {
                let messages = field_errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(m) => m.to_string(),
                        None => format!("Invalid value for {}", field),
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();

        Self::invalid_fields(details)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: &self.message,
                details: self.details.as_ref(),
            },
        };
        (self.code.status_code(), Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(broken: ValidationError) -> Self {
        let mut details = FieldErrors::new();
        details.insert(broken.field().to_string(), vec![broken.to_string()]);
        Self::invalid_fields(details)
    }
}

impl From<FeedError> for ApiError {
    fn from(err: FeedError) -> Self {
        match err {
            FeedError::NotFound(_) => ApiError::not_found(err.to_string()),
            FeedError::Conflict(_) => ApiError::conflict(err.to_string()),
            FeedError::Permission(msg) => ApiError::forbidden(msg),
            FeedError::Database(_) | FeedError::DatabaseConnection(_) => {
                tracing::error!("Storage error: {}", err);
                ApiError::new(ErrorCode::StorageError, "storage unavailable")
            }
            FeedError::Io(_) | FeedError::Config(_) | FeedError::Internal(_) => {
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::Validation(broken) => broken.into(),
            RegistrationError::UsernameExists => ApiError::conflict(err.to_string()),
            RegistrationError::Internal(e) => e.into(),
        }
    }
}
