//! Request DTOs for the JSON API.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use super::validation::body_text;
use crate::auth::registration_violations;

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest accepted page size.
pub const MAX_LIMIT: i64 = 100;

/// Registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

// Same rules `register` enforces, reported per field.
impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for broken in registration_violations(&self.username, &self.password) {
            errors.add(
                broken.field(),
                validator::ValidationError::new(broken.code()).with_message(broken.to_string().into()),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token inspection request.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// The token to inspect, with or without a `Bearer ` prefix.
    pub token: String,
}

/// Create post request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Post text.
    #[validate(custom(function = "body_text"))]
    pub text: String,
}

/// Create comment request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Post to comment on.
    pub post_id: i64,
    /// Comment text.
    #[validate(custom(function = "body_text"))]
    pub text: String,
}

/// Pagination query parameters.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListQuery {
    /// Page size (1 to 100, default 10).
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
    /// Number of items to skip (default 0).
    #[validate(range(min = 0))]
    pub offset: Option<i64>,
}

impl ListQuery {
    /// Effective page size.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Effective offset.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Query parameters for listing comments.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CommentListQuery {
    /// Post whose comments are listed. Required.
    pub post_id: Option<i64>,
    /// Page size (1 to 100, default 10).
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
    /// Number of items to skip (default 0).
    #[validate(range(min = 0))]
    pub offset: Option<i64>,
}

impl CommentListQuery {
    /// Pagination part of the query.
    pub fn page(&self) -> ListQuery {
        ListQuery {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::MAX_BODY_LENGTH;

    #[test]
    fn test_list_query_defaults() {
        let query = ListQuery::default();
        assert_eq!(query.limit(), DEFAULT_LIMIT);
        assert_eq!(query.offset(), 0);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_list_query_range() {
        let query = ListQuery {
            limit: Some(0),
            offset: None,
        };
        assert!(query.validate().is_err());

        let query = ListQuery {
            limit: Some(101),
            offset: None,
        };
        assert!(query.validate().is_err());

        let query = ListQuery {
            limit: Some(5),
            offset: Some(-1),
        };
        assert!(query.validate().is_err());

        let query = ListQuery {
            limit: Some(100),
            offset: Some(20),
        };
        assert!(query.validate().is_ok());
        assert_eq!(query.limit(), 100);
        assert_eq!(query.offset(), 20);
    }

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            username: "alice_01".to_string(),
            password: "password123".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = RegisterRequest {
            username: "al".to_string(),
            password: "short".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("password"));

        let bad = RegisterRequest {
            username: "alice!".to_string(),
            password: "password123".to_string(),
        };
        assert!(bad.validate().is_err());

        // Caught here too, not only by `register`
        let bad = RegisterRequest {
            username: "password123".to_string(),
            password: "PASSWORD123".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(!fields.contains_key("username"));
        assert_eq!(fields["password"][0].code, "password_is_username");
    }

    #[test]
    fn test_create_post_request_validation() {
        let ok = CreatePostRequest {
            text: "hello\nworld".to_string(),
        };
        assert!(ok.validate().is_ok());

        let blank = CreatePostRequest {
            text: "   ".to_string(),
        };
        assert!(blank.validate().is_err());

        let longest = CreatePostRequest {
            text: "x".repeat(MAX_BODY_LENGTH),
        };
        assert!(longest.validate().is_ok());

        let long = CreatePostRequest {
            text: "x".repeat(MAX_BODY_LENGTH + 1),
        };
        assert!(long.validate().is_err());
    }
}
