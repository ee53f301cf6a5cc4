//! Signed, expiring access tokens.
//!
//! Tokens are HS256 JWTs signed with the process-wide secret. Decoding has a
//! three-way outcome: a malformed envelope is an error, while a forged,
//! expired or incomplete claim set is simply [`TokenStatus::Invalid`].

use std::collections::HashSet;
use std::fmt;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identity and expiry asserted by a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID.
    #[serde(rename = "sub")]
    pub user_id: i64,
    /// Username.
    pub username: String,
    /// Issued at (Unix timestamp, seconds).
    pub iat: i64,
    /// Expiration (Unix timestamp, seconds).
    pub exp: i64,
}

/// Claim set as read off the wire, before the presence checks.
#[derive(Debug, Deserialize)]
struct WireClaims {
    sub: i64,
    username: String,
    iat: Option<i64>,
    exp: Option<i64>,
}

/// Outcome of decoding a well-formed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// Signature verified and not expired.
    Valid(Claims),
    /// Bad signature, expired, or missing expiry.
    Invalid,
}

impl TokenStatus {
    /// Whether the token was accepted.
    pub fn is_valid(&self) -> bool {
        matches!(self, TokenStatus::Valid(_))
    }

    /// Borrow the claims of a valid token.
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            TokenStatus::Valid(claims) => Some(claims),
            TokenStatus::Invalid => None,
        }
    }

    /// Take the claims of a valid token.
    pub fn into_claims(self) -> Option<Claims> {
        match self {
            TokenStatus::Valid(claims) => Some(claims),
            TokenStatus::Invalid => None,
        }
    }
}

/// Token errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token could not be parsed at all.
    #[error("malformed token: {0}")]
    Malformed(String),

    /// Signing failed.
    #[error("failed to encode token: {0}")]
    Encode(String),
}

/// Encodes and decodes tokens with a shared secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenCodec {
    /// Create a codec from the secret and the token lifetime in seconds.
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in decode_at
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.required_spec_claims = HashSet::new();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    /// Token lifetime in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Build claims for a user issued at `now`, expiring at `now + ttl`.
    pub fn claims_for(&self, user_id: i64, username: &str, now: i64) -> Claims {
        Claims {
            user_id,
            username: username.to_string(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        }
    }

    /// Sign a claim set.
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// Issue a token for a user, valid from now for the configured lifetime.
    pub fn issue(&self, user_id: i64, username: &str) -> Result<(String, Claims), TokenError> {
        let claims = self.claims_for(user_id, username, chrono::Utc::now().timestamp());
        let token = self.encode(&claims)?;
        Ok((token, claims))
    }

    /// Decode a token against the current time.
    pub fn decode(&self, token: &str) -> Result<TokenStatus, TokenError> {
        self.decode_at(token, chrono::Utc::now().timestamp())
    }

    /// Decode a token as observed at `now` (Unix seconds).
    pub fn decode_at(&self, token: &str, now: i64) -> Result<TokenStatus, TokenError> {
        let data = match decode::<WireClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data,
            Err(e) => {
                return match e.kind() {
                    ErrorKind::InvalidSignature
                    | ErrorKind::InvalidAlgorithm
                    | ErrorKind::ExpiredSignature
                    | ErrorKind::ImmatureSignature
                    | ErrorKind::MissingRequiredClaim(_) => Ok(TokenStatus::Invalid),
                    _ => Err(TokenError::Malformed(e.to_string())),
                };
            }
        };

        let wire = data.claims;
        let (Some(iat), Some(exp)) = (wire.iat, wire.exp) else {
            return Ok(TokenStatus::Invalid);
        };
        if exp < now {
            return Ok(TokenStatus::Invalid);
        }

        Ok(TokenStatus::Valid(Claims {
            user_id: wire.sub,
            username: wire.username,
            iat,
            exp,
        }))
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
