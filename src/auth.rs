// ABOUTME: JWT-based user authentication plus one-time code generation
// ABOUTME: Handles session token generation, validation, and bearer-header extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Authentication and Session Management
//!
//! Users authenticate by verifying a one-time code, which exchanges for a
//! signed JWT. Every protected route extracts the caller's user id from that
//! token; the rest of the system trusts the id completely and performs no
//! further authorization.

use crate::constants::limits::OTP_CODE_DIGITS;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature is invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired { current_time } => {
                write!(
                    f,
                    "JWT token expired (checked at {})",
                    current_time.format("%Y-%m-%d %H:%M:%S UTC")
                )
            }
            Self::TokenInvalid { reason } => {
                write!(f, "JWT token signature is invalid: {reason}")
            }
            Self::TokenMalformed { details } => {
                write!(f, "JWT token is malformed: {details}")
            }
        }
    }
}

impl std::error::Error for JwtValidationError {}

impl From<JwtValidationError> for AppError {
    fn from(error: JwtValidationError) -> Self {
        match &error {
            JwtValidationError::TokenExpired { .. } => Self::auth_expired(),
            JwtValidationError::TokenInvalid { reason } => Self::auth_invalid(reason.clone()),
            JwtValidationError::TokenMalformed { details } => Self::auth_invalid(details.clone()),
        }
    }
}

/// `JWT` claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Contact the user registered with (email or phone)
    pub contact: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Result of a successful request authentication
#[derive(Debug, Clone, Copy)]
pub struct AuthResult {
    /// The authenticated caller's user id
    pub user_id: Uuid,
}

/// Authentication manager for session tokens and one-time codes
pub struct AuthManager {
    jwt_secret: Vec<u8>,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new authentication manager
    #[must_use]
    pub fn new(jwt_secret: Vec<u8>, token_expiry_hours: i64) -> Self {
        Self {
            jwt_secret,
            token_expiry_hours,
        }
    }

    /// Generate a session token for a verified user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            contact: user.contact().to_owned(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.jwt_secret),
        )
        .map_err(|e| AppError::internal(format!("Failed to encode session token: {e}")))
    }

    /// Validate a session token and return its claims
    ///
    /// # Errors
    ///
    /// Returns a [`JwtValidationError`] describing why the token was
    /// rejected
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.jwt_secret),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                JwtValidationError::TokenExpired {
                    current_time: Utc::now(),
                }
            }
            jsonwebtoken::errors::ErrorKind::InvalidToken
            | jsonwebtoken::errors::ErrorKind::Base64(_)
            | jsonwebtoken::errors::ErrorKind::Json(_)
            | jsonwebtoken::errors::ErrorKind::Utf8(_) => JwtValidationError::TokenMalformed {
                details: e.to_string(),
            },
            _ => JwtValidationError::TokenInvalid {
                reason: e.to_string(),
            },
        })
    }

    /// Authenticate a request from its `Authorization` header value
    ///
    /// Accepts `Bearer <token>`; returns the caller's user id.
    ///
    /// # Errors
    ///
    /// Returns an auth error when the header is missing, not a bearer
    /// scheme, the token fails validation, or the subject is not a uuid
    pub fn authenticate_header(&self, auth_header: Option<&str>) -> AppResult<AuthResult> {
        let header = auth_header.ok_or_else(AppError::auth_required)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::auth_invalid("Authorization header must use Bearer scheme"))?;

        let claims = self.validate_token(token)?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|e| AppError::auth_invalid(format!("Invalid token subject: {e}")))?;

        Ok(AuthResult { user_id })
    }
}

/// Generate a random numeric one-time code
///
/// Always [`OTP_CODE_DIGITS`] digits, zero-padded.
#[must_use]
pub fn generate_otp_code() -> String {
    let upper = 10_u32.pow(OTP_CODE_DIGITS as u32);
    let code = rand::thread_rng().gen_range(0..upper);
    format!("{code:0width$}", width = OTP_CODE_DIGITS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: Some("test@example.com".to_owned()),
            phone: None,
            created_at: Utc::now(),
        }
    }

    fn test_manager() -> AuthManager {
        AuthManager::new(b"test-secret-key-for-unit-tests".to_vec(), 24)
    }

    #[test]
    fn test_token_roundtrip() {
        let manager = test_manager();
        let user = test_user();

        let token = manager.generate_token(&user).unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.contact, "test@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_invalid_token_rejected() {
        let manager = test_manager();
        assert!(manager.validate_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = test_manager();
        let other = AuthManager::new(b"a-different-secret".to_vec(), 24);

        let token = manager.generate_token(&test_user()).unwrap();
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_authenticate_header() {
        let manager = test_manager();
        let user = test_user();
        let token = manager.generate_token(&user).unwrap();

        let auth = manager
            .authenticate_header(Some(&format!("Bearer {token}")))
            .unwrap();
        assert_eq!(auth.user_id, user.id);

        assert!(manager.authenticate_header(None).is_err());
        assert!(manager.authenticate_header(Some(&token)).is_err());
    }

    #[test]
    fn test_otp_code_shape() {
        for _ in 0..32 {
            let code = generate_otp_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
