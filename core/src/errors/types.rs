//! Domain-specific error types for credential and token operations.
//!
//! The core raises every failure kind distinctly; the boundary mapping
//! into [`ErrorResponse`] deliberately collapses kinds whose distinction
//! would leak information to callers (see the `From` impls below).

use credo_shared::types::ErrorResponse;
use credo_shared::utils::validation::PasswordViolation;
use thiserror::Error;

use crate::domain::entities::token::TokenKind;

/// Account and credential failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("account not found")]
    AccountNotFound,

    #[error("account with this email already exists")]
    AccountAlreadyExists,

    #[error("invalid email or password")]
    InvalidCredentials,
}

/// Token verification and issuance failures
///
/// The four verification kinds (`Malformed`, `InvalidSignature`,
/// `Expired`, `Revoked`, plus `WrongKind`) are distinguishable here so
/// callers can log and report differently; the boundary collapses them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,

    #[error("token signature verification failed")]
    InvalidSignature,

    #[error("wrong token kind: expected {expected}, got {actual}")]
    WrongKind {
        expected: TokenKind,
        actual: TokenKind,
    },

    #[error("token expired")]
    Expired,

    #[error("token revoked")]
    Revoked,

    #[error("token issuance failed")]
    IssuanceFailed,
}

/// Input validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid email format")]
    InvalidEmail,

    #[error("password does not meet policy requirements")]
    PasswordPolicy { violations: Vec<PasswordViolation> },

    #[error("required field missing or empty: {field}")]
    RequiredField { field: String },
}

/// Convert AuthError to a boundary response
///
/// `AccountNotFound` and `InvalidCredentials` collapse to the same code
/// so login responses cannot be used for account enumeration.
impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AccountNotFound | AuthError::InvalidCredentials => {
                ErrorResponse::new("INVALID_CREDENTIALS", "Invalid email or password")
            }
            AuthError::AccountAlreadyExists => ErrorResponse::new(
                "ACCOUNT_ALREADY_EXISTS",
                "An account with this email already exists",
            ),
        }
    }
}

/// Convert TokenError to a boundary response
///
/// All verification failures collapse to a single generic response so
/// callers cannot tell an expired token from a revoked or forged one.
impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Malformed
            | TokenError::InvalidSignature
            | TokenError::WrongKind { .. }
            | TokenError::Expired
            | TokenError::Revoked => ErrorResponse::new("UNAUTHORIZED", "Unauthorized"),
            TokenError::IssuanceFailed => {
                ErrorResponse::new("INTERNAL_ERROR", "Internal server error")
            }
        }
    }
}

/// Convert ValidationError to a boundary response
impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidEmail => {
                ErrorResponse::new("VALIDATION_ERROR", "Invalid email format")
            }
            ValidationError::PasswordPolicy { ref violations } => ErrorResponse::new(
                "VALIDATION_ERROR",
                "Password does not meet policy requirements",
            )
            .with_detail(
                "violations",
                serde_json::to_value(violations).unwrap_or_default(),
            ),
            ValidationError::RequiredField { ref field } => ErrorResponse::new(
                "VALIDATION_ERROR",
                format!("Required field missing or empty: {}", field),
            ),
        }
    }
}
