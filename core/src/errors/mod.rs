//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError, ValidationError};

use credo_shared::types::ErrorResponse;
use thiserror::Error;

/// Core domain errors
///
/// Validation and lookup failures are returned as typed results to the
/// caller; no retry happens inside the core. Persistence failures are
/// wrapped so storage-specific details never leak outward.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("persistence error: {message}")]
    Persistence { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Auth(e) => e.into(),
            DomainError::Token(e) => e.into(),
            DomainError::Validation(e) => e.into(),
            // Storage details stay on the inside
            DomainError::Persistence { .. } | DomainError::Internal { .. } => {
                ErrorResponse::new("INTERNAL_ERROR", "Internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::token::TokenKind;
    use credo_shared::utils::validation::PasswordViolation;

    #[test]
    fn test_token_failures_collapse_at_boundary() {
        let kinds: Vec<TokenError> = vec![
            TokenError::Malformed,
            TokenError::InvalidSignature,
            TokenError::WrongKind {
                expected: TokenKind::Access,
                actual: TokenKind::Refresh,
            },
            TokenError::Expired,
            TokenError::Revoked,
        ];
        for err in kinds {
            let response: ErrorResponse = err.into();
            assert_eq!(response.error, "UNAUTHORIZED");
            assert_eq!(response.message, "Unauthorized");
        }
    }

    #[test]
    fn test_login_failures_collapse_at_boundary() {
        let not_found: ErrorResponse = AuthError::AccountNotFound.into();
        let bad_password: ErrorResponse = AuthError::InvalidCredentials.into();
        assert_eq!(not_found.error, bad_password.error);
        assert_eq!(not_found.message, bad_password.message);
    }

    #[test]
    fn test_password_policy_response_carries_violations() {
        let err = ValidationError::PasswordPolicy {
            violations: vec![
                PasswordViolation::MissingDigit,
                PasswordViolation::MissingSymbol,
            ],
        };
        let response: ErrorResponse = err.into();
        assert_eq!(response.error, "VALIDATION_ERROR");
        let details = response.details.unwrap();
        assert_eq!(
            details["violations"],
            serde_json::json!(["missing_digit", "missing_symbol"])
        );
    }

    #[test]
    fn test_persistence_errors_never_leak_details() {
        let err = DomainError::Persistence {
            message: "mysql: duplicate key in table users".to_string(),
        };
        let response: ErrorResponse = err.into();
        assert_eq!(response.error, "INTERNAL_ERROR");
        assert!(!response.message.contains("mysql"));
    }

    #[test]
    fn test_distinct_kinds_preserved_inside_the_core() {
        assert_ne!(TokenError::Expired, TokenError::Revoked);
        assert_ne!(
            AuthError::AccountNotFound.to_string(),
            AuthError::InvalidCredentials.to_string()
        );
    }
}
