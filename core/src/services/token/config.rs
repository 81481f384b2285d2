//! Configuration for the token service

use jsonwebtoken::Algorithm;

use credo_shared::config::AuthConfig;

use crate::domain::entities::token::TokenKind;
use crate::errors::{DomainError, DomainResult};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub secret: String,
    /// JWT signing algorithm (symmetric MAC family only)
    pub algorithm: Algorithm,
    /// Issuer claim stamped into every token
    pub issuer: String,
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
    /// Password reset token lifetime in seconds
    pub reset_token_expiry: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            secret: "development-secret-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            issuer: "credo".to_string(),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            reset_token_expiry: 3600,     // 1 hour
        }
    }
}

impl TokenServiceConfig {
    /// Builds the service configuration from the validated application
    /// configuration, rejecting unusable algorithms up front
    pub fn from_auth_config(config: &AuthConfig) -> DomainResult<Self> {
        let algorithm = match config.jwt.algorithm.as_str() {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => {
                return Err(DomainError::Internal {
                    message: format!("unsupported signing algorithm: {}", other),
                })
            }
        };
        Ok(Self {
            secret: config.jwt.secret.clone(),
            algorithm,
            issuer: config.jwt.issuer.clone(),
            access_token_expiry: config.jwt.access_token_expiry,
            refresh_token_expiry: config.jwt.refresh_token_expiry,
            reset_token_expiry: config.jwt.reset_token_expiry,
        })
    }

    /// Lifetime in seconds for a token of the given kind
    pub fn lifetime_for(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.access_token_expiry,
            TokenKind::Refresh => self.refresh_token_expiry,
            TokenKind::PasswordReset => self.reset_token_expiry,
        }
    }
}
