//! Authentication and token configuration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum signing secret length accepted in production mode, in bytes
pub const MIN_SECRET_BYTES: usize = 32;

const DEFAULT_SECRET: &str = "development-secret-change-in-production";

fn default_algorithm() -> String {
    String::from("HS256")
}

/// JWT signing and lifetime configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// Password reset token expiry time in seconds
    pub reset_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_SECRET),
            algorithm: default_algorithm(),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            reset_token_expiry: 3600,     // 1 hour
            issuer: String::from("credo"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Set password reset token expiry in minutes
    pub fn with_reset_expiry_minutes(mut self, minutes: i64) -> Self {
        self.reset_token_expiry = minutes * 60;
        self
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

/// Top-level configuration for the authentication core
///
/// Constructed once at process start and passed by reference into every
/// component constructor. Components never read ambient state.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Bcrypt cost factor for password hashing
    pub bcrypt_cost: u32,

    /// Whether the process runs in production mode
    pub production: bool,

    /// Revoke every outstanding session when a password reset is
    /// confirmed, instead of only the reset token itself
    #[serde(default)]
    pub revoke_sessions_on_password_reset: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            bcrypt_cost: 12,
            production: false,
            revoke_sessions_on_password_reset: false,
        }
    }
}

impl AuthConfig {
    /// Validate the configuration, failing fast on unusable values
    ///
    /// In production mode the signing secret must be explicitly set and
    /// at least [`MIN_SECRET_BYTES`] bytes long.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.production {
            if self.jwt.is_using_default_secret() {
                return Err(ConfigError::DefaultSecretInProduction);
            }
            if self.jwt.secret.len() < MIN_SECRET_BYTES {
                return Err(ConfigError::SecretTooShort {
                    min_bytes: MIN_SECRET_BYTES,
                });
            }
        }
        if self.jwt.access_token_expiry <= 0
            || self.jwt.refresh_token_expiry <= 0
            || self.jwt.reset_token_expiry <= 0
        {
            return Err(ConfigError::NonPositiveExpiry);
        }
        Ok(())
    }
}

/// Configuration validation failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The default development secret is not allowed in production
    DefaultSecretInProduction,
    /// The signing secret is below the minimum entropy threshold
    SecretTooShort { min_bytes: usize },
    /// A token lifetime is zero or negative
    NonPositiveExpiry,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DefaultSecretInProduction => {
                write!(f, "JWT secret must be set explicitly in production")
            }
            Self::SecretTooShort { min_bytes } => {
                write!(f, "JWT secret must be at least {} bytes", min_bytes)
            }
            Self::NonPositiveExpiry => write!(f, "token expiry values must be positive"),
        }
    }
}

impl std::error::Error for ConfigError {}
