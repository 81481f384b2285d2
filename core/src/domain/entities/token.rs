//! Token entities: signed claim sets and revocation records.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use crate::errors::TokenError;

/// The role a token plays, enforced at verification so a token of one
/// kind can never be presented as another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Short-lived token authorizing protected-resource access
    Access,
    /// Long-lived token exchanged for fresh access tokens
    Refresh,
    /// Single-use token authorizing a password rotation
    PasswordReset,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Access => write!(f, "access"),
            Self::Refresh => write!(f, "refresh"),
            Self::PasswordReset => write!(f, "password_reset"),
        }
    }
}

/// A caller-supplied extra claim value
///
/// Deliberately a closed set of primitives: nested structures cannot be
/// smuggled into a signed token and fail deserialization outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClaimValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Claims structure for the JWT payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,

    /// Token kind, embedded at issuance and checked at verification
    pub kind: TokenKind,

    /// Issued at timestamp (seconds since epoch)
    pub iat: i64,

    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Unique token identifier, the revocation key
    pub jti: String,

    /// Caller-supplied extra claims
    #[serde(flatten)]
    pub extra: HashMap<String, ClaimValue>,
}

impl Claims {
    /// Creates claims for a freshly issued token
    ///
    /// A new jti is generated from a cryptographically strong random
    /// source on every call; jtis are never reused.
    pub fn new(
        account_id: i64,
        kind: TokenKind,
        lifetime_seconds: i64,
        issuer: &str,
        extra: Option<HashMap<String, ClaimValue>>,
    ) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: account_id.to_string(),
            kind,
            iat: now,
            exp: now + lifetime_seconds,
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
            extra: extra.unwrap_or_default(),
        }
    }

    /// Parses the subject back into an account id
    pub fn account_id(&self) -> Result<i64, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Malformed)
    }

    /// Whether the claims are expired at `now`
    ///
    /// The comparison is exclusive: a token with `exp == now` is already
    /// expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// The expiry instant, if the timestamp is representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Whether the token was issued strictly before `cutoff`
    pub fn issued_before(&self, cutoff: DateTime<Utc>) -> bool {
        self.iat < cutoff.timestamp()
    }
}

/// Token pair returned to the client after authentication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Token scheme for the Authorization header
    pub token_type: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair with configuration-driven lifetimes
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_expires_in: i64,
        refresh_expires_in: i64,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            access_expires_in,
            refresh_expires_in,
        }
    }
}

/// Why a token identifier was revoked before its natural expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevocationReason {
    Logout,
    PasswordReset,
    Rotation,
    Administrative,
}

impl fmt::Display for RevocationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logout => write!(f, "logout"),
            Self::PasswordReset => write!(f, "password_reset"),
            Self::Rotation => write!(f, "rotation"),
            Self::Administrative => write!(f, "administrative"),
        }
    }
}

/// Durable record of a revoked token identifier
///
/// Never mutated after creation. `expires_at` retains the token's own
/// expiry so the record can be garbage-collected once the token would
/// have been rejected on expiry alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationRecord {
    /// Unique token identifier (revocation key)
    pub jti: String,

    /// Account the token was issued to
    pub account_id: i64,

    /// Kind of the revoked token
    pub kind: TokenKind,

    /// Why the token was revoked
    pub reason: RevocationReason,

    /// When the revocation happened
    pub revoked_at: DateTime<Utc>,

    /// The token's own expiry, the exact purge boundary
    pub expires_at: DateTime<Utc>,
}

impl RevocationRecord {
    /// Builds a revocation record from verified claims
    pub fn from_claims(claims: &Claims, reason: RevocationReason) -> Result<Self, TokenError> {
        Ok(Self {
            jti: claims.jti.clone(),
            account_id: claims.account_id()?,
            kind: claims.kind,
            reason,
            revoked_at: Utc::now(),
            expires_at: claims.expires_at().ok_or(TokenError::Malformed)?,
        })
    }

    /// Whether the record may be deleted: the token it shadows would be
    /// rejected on expiry alone at `now`
    pub fn is_purgeable(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
