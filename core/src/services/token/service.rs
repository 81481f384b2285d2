//! Token issuance, verification, and revocation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::domain::entities::token::{
    ClaimValue, Claims, RevocationReason, RevocationRecord, TokenKind, TokenPair,
};
use crate::errors::{DomainResult, TokenError};
use crate::repositories::RevocationRepository;

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;

/// Service for issuing and verifying signed tokens
///
/// Every protected operation must pass through [`TokenService::verify`];
/// it is the single gate combining signature, kind, expiry, and
/// revocation checks.
pub struct TokenService<R: RevocationRepository> {
    pub(crate) repository: Arc<R>,
    pub(crate) codec: TokenCodec,
    config: TokenServiceConfig,
}

impl<R: RevocationRepository> TokenService<R> {
    /// Creates a new token service
    ///
    /// # Arguments
    ///
    /// * `repository` - Revocation store for blacklist lookups
    /// * `config` - Token service configuration
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Self {
        let codec = TokenCodec::new(&config);
        Self {
            repository,
            codec,
            config,
        }
    }

    /// The immutable configuration this service was built with
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Issues a token of the given kind for an account
    ///
    /// The lifetime comes from configuration per kind; a fresh jti is
    /// generated on every call. The kind is embedded in the signed
    /// claims so cross-kind presentation fails at verification.
    pub fn issue(
        &self,
        account_id: i64,
        kind: TokenKind,
        extra: Option<HashMap<String, ClaimValue>>,
    ) -> DomainResult<String> {
        let claims = Claims::new(
            account_id,
            kind,
            self.config.lifetime_for(kind),
            &self.config.issuer,
            extra,
        );
        Ok(self.codec.encode(&claims)?)
    }

    /// Issues a fresh access + refresh token pair
    pub fn issue_pair(&self, account_id: i64) -> DomainResult<TokenPair> {
        let access_token = self.issue(account_id, TokenKind::Access, None)?;
        let refresh_token = self.issue(account_id, TokenKind::Refresh, None)?;
        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry,
            self.config.refresh_token_expiry,
        ))
    }

    /// Verifies a token, returning its claims
    ///
    /// Checks run in order and short-circuit on the first failure:
    ///
    /// 1. Decode: structure and signature (`Malformed`,
    ///    `InvalidSignature`)
    /// 2. Kind: must match `expected_kind` (`WrongKind`)
    /// 3. Expiry: exclusive comparison, `exp == now` is rejected
    ///    (`Expired`)
    /// 4. Revocation: jti lookup plus the account not-before cutoff
    ///    (`Revoked`) - performed even for a structurally and
    ///    temporally valid token, since revocation must override a
    ///    still-unexpired token
    pub async fn verify(&self, token: &str, expected_kind: TokenKind) -> DomainResult<Claims> {
        let claims = self.codec.decode(token)?;

        if claims.kind != expected_kind {
            return Err(TokenError::WrongKind {
                expected: expected_kind,
                actual: claims.kind,
            }
            .into());
        }

        if claims.is_expired(Utc::now()) {
            return Err(TokenError::Expired.into());
        }

        if self.repository.is_revoked(&claims.jti).await? {
            return Err(TokenError::Revoked.into());
        }
        if let Some(cutoff) = self.repository.not_before(claims.account_id()?).await? {
            if claims.issued_before(cutoff) {
                return Err(TokenError::Revoked.into());
            }
        }

        Ok(claims)
    }

    /// Revokes a token by recording its jti
    ///
    /// Idempotent: a jti already on record is a no-op.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Record stored
    /// * `Ok(false)` - jti was already revoked
    pub async fn revoke(&self, claims: &Claims, reason: RevocationReason) -> DomainResult<bool> {
        let record = RevocationRecord::from_claims(claims, reason)?;
        let inserted = self.repository.insert(record).await?;
        if inserted {
            debug!(jti = %claims.jti, %reason, "token revoked");
        } else {
            debug!(jti = %claims.jti, "token was already revoked");
        }
        Ok(inserted)
    }

    /// Invalidates every outstanding token of an account issued up to
    /// now (full-session invalidation)
    ///
    /// Tokens issued after this call remain valid.
    pub async fn revoke_account(&self, account_id: i64) -> DomainResult<()> {
        self.repository.set_not_before(account_id, Utc::now()).await
    }

    /// Deletes revocation records whose retention bound has passed
    pub async fn purge_expired(&self) -> DomainResult<usize> {
        self.repository.purge_expired(Utc::now()).await
    }
}
