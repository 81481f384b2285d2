//! Revocation store contract: the durable blacklist keyed by jti.
//!
//! The store exclusively owns `RevocationRecord` lifetime; services only
//! read and insert through this interface. Lookups must be O(1) on the
//! jti; purge runs on its own schedule, never on the request path.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RevocationRecord;
use crate::errors::DomainResult;

/// Repository trait for revocation record persistence
///
/// # Atomicity
///
/// `insert` must be an atomic idempotent insert: concurrent revocations
/// of the same jti are safe and leave exactly one record.
#[async_trait]
pub trait RevocationRepository: Send + Sync {
    /// Record a revoked token identifier
    ///
    /// Idempotent: revoking an already-revoked jti is a no-op, not an
    /// error. The existing record is left untouched.
    ///
    /// # Returns
    /// * `Ok(true)` - Record stored
    /// * `Ok(false)` - jti was already revoked
    /// * `Err(DomainError)` - Storage failure
    async fn insert(&self, record: RevocationRecord) -> DomainResult<bool>;

    /// Whether a jti has been revoked
    async fn is_revoked(&self, jti: &str) -> DomainResult<bool>;

    /// Delete records whose retention bound has passed
    ///
    /// Only records with `expires_at <= now` are deleted; a record whose
    /// token could still be presented as unexpired is never touched.
    /// Safe to run concurrently with lookups and inserts.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    async fn purge_expired(&self, now: DateTime<Utc>) -> DomainResult<usize>;

    /// Invalidate every token of an account issued before `at`
    ///
    /// Supports full-session invalidation without enumerating
    /// outstanding jtis. A later call may only move the cutoff forward.
    async fn set_not_before(&self, account_id: i64, at: DateTime<Utc>) -> DomainResult<()>;

    /// The account's current not-before cutoff, if any
    async fn not_before(&self, account_id: i64) -> DomainResult<Option<DateTime<Utc>>>;
}
