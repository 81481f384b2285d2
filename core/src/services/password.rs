//! Password hashing and verification with a tunable work factor.
//!
//! Bcrypt embeds salt and cost in the hash string, so verification needs
//! no extra state and the cost can be raised over time: hashes made with
//! a lower cost are flagged by [`PasswordHasher::needs_rehash`] and
//! re-hashed on the next successful login instead of forcing a mass
//! reset.

use crate::errors::{DomainError, DomainResult, ValidationError};

/// Default bcrypt cost factor (around 100 ms per hash on current
/// reference hardware, a deliberate brute-force throttle)
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

/// One-way password hashing with a configurable cost factor
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl PasswordHasher {
    /// Creates a hasher with the given bcrypt cost factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext password
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The bcrypt hash, safe to store
    /// * `Err(DomainError)` - Empty input or hashing failure
    pub fn hash(&self, plaintext: &str) -> DomainResult<String> {
        if plaintext.is_empty() {
            return Err(ValidationError::RequiredField {
                field: "password".to_string(),
            }
            .into());
        }
        bcrypt::hash(plaintext, self.cost).map_err(|e| DomainError::Internal {
            message: format!("password hashing failed: {}", e),
        })
    }

    /// Verifies a plaintext password against a stored hash
    ///
    /// Constant-time comparison against the hash's embedded salt and
    /// cost. Never errors: a mismatch or a structurally invalid hash
    /// both return `false`.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        if plaintext.is_empty() || hash.is_empty() {
            return false;
        }
        bcrypt::verify(plaintext, hash).unwrap_or(false)
    }

    /// Whether a stored hash should be re-hashed at the next login
    ///
    /// True when the hash's embedded cost factor is below the configured
    /// cost, or when the hash cannot be parsed at all.
    pub fn needs_rehash(&self, hash: &str) -> bool {
        match parse_cost(hash) {
            Some(stored_cost) => stored_cost < self.cost,
            None => true,
        }
    }
}

// Bcrypt hash layout: $2b$12$<22 char salt><31 char digest>
fn parse_cost(hash: &str) -> Option<u32> {
    hash.split('$').nth(2)?.parse().ok()
}
