//! Token service module for the signed-token lifecycle
//!
//! This module handles all token-related operations:
//! - Signing and parsing the compact claim set (codec)
//! - Access, refresh, and password-reset token issuance
//! - Verification: signature, kind, expiry, revocation
//! - Revocation records and background purge of expired entries

mod cleanup;
mod codec;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{CleanupConfig, RevocationCleanupService};
pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use service::TokenService;
