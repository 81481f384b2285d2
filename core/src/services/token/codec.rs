//! Signing and parsing of the compact claim set.
//!
//! The wire format is the compact JWS convention: base64url-encoded
//! header, payload, and signature joined by dots, so standard client
//! libraries interoperate without modification.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

/// Signs and parses tokens with a configured secret and algorithm
///
/// Stateless and safely callable from any number of concurrent callers.
/// Expiry is deliberately NOT checked here: the verifier owns that step
/// so its failure kind stays distinct from structural and signature
/// failures.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec from the token service configuration
    pub fn new(config: &TokenServiceConfig) -> Self {
        // Pinning the algorithm makes a header-declared downgrade fail
        // signature validation instead of being silently honored.
        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            header: Header::new(config.algorithm),
            validation,
        }
    }

    /// Serializes and signs a claim set
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&self.header, claims, &self.encoding_key).map_err(|_| TokenError::IssuanceFailed)
    }

    /// Parses a token, verifying the signature before returning claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature valid, structure intact
    /// * `Err(TokenError::InvalidSignature)` - Signature mismatch or
    ///   algorithm confusion
    /// * `Err(TokenError::Malformed)` - Structural corruption
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm
                | jsonwebtoken::errors::ErrorKind::InvalidAlgorithmName
                | jsonwebtoken::errors::ErrorKind::MissingAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::Malformed,
            })
    }
}
