//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{
    ClaimValue, Claims, RevocationReason, RevocationRecord, TokenKind, TokenPair,
};
pub use user::{NewUser, User};
