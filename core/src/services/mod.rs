//! Business services containing the credential workflows.

pub mod auth;
pub mod password;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, EmailTemplate, MailerService, NoOpMailer};
pub use password::PasswordHasher;
pub use token::{CleanupConfig, RevocationCleanupService, TokenCodec, TokenService, TokenServiceConfig};
