//! Credential orchestration module
//!
//! Composes the password hasher, token service, and repository
//! contracts into the public credential workflows:
//! - Registration and login
//! - Access token refresh
//! - Logout (token revocation)
//! - Password reset request and confirmation

mod config;
mod mailer;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use mailer::{EmailTemplate, MailerService, NoOpMailer};
pub use service::AuthService;
