//! Email delivery contract consumed by the credential workflows.
//!
//! The core never embeds delivery logic. Implementations live outside
//! this crate; the workflows only hand a template, a recipient, and the
//! template context to whatever is attached. Delivery failure never
//! blocks the workflow that triggered it.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::DomainResult;

/// The notification being sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    /// Sent after a successful registration
    Welcome,
    /// Carries the password-reset token to the account owner
    PasswordReset,
}

/// Contract for outbound notification delivery
#[async_trait]
pub trait MailerService: Send + Sync {
    /// Dispatch one email
    ///
    /// # Arguments
    ///
    /// * `template` - Which notification to render
    /// * `to` - Recipient address (already sanitized)
    /// * `context` - Template variables (names, tokens, expiry)
    async fn send(
        &self,
        template: EmailTemplate,
        to: &str,
        context: HashMap<String, String>,
    ) -> DomainResult<()>;
}

/// Mailer that silently drops everything
///
/// The default collaborator when no delivery backend is attached.
pub struct NoOpMailer;

#[async_trait]
impl MailerService for NoOpMailer {
    async fn send(
        &self,
        _template: EmailTemplate,
        _to: &str,
        _context: HashMap<String, String>,
    ) -> DomainResult<()> {
        Ok(())
    }
}
