//! Account store contract consumed by the credential workflows.
//!
//! The core never touches account storage directly; every read and write
//! goes through this trait. Email arguments are always the sanitized
//! form (callers normalize before lookup, see
//! `credo_shared::utils::validation::sanitize_email`).

use async_trait::async_trait;

use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainResult;

/// Repository trait for account persistence operations
///
/// # Atomicity
///
/// `insert` must provide insert-if-absent semantics on the email column:
/// two concurrent registrations with the same email must result in
/// exactly one account and one `AccountAlreadyExists` failure. Retry and
/// timeout policy belongs to the implementation, not to this core.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an account by its sanitized email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - Account found
    /// * `Ok(None)` - No account with this email
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Find an account by its id
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>>;

    /// Atomically create an account if the email is unused
    ///
    /// # Returns
    /// * `Ok(User)` - The stored account with its assigned id
    /// * `Err(DomainError::Auth(AccountAlreadyExists))` - Email taken
    /// * `Err(DomainError)` - Storage failure
    async fn insert(&self, user: NewUser) -> DomainResult<User>;

    /// Persist changes to an existing account
    async fn update(&self, user: &User) -> DomainResult<()>;
}
