//! Account entity owned by the external account store.
//!
//! The core only reads and writes the fields the token subsystem depends
//! on. The password hash is opaque here: it is never the plaintext
//! password, never serialized outward, and redacted from `Debug` output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A registered account
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable numeric identifier, assigned by the account store
    pub id: i64,

    /// Normalized (sanitized) email address, unique per account
    pub email: String,

    /// Opaque password hash produced by the credential hasher
    pub password_hash: String,

    /// First name, if provided at registration
    pub first_name: Option<String>,

    /// Last name, if provided at registration
    pub last_name: Option<String>,

    /// Whether the account may authenticate
    pub is_active: bool,

    /// Whether the email address has been verified
    pub is_verified: bool,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the account was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the last successful authentication
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Updates the last-authenticated timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Marks the email address as verified
    pub fn verify(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    /// Deactivates the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Full name, falling back to the email address
    pub fn full_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.email.clone(),
        }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("is_active", &self.is_active)
            .field("is_verified", &self.is_verified)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("last_login_at", &self.last_login_at)
            .finish()
    }
}

/// Fields needed to create an account
///
/// The store assigns the id and timestamps; new accounts start active
/// and unverified.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Sanitized email address
    pub email: String,
    /// Hashed password
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl NewUser {
    /// Materializes the account record the store should persist
    pub fn into_user(self, id: i64) -> User {
        let now = Utc::now();
        User {
            id,
            email: self.email,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            is_active: true,
            is_verified: false,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }
}
