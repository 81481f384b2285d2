//! Pure validation utilities for identifiers and passwords
//!
//! These functions have no side effects and no I/O; the same input always
//! yields the same output, so they are safe to call from any number of
//! concurrent callers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Maximum accepted email length (RFC 5321 forward-path limit)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Punctuation set that satisfies the password symbol rule
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{};:'\",.<>?/\\|`~";

// Practical RFC 5322 subset: local-part@domain with a dotted domain and
// a 2+ letter TLD. Whitespace and control characters cannot match.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Check whether an identifier is a structurally valid email address
///
/// Callers should [`sanitize_email`] first so that `Foo@Bar.com` and
/// `foo@bar.com` validate (and compare) identically.
pub fn validate_email(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return false;
    }
    EMAIL_PATTERN.is_match(email)
}

/// Normalize an email address for storage and comparison
///
/// Must be applied before any uniqueness check or storage write.
pub fn sanitize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A single violated password policy rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordViolation {
    /// Shorter than [`MIN_PASSWORD_LENGTH`] characters
    TooShort,
    /// No uppercase letter
    MissingUppercase,
    /// No lowercase letter
    MissingLowercase,
    /// No digit
    MissingDigit,
    /// No symbol from [`PASSWORD_SYMBOLS`]
    MissingSymbol,
}

impl fmt::Display for PasswordViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => write!(
                f,
                "password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            ),
            Self::MissingUppercase => {
                write!(f, "password must contain at least one uppercase letter")
            }
            Self::MissingLowercase => {
                write!(f, "password must contain at least one lowercase letter")
            }
            Self::MissingDigit => write!(f, "password must contain at least one digit"),
            Self::MissingSymbol => {
                write!(f, "password must contain at least one special character")
            }
        }
    }
}

/// Check a password against the policy, returning every violated rule
///
/// An empty vec means the password is acceptable. Returning the full
/// list (not just the first failure) lets callers give precise feedback.
pub fn validate_password(password: &str) -> Vec<PasswordViolation> {
    let mut violations = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        violations.push(PasswordViolation::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(PasswordViolation::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(PasswordViolation::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PasswordViolation::MissingDigit);
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        violations.push(PasswordViolation::MissingSymbol);
    }

    violations
}

/// Score password strength from 0 to 100, 20 points per satisfied rule
pub fn password_strength(password: &str) -> u8 {
    let violations = validate_password(password);
    (100 - 20 * violations.len() as u8).min(100)
}
