//! Shared utilities and common types for the Credo authentication core
//!
//! This crate provides functionality used across the workspace:
//! - Configuration types
//! - Boundary response structures
//! - Pure validation utilities (email, password policy)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AuthConfig, JwtConfig};
pub use types::ErrorResponse;
pub use utils::validation;
