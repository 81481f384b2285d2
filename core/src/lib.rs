//! # Credo Core
//!
//! Token lifecycle and revocation core for the Credo authentication
//! system. This crate contains domain entities, credential workflows,
//! repository interfaces, and error types; persistence and transport are
//! supplied by collaborators implementing the repository traits.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
