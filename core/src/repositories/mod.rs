//! Repository traits: the contracts persistence collaborators must satisfy.

pub mod revocation_repository;
pub mod user_repository;

pub use revocation_repository::RevocationRepository;
pub use user_repository::UserRepository;
