//! Configuration types for the authentication core

mod auth;

pub use auth::{AuthConfig, ConfigError, JwtConfig, MIN_SECRET_BYTES};
