//! Value objects returned from credential workflows.

pub mod auth_response;

pub use auth_response::{AccessTokenResponse, AuthResponse, ResetTokenResponse, UserProfile};
