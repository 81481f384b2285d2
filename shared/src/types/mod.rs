//! Common type definitions shared across the workspace

mod response;

pub use response::ErrorResponse;
