//! Test modules for the token service
