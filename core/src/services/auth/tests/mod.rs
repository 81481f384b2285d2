//! Tests for the credential workflows

#[cfg(test)]
mod service_tests;
