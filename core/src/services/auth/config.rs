//! Configuration for the credential workflows

use credo_shared::config::AuthConfig;

/// Policy knobs for the credential workflows
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Whether a confirmed password reset also invalidates every
    /// session issued before the reset
    pub revoke_sessions_on_password_reset: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            revoke_sessions_on_password_reset: false,
        }
    }
}

impl AuthServiceConfig {
    /// Derive the workflow policy from the application-level config
    pub fn from_auth_config(config: &AuthConfig) -> Self {
        Self {
            revoke_sessions_on_password_reset: config.revoke_sessions_on_password_reset,
        }
    }
}
