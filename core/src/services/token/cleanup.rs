//! Periodic purge of expired revocation records.
//!
//! Expired tokens already fail verification on expiry alone, so their
//! revocation records are redundant and can be deleted. Purge timing is
//! independently schedulable and never coupled to the request path.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::errors::DomainResult;
use crate::repositories::RevocationRepository;

/// Configuration for the revocation cleanup service
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

/// Service for cleaning up expired revocation records
pub struct RevocationCleanupService<R: RevocationRepository + 'static> {
    repository: Arc<R>,
    config: CleanupConfig,
}

impl<R: RevocationRepository> RevocationCleanupService<R> {
    /// Create a new cleanup service
    pub fn new(repository: Arc<R>, config: CleanupConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single cleanup cycle
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    /// * `Err(DomainError)` - If the purge fails
    pub async fn run_cleanup(&self) -> DomainResult<usize> {
        if !self.config.enabled {
            return Ok(0);
        }

        let deleted = self.repository.purge_expired(Utc::now()).await?;
        info!("Deleted {} expired revocation records", deleted);
        Ok(deleted)
    }

    /// Start the cleanup service as a background task
    ///
    /// Spawns a tokio task that runs cleanup at regular intervals.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Revocation cleanup service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "Revocation cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!("Revocation cleanup cycle failed: {}", e);
                }
            }
        });
    }
}
