//! Await Network Ready Use Case
//!
//! Polls the network command interface until the utility peer answers.

use std::sync::Arc;
use std::time::Instant;

use crate::domain::gateways::NetworkCli;
use crate::domain::models::bootstrap::ReadinessPolicy;
use crate::shared::errors::UseCaseError;

/// Use case for waiting until the network runtime accepts commands
pub struct AwaitNetworkReadyUseCase {
    network_cli: Arc<dyn NetworkCli>,
    policy: ReadinessPolicy,
}

impl AwaitNetworkReadyUseCase {
    /// Create a new AwaitNetworkReadyUseCase
    #[must_use]
    pub fn new(network_cli: Arc<dyn NetworkCli>, policy: ReadinessPolicy) -> Self {
        Self { network_cli, policy }
    }

    /// Execute the use case, returning the channels the peer already joined
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::RuntimeNotReady` once every attempt has failed
    /// or timed out.
    pub async fn execute(&self) -> Result<Vec<String>, UseCaseError> {
        let attempts = self.policy.max_attempts.max(1);
        let started = Instant::now();

        for attempt in 1..=attempts {
            match tokio::time::timeout(self.policy.attempt_timeout, self.network_cli.list_channels()).await {
                Ok(Ok(channels)) => {
                    tracing::info!(attempt, "Network runtime ready");
                    return Ok(channels);
                }
                Ok(Err(e)) => {
                    tracing::debug!(attempt, error = %e, "Network runtime not ready yet");
                }
                Err(_) => {
                    tracing::debug!(attempt, timeout = ?self.policy.attempt_timeout, "Readiness probe timed out");
                }
            }

            if attempt < attempts {
                tokio::time::sleep(self.policy.interval).await;
            }
        }

        tracing::error!(attempts, "Network runtime never became ready");
        Err(UseCaseError::RuntimeNotReady {
            attempts,
            waited: started.elapsed(),
        })
    }
}
