//! Stop Network Use Case
//!
//! Idempotent teardown: bring the composition down, clean derived containers
//! and images, then remove the ledger data directory only on confirmation.

use std::sync::Arc;

use crate::domain::gateways::{Confirmer, ContainerRuntime};
use crate::domain::models::bootstrap::{TeardownOutcome, TeardownTargets};
use crate::shared::errors::UseCaseError;

/// Use case for tearing down the network runtime
pub struct StopNetworkUseCase {
    runtime: Arc<dyn ContainerRuntime>,
    confirmer: Arc<dyn Confirmer>,
    targets: TeardownTargets,
}

impl StopNetworkUseCase {
    /// Create a new StopNetworkUseCase
    #[must_use]
    pub fn new(runtime: Arc<dyn ContainerRuntime>, confirmer: Arc<dyn Confirmer>, targets: TeardownTargets) -> Self {
        Self {
            runtime,
            confirmer,
            targets,
        }
    }

    /// Execute the use case
    ///
    /// Succeeds on an already-stopped network. Declining data removal still
    /// returns success with `data_removed == false`.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::StageFailed` if the container runtime fails and
    /// `UseCaseError::Io` if the data directory cannot be removed.
    pub async fn execute(&self) -> Result<TeardownOutcome, UseCaseError> {
        tracing::info!("Stopping network");
        self.runtime
            .down()
            .await
            .map_err(UseCaseError::stage("failed to stop network"))?;

        let mut outcome = TeardownOutcome::default();
        outcome.containers_removed += self
            .runtime
            .remove_containers(&self.targets.derived_filter)
            .await
            .map_err(UseCaseError::stage("failed to remove chaincode containers"))?;
        outcome.images_removed = self
            .runtime
            .remove_images(&self.targets.derived_filter)
            .await
            .map_err(UseCaseError::stage("failed to remove chaincode images"))?;
        self.runtime
            .prune_dangling_images()
            .await
            .map_err(UseCaseError::stage("failed to prune dangling images"))?;
        outcome.containers_removed += self
            .runtime
            .remove_containers(&self.targets.container_filter)
            .await
            .map_err(UseCaseError::stage("failed to remove network containers"))?;

        outcome.data_removed = self.remove_ledger_data().await?;

        tracing::info!(
            containers = outcome.containers_removed,
            images = outcome.images_removed,
            data_removed = outcome.data_removed,
            "Network stopped"
        );
        Ok(outcome)
    }

    async fn remove_ledger_data(&self) -> Result<bool, UseCaseError> {
        let data = &self.targets.ledger_data;
        if !data.exists() {
            return Ok(false);
        }

        let question = format!("Delete ledger data at {}?", data.display());
        if !self.confirmer.confirm(&question).await? {
            tracing::warn!(dir = %data.display(), "Keeping ledger data");
            return Ok(false);
        }

        tokio::fs::remove_dir_all(data)
            .await
            .map_err(UseCaseError::io(format!("failed to remove {}", data.display())))?;
        Ok(true)
    }
}
