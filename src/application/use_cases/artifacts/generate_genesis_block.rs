//! Generate Genesis Block Use Case
//!
//! Produces and inspects the ordering service genesis block under
//! `{base}/{system_channel}/genesis.block`.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use super::{prepare_target, require_exists, write_manifest};
use crate::domain::gateways::{ArtifactTool, Confirmer};
use crate::domain::models::artifacts::{
    GenerationManifest, GenerationOutcome, GenesisBlockJob, GenesisBlockRequest, GENESIS_BLOCK_FILE,
};
use crate::shared::errors::UseCaseError;

/// Use case for generating the genesis block
pub struct GenerateGenesisBlockUseCase {
    artifact_tool: Arc<dyn ArtifactTool>,
    confirmer: Arc<dyn Confirmer>,
    system_channel: String,
}

impl GenerateGenesisBlockUseCase {
    /// Create a new GenerateGenesisBlockUseCase
    #[must_use]
    pub fn new(artifact_tool: Arc<dyn ArtifactTool>, confirmer: Arc<dyn Confirmer>, system_channel: String) -> Self {
        Self {
            artifact_tool,
            confirmer,
            system_channel,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` if an argument is empty,
    /// `UseCaseError::MissingPrerequisite` if the config or crypto directories
    /// are absent and `UseCaseError::StageFailed` if generating or inspecting
    /// the block fails.
    pub async fn execute(&self, request: GenesisBlockRequest) -> Result<GenerationOutcome, UseCaseError> {
        request.validate()?;

        let config_dir = PathBuf::from(&request.config_path);
        let cryptos_dir = PathBuf::from(&request.cryptos_path);
        require_exists("configtx directory", &config_dir)?;
        require_exists("crypto material", &cryptos_dir)?;

        let target = PathBuf::from(&request.base_path).join(&self.system_channel);
        tracing::info!(
            profile = %request.network_profile,
            system_channel = %self.system_channel,
            "Generating genesis block"
        );
        if !prepare_target(self.confirmer.as_ref(), "genesis block", &target).await? {
            return Ok(GenerationOutcome::Skipped(target));
        }

        let job = GenesisBlockJob {
            config_dir: config_dir.clone(),
            cryptos_dir,
            profile: request.network_profile.clone(),
            system_channel: self.system_channel.clone(),
            output_block: target.join(GENESIS_BLOCK_FILE),
        };
        self.artifact_tool
            .output_genesis_block(&job)
            .await
            .map_err(UseCaseError::stage("failed to generate genesis block"))?;
        self.artifact_tool
            .inspect_block(&config_dir, &job.output_block)
            .await
            .map_err(UseCaseError::stage("failed to inspect genesis block"))?;

        write_manifest(
            &target,
            &GenerationManifest {
                kind: "genesis".to_string(),
                network_profile: request.network_profile,
                channel_profile: None,
                channel: self.system_channel.clone(),
                org_id: None,
                artifacts: vec![GENESIS_BLOCK_FILE.to_string()],
                generated_at: Utc::now(),
            },
        )
        .await?;

        tracing::info!(block = %job.output_block.display(), "Genesis block generated");
        Ok(GenerationOutcome::Generated(target))
    }
}
