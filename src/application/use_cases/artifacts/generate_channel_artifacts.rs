//! Generate Channel Artifacts Use Case
//!
//! Produces the channel-creation transaction and the anchor-peer update for
//! one (channel, org, profile) under `{base}/{channel}/`.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use super::{prepare_target, require_exists, write_manifest};
use crate::domain::gateways::{ArtifactTool, Confirmer};
use crate::domain::models::artifacts::{
    AnchorPeersJob, ChannelArtifactsRequest, ChannelLayout, ChannelTxJob, GenerationManifest,
    GenerationOutcome,
};
use crate::domain::models::channel::ChannelName;
use crate::shared::errors::UseCaseError;

/// Use case for generating channel artifacts
pub struct GenerateChannelArtifactsUseCase {
    artifact_tool: Arc<dyn ArtifactTool>,
    confirmer: Arc<dyn Confirmer>,
}

impl GenerateChannelArtifactsUseCase {
    /// Create a new GenerateChannelArtifactsUseCase
    #[must_use]
    pub fn new(artifact_tool: Arc<dyn ArtifactTool>, confirmer: Arc<dyn Confirmer>) -> Self {
        Self {
            artifact_tool,
            confirmer,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` if an argument is empty,
    /// `UseCaseError::Domain` for an invalid channel name,
    /// `UseCaseError::MissingPrerequisite` if the config or crypto directories
    /// are absent and `UseCaseError::StageFailed` on the first failing tool
    /// call; later calls are not attempted.
    pub async fn execute(&self, request: ChannelArtifactsRequest) -> Result<GenerationOutcome, UseCaseError> {
        request.validate()?;
        let channel = ChannelName::parse(&request.channel_name)?;

        let config_dir = PathBuf::from(&request.config_path);
        let cryptos_dir = PathBuf::from(&request.cryptos_path);
        require_exists("configtx directory", &config_dir)?;
        require_exists("crypto material", &cryptos_dir)?;

        let layout = ChannelLayout::host_only(&request.base_path, channel.as_str());
        let target = layout.channel_dir();
        tracing::info!(
            channel = %channel,
            org = %request.org_id,
            profile = %request.channel_profile,
            "Generating channel artifacts"
        );
        if !prepare_target(self.confirmer.as_ref(), "channel artifacts", &target).await? {
            return Ok(GenerationOutcome::Skipped(target));
        }

        let channel_tx = ChannelTxJob {
            config_dir: config_dir.clone(),
            cryptos_dir: cryptos_dir.clone(),
            profile: request.channel_profile.clone(),
            channel_name: channel.to_string(),
            output_tx: layout.channel_tx().host,
        };
        self.artifact_tool
            .output_channel_tx(&channel_tx)
            .await
            .map_err(UseCaseError::stage("failed to generate channel transaction"))?;
        self.artifact_tool
            .inspect_channel_tx(&config_dir, &channel_tx.output_tx)
            .await
            .map_err(UseCaseError::stage("failed to inspect channel transaction"))?;

        let anchors = AnchorPeersJob {
            config_dir,
            cryptos_dir,
            profile: request.channel_profile.clone(),
            channel_name: channel.to_string(),
            org_id: request.org_id.clone(),
            output_tx: layout.anchors_tx(&request.org_id).host,
        };
        self.artifact_tool
            .output_anchor_peers_update(&anchors)
            .await
            .map_err(UseCaseError::stage("failed to generate anchor peer transaction"))?;

        let file_name = |p: &PathBuf| p.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        write_manifest(
            &target,
            &GenerationManifest {
                kind: "channel".to_string(),
                network_profile: request.network_profile,
                channel_profile: Some(request.channel_profile),
                channel: channel.to_string(),
                org_id: Some(request.org_id),
                artifacts: vec![file_name(&channel_tx.output_tx), file_name(&anchors.output_tx)],
                generated_at: Utc::now(),
            },
        )
        .await?;

        tracing::info!(channel = %channel, "Channel artifacts generated");
        Ok(GenerationOutcome::Generated(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::artifact_tool::MockArtifactTool;
    use crate::domain::gateways::confirmer::MockConfirmer;
    use crate::shared::errors::{DomainError, GatewayError};
    use mockall::Sequence;

    fn request(root: &std::path::Path) -> ChannelArtifactsRequest {
        let config = root.join("config");
        let cryptos = root.join("cryptos");
        std::fs::create_dir_all(&config).unwrap();
        std::fs::create_dir_all(&cryptos).unwrap();

        ChannelArtifactsRequest {
            channel_name: "mychannel".to_string(),
            base_path: root.join("channels").display().to_string(),
            config_path: config.display().to_string(),
            cryptos_path: cryptos.display().to_string(),
            network_profile: "OneOrgOrdererGenesis".to_string(),
            channel_profile: "OneOrgChannel".to_string(),
            org_id: "Org1MSP".to_string(),
        }
    }

    fn failure(stderr: &str) -> GatewayError {
        GatewayError::NonZeroExit {
            command: "configtxgen".to_string(),
            code: Some(1),
            stderr: stderr.to_string(),
        }
    }

    #[tokio::test]
    async fn should_generate_channel_tx_then_anchors() {
        let dir = tempfile::tempdir().unwrap();
        let mut seq = Sequence::new();
        let mut tool = MockArtifactTool::new();
        tool.expect_output_channel_tx()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|job| job.output_tx.ends_with("mychannel/mychannel.tx") && job.profile == "OneOrgChannel")
            .returning(|_| Ok(()));
        tool.expect_inspect_channel_tx()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        tool.expect_output_anchor_peers_update()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|job| job.org_id == "Org1MSP" && job.output_tx.ends_with("mychannel/Org1MSPanchors.tx"))
            .returning(|_| Ok(()));

        let use_case = GenerateChannelArtifactsUseCase::new(Arc::new(tool), Arc::new(MockConfirmer::new()));
        let outcome = use_case.execute(request(dir.path())).await.unwrap();

        assert!(outcome.was_generated());
        assert!(outcome.path().join("manifest.json").exists());
    }

    #[tokio::test]
    async fn should_stop_before_anchors_when_channel_tx_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut tool = MockArtifactTool::new();
        tool.expect_output_channel_tx().times(1).returning(|_| Err(failure("unknown profile")));
        tool.expect_inspect_channel_tx().never();
        tool.expect_output_anchor_peers_update().never();

        let use_case = GenerateChannelArtifactsUseCase::new(Arc::new(tool), Arc::new(MockConfirmer::new()));
        let err = use_case.execute(request(dir.path())).await.unwrap_err();

        assert!(matches!(
            err,
            UseCaseError::StageFailed { stage: "failed to generate channel transaction", .. }
        ));
    }

    #[tokio::test]
    async fn should_report_anchor_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut tool = MockArtifactTool::new();
        tool.expect_output_channel_tx().returning(|_| Ok(()));
        tool.expect_inspect_channel_tx().returning(|_, _| Ok(()));
        tool.expect_output_anchor_peers_update()
            .times(1)
            .returning(|_| Err(failure("org not in profile")));

        let use_case = GenerateChannelArtifactsUseCase::new(Arc::new(tool), Arc::new(MockConfirmer::new()));
        let err = use_case.execute(request(dir.path())).await.unwrap_err();

        assert!(matches!(
            err,
            UseCaseError::StageFailed { stage: "failed to generate anchor peer transaction", .. }
        ));
    }

    #[tokio::test]
    async fn should_reject_invalid_channel_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut request = request(dir.path());
        request.channel_name = "My_Channel".to_string();

        let use_case = GenerateChannelArtifactsUseCase::new(
            Arc::new(MockArtifactTool::new()),
            Arc::new(MockConfirmer::new()),
        );
        let err = use_case.execute(request).await.unwrap_err();

        assert!(matches!(err, UseCaseError::Domain(DomainError::InvalidChannelName(_))));
    }

    #[tokio::test]
    async fn should_skip_existing_channel_dir_on_decline() {
        let dir = tempfile::tempdir().unwrap();
        let request = request(dir.path());
        let existing = PathBuf::from(&request.base_path).join("mychannel");
        std::fs::create_dir_all(&existing).unwrap();
        std::fs::write(existing.join("mychannel.tx"), b"old").unwrap();

        let mut tool = MockArtifactTool::new();
        tool.expect_output_channel_tx().never();
        let mut confirmer = MockConfirmer::new();
        confirmer
            .expect_confirm()
            .withf(|q| q.contains("channel artifacts"))
            .times(1)
            .returning(|_| Ok(false));

        let use_case = GenerateChannelArtifactsUseCase::new(Arc::new(tool), Arc::new(confirmer));
        let outcome = use_case.execute(request).await.unwrap();

        assert_eq!(outcome, GenerationOutcome::Skipped(existing.clone()));
        assert_eq!(std::fs::read(existing.join("mychannel.tx")).unwrap(), b"old");
    }
}
