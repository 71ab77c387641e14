//! Generate Crypto Material Use Case
//!
//! Produces the identity tree for organizations, peers, orderers and users.

use std::path::PathBuf;
use std::sync::Arc;

use validator::Validate;

use super::{prepare_target, require_exists};
use crate::domain::gateways::{ArtifactTool, Confirmer};
use crate::domain::models::artifacts::{CryptoMaterialRequest, GenerationOutcome};
use crate::shared::errors::UseCaseError;

/// Use case for generating crypto material
pub struct GenerateCryptoMaterialUseCase {
    artifact_tool: Arc<dyn ArtifactTool>,
    confirmer: Arc<dyn Confirmer>,
}

impl GenerateCryptoMaterialUseCase {
    /// Create a new GenerateCryptoMaterialUseCase
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
    /// `UseCaseError::MissingPrerequisite` if the config file does not exist and
    /// `UseCaseError::StageFailed` if the generator tool fails.
    pub async fn execute(&self, request: CryptoMaterialRequest) -> Result<GenerationOutcome, UseCaseError> {
        request.validate()?;

        let config_file = PathBuf::from(&request.config_path);
        let output_dir = PathBuf::from(&request.output_path);
        require_exists("crypto config", &config_file)?;

        tracing::info!(output = %output_dir.display(), "Generating crypto material");
        if !prepare_target(self.confirmer.as_ref(), "crypto material", &output_dir).await? {
            return Ok(GenerationOutcome::Skipped(output_dir));
        }

        self.artifact_tool
            .generate_crypto(&config_file, &output_dir)
            .await
            .map_err(UseCaseError::stage("failed to generate crypto material"))?;

        tracing::info!(output = %output_dir.display(), "Crypto material generated");
        Ok(GenerationOutcome::Generated(output_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::artifact_tool::MockArtifactTool;
    use crate::domain::gateways::confirmer::MockConfirmer;
    use crate::shared::errors::GatewayError;

    fn request(config: &std::path::Path, output: &std::path::Path) -> CryptoMaterialRequest {
        CryptoMaterialRequest {
            config_path: config.display().to_string(),
            output_path: output.display().to_string(),
        }
    }

    #[tokio::test]
    async fn should_return_validation_error_when_arguments_missing() {
        let mut tool = MockArtifactTool::new();
        tool.expect_generate_crypto().never();
        let mut confirmer = MockConfirmer::new();
        confirmer.expect_confirm().never();

        let use_case = GenerateCryptoMaterialUseCase::new(Arc::new(tool), Arc::new(confirmer));
        let result = use_case
            .execute(CryptoMaterialRequest {
                config_path: "crypto-config.yaml".to_string(),
                output_path: String::new(),
            })
            .await;

        match result {
            Err(UseCaseError::Validation(fields)) => assert_eq!(fields, vec!["output_path: is required"]),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_fail_when_config_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut tool = MockArtifactTool::new();
        tool.expect_generate_crypto().never();

        let use_case = GenerateCryptoMaterialUseCase::new(Arc::new(tool), Arc::new(MockConfirmer::new()));
        let result = use_case
            .execute(request(&dir.path().join("missing.yaml"), &dir.path().join("out")))
            .await;

        assert!(matches!(result, Err(UseCaseError::MissingPrerequisite { .. })));
        assert!(!dir.path().join("out").exists());
    }

    #[tokio::test]
    async fn should_generate_into_fresh_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("crypto-config.yaml");
        std::fs::write(&config, "OrdererOrgs: []").unwrap();
        let output = dir.path().join("cryptos");

        let mut tool = MockArtifactTool::new();
        tool.expect_generate_crypto()
            .times(1)
            .returning(|_, out| {
                std::fs::create_dir_all(out.join("peerOrganizations")).unwrap();
                Ok(())
            });

        let use_case = GenerateCryptoMaterialUseCase::new(Arc::new(tool), Arc::new(MockConfirmer::new()));
        let outcome = use_case.execute(request(&config, &output)).await.unwrap();

        assert_eq!(outcome, GenerationOutcome::Generated(output.clone()));
        assert!(output.join("peerOrganizations").is_dir());
    }

    #[tokio::test]
    async fn should_report_tool_failure_as_stage_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("crypto-config.yaml");
        std::fs::write(&config, "").unwrap();

        let mut tool = MockArtifactTool::new();
        tool.expect_generate_crypto().times(1).returning(|_, _| {
            Err(GatewayError::NonZeroExit {
                command: "cryptogen generate".to_string(),
                code: Some(1),
                stderr: "bad config".to_string(),
            })
        });

        let use_case = GenerateCryptoMaterialUseCase::new(Arc::new(tool), Arc::new(MockConfirmer::new()));
        let err = use_case
            .execute(request(&config, &dir.path().join("cryptos")))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            UseCaseError::StageFailed { stage: "failed to generate crypto material", .. }
        ));
    }

    #[tokio::test]
    async fn should_skip_when_regeneration_declined() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("crypto-config.yaml");
        std::fs::write(&config, "").unwrap();
        let output = dir.path().join("cryptos");
        std::fs::create_dir_all(&output).unwrap();

        let mut tool = MockArtifactTool::new();
        tool.expect_generate_crypto().never();
        let mut confirmer = MockConfirmer::new();
        confirmer.expect_confirm().times(1).returning(|_| Ok(false));

        let use_case = GenerateCryptoMaterialUseCase::new(Arc::new(tool), Arc::new(confirmer));
        let outcome = use_case.execute(request(&config, &output)).await.unwrap();

        assert_eq!(outcome, GenerationOutcome::Skipped(output));
    }
}
