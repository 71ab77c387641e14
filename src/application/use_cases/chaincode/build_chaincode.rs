//! Build and Test Chaincode Use Cases

use std::path::PathBuf;
use std::sync::Arc;

use validator::Validate;

use super::source_dir;
use crate::domain::gateways::ChaincodeToolchain;
use crate::domain::models::chaincode::ChaincodeNameRequest;
use crate::shared::errors::UseCaseError;

/// Use case for compiling a chaincode package
pub struct BuildChaincodeUseCase {
    toolchain: Arc<dyn ChaincodeToolchain>,
    chaincode_root: PathBuf,
}

impl BuildChaincodeUseCase {
    /// Create a new BuildChaincodeUseCase
    #[must_use]
    pub fn new(toolchain: Arc<dyn ChaincodeToolchain>, chaincode_root: PathBuf) -> Self {
        Self {
            toolchain,
            chaincode_root,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` for an empty name,
    /// `UseCaseError::MissingPrerequisite` if the source directory is absent
    /// and `UseCaseError::StageFailed` if compilation fails.
    pub async fn execute(&self, request: ChaincodeNameRequest) -> Result<(), UseCaseError> {
        request.validate()?;
        let dir = source_dir(&self.chaincode_root, &request.name)?;

        tracing::info!(chaincode = %request.name, "Building chaincode");
        self.toolchain
            .build(&request.name, &dir)
            .await
            .map_err(UseCaseError::stage("failed to build chaincode"))
    }
}

/// Use case for running a chaincode's unit tests
pub struct TestChaincodeUseCase {
    toolchain: Arc<dyn ChaincodeToolchain>,
    chaincode_root: PathBuf,
}

impl TestChaincodeUseCase {
    /// Create a new TestChaincodeUseCase
    #[must_use]
    pub fn new(toolchain: Arc<dyn ChaincodeToolchain>, chaincode_root: PathBuf) -> Self {
        Self {
            toolchain,
            chaincode_root,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Same as [`BuildChaincodeUseCase::execute`], with the stage reported as
    /// a test failure.
    pub async fn execute(&self, request: ChaincodeNameRequest) -> Result<(), UseCaseError> {
        request.validate()?;
        let dir = source_dir(&self.chaincode_root, &request.name)?;

        tracing::info!(chaincode = %request.name, "Testing chaincode");
        self.toolchain
            .test(&request.name, &dir)
            .await
            .map_err(UseCaseError::stage("failed to test chaincode"))
    }
}
