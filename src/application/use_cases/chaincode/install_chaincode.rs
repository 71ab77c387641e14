//! Install Chaincode Use Case
//!
//! The package path is what the peer sees; its host source directory is the
//! same path relative to the chaincode root on both sides.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use validator::Validate;

use crate::application::use_cases::artifacts::require_exists;
use crate::domain::gateways::NetworkCli;
use crate::domain::models::chaincode::{ChaincodeInstall, ChaincodeVersion, InstallRequest};
use crate::shared::errors::UseCaseError;

/// Use case for installing a chaincode package on the peer
pub struct InstallChaincodeUseCase {
    network_cli: Arc<dyn NetworkCli>,
    chaincode_root: PathBuf,
    package_root: String,
}

impl InstallChaincodeUseCase {
    /// Create a new InstallChaincodeUseCase
    ///
    /// `chaincode_root` is the host source root and `package_root` the same
    /// directory as seen by the peer.
    #[must_use]
    pub fn new(network_cli: Arc<dyn NetworkCli>, chaincode_root: PathBuf, package_root: String) -> Self {
        Self {
            network_cli,
            chaincode_root,
            package_root,
        }
    }

    /// Execute the use case
    ///
    /// Version uniqueness is left to the network: a duplicate version fails
    /// with the peer's own message.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` on missing arguments or a path
    /// outside the package root,
    /// `UseCaseError::Domain` for a malformed version,
    /// `UseCaseError::MissingPrerequisite` if the source behind the path is absent
    /// and `UseCaseError::StageFailed` if the peer rejects the install.
    pub async fn execute(&self, request: InstallRequest) -> Result<(), UseCaseError> {
        request.validate()?;
        let version = ChaincodeVersion::parse(&request.version)?;
        let source = self.host_source(&request.path)?;
        require_exists("chaincode source", &source)?;

        tracing::info!(chaincode = %request.name, version = %version, path = %request.path, "Installing chaincode");
        self.network_cli
            .install_chaincode(&ChaincodeInstall {
                name: request.name,
                version,
                path: request.path,
            })
            .await
            .map_err(UseCaseError::stage("failed to install chaincode"))
    }

    /// Host directory behind package path `path`
    fn host_source(&self, path: &str) -> Result<PathBuf, UseCaseError> {
        let root = self.package_root.trim_end_matches('/');
        let relative = path
            .strip_prefix(root)
            .and_then(|rest| rest.strip_prefix('/'))
            .map(|rest| rest.trim_end_matches('/'))
            .filter(|rest| !rest.is_empty())
            .map(Path::new)
            .filter(|rest| rest.components().all(|c| matches!(c, Component::Normal(_))))
            .ok_or_else(|| UseCaseError::Validation(vec![format!("path: must be a package under {root}")]))?;

        Ok(self.chaincode_root.join(relative))
    }
}
