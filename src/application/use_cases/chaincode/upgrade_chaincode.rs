//! Upgrade Chaincode Use Case
//!
//! Upgrade is a macro-operation: build, test and install the new version,
//! then submit the upgrade transaction.

use std::sync::Arc;

use validator::Validate;

use super::{BuildChaincodeUseCase, InstallChaincodeUseCase, TestChaincodeUseCase};
use crate::domain::gateways::NetworkCli;
use crate::domain::models::chaincode::{ChaincodeArgs, ChaincodeDeployment, ChaincodeNameRequest, DeployRequest, InstallRequest};
use crate::shared::errors::UseCaseError;

/// Use case for upgrading an instantiated chaincode
pub struct UpgradeChaincodeUseCase {
    build: Arc<BuildChaincodeUseCase>,
    test: Arc<TestChaincodeUseCase>,
    install: Arc<InstallChaincodeUseCase>,
    network_cli: Arc<dyn NetworkCli>,
    install_root: String,
    init_args: ChaincodeArgs,
    endorsement_policy: Option<String>,
}

impl UpgradeChaincodeUseCase {
    /// Create a new UpgradeChaincodeUseCase
    ///
    /// `install_root` is the chaincode root as seen by the peer; the package
    /// path submitted at install is `{install_root}/{name}`.
    #[must_use]
    pub fn new(
        build: Arc<BuildChaincodeUseCase>,
        test: Arc<TestChaincodeUseCase>,
        install: Arc<InstallChaincodeUseCase>,
        network_cli: Arc<dyn NetworkCli>,
        install_root: String,
        init_args: ChaincodeArgs,
        endorsement_policy: Option<String>,
    ) -> Self {
        Self {
            build,
            test,
            install,
            network_cli,
            install_root,
            init_args,
            endorsement_policy,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns the first failure among build, test, install and the upgrade
    /// transaction; later steps are not attempted.
    pub async fn execute(&self, request: DeployRequest) -> Result<(), UseCaseError> {
        request.validate()?;
        let instance = request.instance()?;

        tracing::info!(chaincode = %instance, "Upgrading chaincode");
        let named = ChaincodeNameRequest {
            name: request.name.clone(),
        };
        self.build.execute(named.clone()).await?;
        self.test.execute(named).await?;
        self.install
            .execute(InstallRequest {
                name: request.name.clone(),
                version: request.version.clone(),
                path: format!("{}/{}", self.install_root.trim_end_matches('/'), request.name),
            })
            .await?;

        self.network_cli
            .upgrade_chaincode(&ChaincodeDeployment {
                instance: instance.clone(),
                args: self.init_args.clone(),
                endorsement_policy: self.endorsement_policy.clone(),
            })
            .await
            .map_err(UseCaseError::stage("failed to upgrade chaincode"))?;

        tracing::info!(chaincode = %instance, "Chaincode upgraded");
        Ok(())
    }
}
