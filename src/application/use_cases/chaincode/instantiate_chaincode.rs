//! Instantiate Chaincode Use Case

use std::sync::Arc;

use validator::Validate;

use crate::domain::gateways::NetworkCli;
use crate::domain::models::chaincode::{ChaincodeArgs, ChaincodeDeployment, DeployRequest};
use crate::shared::errors::UseCaseError;

/// Use case for instantiating an installed chaincode on a channel
pub struct InstantiateChaincodeUseCase {
    network_cli: Arc<dyn NetworkCli>,
    init_args: ChaincodeArgs,
    endorsement_policy: Option<String>,
}

impl InstantiateChaincodeUseCase {
    /// Create a new InstantiateChaincodeUseCase
    #[must_use]
    pub fn new(network_cli: Arc<dyn NetworkCli>, init_args: ChaincodeArgs, endorsement_policy: Option<String>) -> Self {
        Self {
            network_cli,
            init_args,
            endorsement_policy,
        }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` on missing arguments,
    /// `UseCaseError::Domain` for malformed identifiers and
    /// `UseCaseError::StageFailed` if the network rejects the transaction.
    pub async fn execute(&self, request: DeployRequest) -> Result<(), UseCaseError> {
        request.validate()?;
        let instance = request.instance()?;

        tracing::info!(chaincode = %instance, "Instantiating chaincode");
        self.network_cli
            .instantiate_chaincode(&ChaincodeDeployment {
                instance,
                args: self.init_args.clone(),
                endorsement_policy: self.endorsement_policy.clone(),
            })
            .await
            .map_err(UseCaseError::stage("failed to instantiate chaincode"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::network_cli::MockNetworkCli;

    #[tokio::test]
    async fn should_instantiate_with_configured_args_and_policy() {
        let mut cli = MockNetworkCli::new();
        cli.expect_instantiate_chaincode()
            .times(1)
            .withf(|d| {
                d.instance.to_string() == "mycc:1.0@mychannel"
                    && d.args.to_payload() == r#"{"Args":["init"]}"#
                    && d.endorsement_policy.as_deref() == Some("OR ('Org1MSP.member')")
            })
            .returning(|_| Ok(()));

        let use_case = InstantiateChaincodeUseCase::new(
            Arc::new(cli),
            ChaincodeArgs::new(["init"]),
            Some("OR ('Org1MSP.member')".to_string()),
        );
        let result = use_case
            .execute(DeployRequest {
                name: "mycc".to_string(),
                version: "1.0".to_string(),
                channel: "mychannel".to_string(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_not_submit_without_channel() {
        let mut cli = MockNetworkCli::new();
        cli.expect_instantiate_chaincode().never();

        let use_case = InstantiateChaincodeUseCase::new(Arc::new(cli), ChaincodeArgs::default(), None);
        let err = use_case
            .execute(DeployRequest {
                name: "mycc".to_string(),
                version: "1.0".to_string(),
                channel: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::Validation(fields) if fields == vec!["channel: is required"]));
    }
}
