//! Invoke and Query Chaincode Use Cases
//!
//! One-shot calls against an instantiated chaincode. Arguments arrive as a
//! JSON payload, either `{"Args":[...]}` or a bare array.

use std::sync::Arc;

use validator::Validate;

use crate::domain::gateways::NetworkCli;
use crate::domain::models::chaincode::{CallRequest, ChaincodeArgs, ChaincodeCall};
use crate::domain::models::channel::ChannelName;
use crate::shared::errors::UseCaseError;

fn to_call(request: CallRequest) -> Result<ChaincodeCall, UseCaseError> {
    request.validate()?;
    let channel = ChannelName::parse(&request.channel)?;
    let args = ChaincodeArgs::from_json(&request.args)
        .map_err(|e| UseCaseError::Validation(vec![format!("args: {e}")]))?;

    Ok(ChaincodeCall {
        channel: channel.to_string(),
        name: request.name,
        args,
    })
}

/// Use case for submitting a write transaction
pub struct InvokeChaincodeUseCase {
    network_cli: Arc<dyn NetworkCli>,
}

impl InvokeChaincodeUseCase {
    /// Create a new InvokeChaincodeUseCase
    #[must_use]
    pub fn new(network_cli: Arc<dyn NetworkCli>) -> Self {
        Self { network_cli }
    }

    /// Execute the use case, returning the peer's response
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` on missing arguments or a malformed
    /// payload and `UseCaseError::StageFailed` if the invocation fails.
    pub async fn execute(&self, request: CallRequest) -> Result<String, UseCaseError> {
        let call = to_call(request)?;
        tracing::info!(channel = %call.channel, chaincode = %call.name, "Invoking chaincode");
        self.network_cli
            .invoke_chaincode(&call)
            .await
            .map_err(UseCaseError::stage("failed to invoke chaincode"))
    }
}

/// Use case for evaluating a read-only query
pub struct QueryChaincodeUseCase {
    network_cli: Arc<dyn NetworkCli>,
}

impl QueryChaincodeUseCase {
    /// Create a new QueryChaincodeUseCase
    #[must_use]
    pub fn new(network_cli: Arc<dyn NetworkCli>) -> Self {
        Self { network_cli }
    }

    /// Execute the use case, returning the query result
    ///
    /// # Errors
    ///
    /// Same as [`InvokeChaincodeUseCase::execute`].
    pub async fn execute(&self, request: CallRequest) -> Result<String, UseCaseError> {
        let call = to_call(request)?;
        tracing::debug!(channel = %call.channel, chaincode = %call.name, "Querying chaincode");
        self.network_cli
            .query_chaincode(&call)
            .await
            .map_err(UseCaseError::stage("failed to query chaincode"))
    }
}
