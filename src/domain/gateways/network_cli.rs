//! Network Command Interface Gateway
//!
//! Abstract trait over the ledger network's command interface, executed
//! against the running utility peer process.

use async_trait::async_trait;

use crate::domain::models::chaincode::{ChaincodeCall, ChaincodeDeployment, ChaincodeInstall};
use crate::domain::models::channel::{AnchorPeersUpdate, ChannelCreation, ChannelJoin};
use crate::shared::errors::GatewayError;

/// Channel and chaincode commands of the live network
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NetworkCli: Send + Sync {
    /// List the channels the default peer has joined
    async fn list_channels(&self) -> Result<Vec<String>, GatewayError>;

    /// Submit a channel-creation transaction and fetch the resulting block
    async fn create_channel(&self, creation: &ChannelCreation) -> Result<(), GatewayError>;

    /// Submit a channel block to a peer
    async fn join_channel(&self, join: &ChannelJoin) -> Result<(), GatewayError>;

    /// Submit an anchor-peer update transaction
    async fn update_anchor_peers(&self, update: &AnchorPeersUpdate) -> Result<(), GatewayError>;

    /// Install a chaincode package on the peer
    async fn install_chaincode(&self, install: &ChaincodeInstall) -> Result<(), GatewayError>;

    /// Instantiate an installed chaincode on a channel
    async fn instantiate_chaincode(&self, deployment: &ChaincodeDeployment) -> Result<(), GatewayError>;

    /// Upgrade an instantiated chaincode to a newly installed version
    async fn upgrade_chaincode(&self, deployment: &ChaincodeDeployment) -> Result<(), GatewayError>;

    /// Submit a write transaction, returning the command output
    async fn invoke_chaincode(&self, call: &ChaincodeCall) -> Result<String, GatewayError>;

    /// Evaluate a read-only query, returning the command output
    async fn query_chaincode(&self, call: &ChaincodeCall) -> Result<String, GatewayError>;
}
