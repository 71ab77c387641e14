//! Artifact Tool Gateway
//!
//! Abstract trait over the containerized cryptographic-material and
//! configuration-transaction generator tools. All paths are host paths; the
//! adapter decides how they are mounted.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::models::artifacts::{AnchorPeersJob, ChannelTxJob, GenesisBlockJob};
use crate::shared::errors::GatewayError;

/// Generator tool operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArtifactTool: Send + Sync {
    /// Produce the identity tree described by `config_file` into `output_dir`
    async fn generate_crypto(&self, config_file: &Path, output_dir: &Path) -> Result<(), GatewayError>;

    /// Produce the ordering service genesis block
    async fn output_genesis_block(&self, job: &GenesisBlockJob) -> Result<(), GatewayError>;

    /// Inspect a block, failing if it cannot be decoded
    async fn inspect_block(&self, config_dir: &Path, block: &Path) -> Result<(), GatewayError>;

    /// Produce a channel-creation transaction
    async fn output_channel_tx(&self, job: &ChannelTxJob) -> Result<(), GatewayError>;

    /// Inspect a channel-creation transaction, failing if it cannot be decoded
    async fn inspect_channel_tx(&self, config_dir: &Path, tx: &Path) -> Result<(), GatewayError>;

    /// Produce an anchor-peer update transaction
    async fn output_anchor_peers_update(&self, job: &AnchorPeersJob) -> Result<(), GatewayError>;
}
