//! Update Channel Use Case
//!
//! Submits the organization's anchor-peer update transaction.

use std::sync::Arc;

use validator::Validate;

use crate::application::use_cases::artifacts::require_exists;
use crate::domain::gateways::NetworkCli;
use crate::domain::models::artifacts::ChannelsRoot;
use crate::domain::models::channel::{AnchorPeersUpdate, ChannelName, ChannelRequest};
use crate::shared::errors::UseCaseError;

/// Use case for updating a channel's anchor peers
pub struct UpdateChannelUseCase {
    network_cli: Arc<dyn NetworkCli>,
    channels: ChannelsRoot,
}

impl UpdateChannelUseCase {
    /// Create a new UpdateChannelUseCase
    #[must_use]
    pub fn new(network_cli: Arc<dyn NetworkCli>, channels: ChannelsRoot) -> Self {
        Self { network_cli, channels }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` on missing arguments,
    /// `UseCaseError::MissingPrerequisite` if the anchor-peer transaction is
    /// absent and `UseCaseError::StageFailed` if the network rejects it.
    pub async fn execute(&self, request: ChannelRequest) -> Result<(), UseCaseError> {
        request.validate()?;
        let channel = ChannelName::parse(&request.channel_name)?;

        let anchors = self.channels.layout(channel.as_str()).anchors_tx(&request.org_id);
        require_exists("anchor peer transaction", &anchors.host)?;

        tracing::info!(channel = %channel, org = %request.org_id, "Updating anchor peers");
        self.network_cli
            .update_anchor_peers(&AnchorPeersUpdate {
                channel: channel.clone(),
                org_id: request.org_id,
                anchors_tx: anchors.container,
            })
            .await
            .map_err(UseCaseError::stage("failed to update channel"))?;

        tracing::info!(channel = %channel, "Anchor peers updated");
        Ok(())
    }
}
