//! Create Channel Use Case
//!
//! Submits the channel-creation transaction and fetches the channel block.

use std::sync::Arc;

use validator::Validate;

use crate::application::use_cases::artifacts::require_exists;
use crate::domain::gateways::NetworkCli;
use crate::domain::models::artifacts::ChannelsRoot;
use crate::domain::models::channel::{ChannelCreation, ChannelName, ChannelRequest};
use crate::shared::errors::UseCaseError;

/// Use case for creating a channel
pub struct CreateChannelUseCase {
    network_cli: Arc<dyn NetworkCli>,
    channels: ChannelsRoot,
}

impl CreateChannelUseCase {
    /// Create a new CreateChannelUseCase
    #[must_use]
    pub fn new(network_cli: Arc<dyn NetworkCli>, channels: ChannelsRoot) -> Self {
        Self { network_cli, channels }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` if the channel name or org id is
    /// empty, `UseCaseError::MissingPrerequisite` if the channel transaction has
    /// not been generated and `UseCaseError::StageFailed` if the network
    /// rejects the submission.
    pub async fn execute(&self, request: ChannelRequest) -> Result<(), UseCaseError> {
        request.validate()?;
        let channel = ChannelName::parse(&request.channel_name)?;
        let layout = self.channels.layout(channel.as_str());

        let channel_tx = layout.channel_tx();
        require_exists("channel transaction", &channel_tx.host)?;

        tracing::info!(channel = %channel, org = %request.org_id, "Creating channel");
        self.network_cli
            .create_channel(&ChannelCreation {
                channel: channel.clone(),
                channel_tx: channel_tx.container,
                output_block: layout.block().container,
            })
            .await
            .map_err(UseCaseError::stage("failed to create channel"))?;

        tracing::info!(channel = %channel, "Channel created");
        Ok(())
    }
}
