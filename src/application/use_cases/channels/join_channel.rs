//! Join Channel Use Case
//!
//! Submits the channel block to a designated peer.

use std::sync::Arc;

use validator::Validate;

use crate::application::use_cases::artifacts::require_exists;
use crate::domain::gateways::NetworkCli;
use crate::domain::models::artifacts::ChannelsRoot;
use crate::domain::models::channel::{ChannelJoin, ChannelName, ChannelRequest};
use crate::shared::errors::UseCaseError;

/// Use case for joining a peer to a channel
pub struct JoinChannelUseCase {
    network_cli: Arc<dyn NetworkCli>,
    channels: ChannelsRoot,
}

impl JoinChannelUseCase {
    /// Create a new JoinChannelUseCase
    #[must_use]
    pub fn new(network_cli: Arc<dyn NetworkCli>, channels: ChannelsRoot) -> Self {
        Self { network_cli, channels }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` on missing arguments,
    /// `UseCaseError::MissingPrerequisite` if the channel block was never
    /// fetched and `UseCaseError::StageFailed` if the peer rejects it.
    pub async fn execute(&self, request: ChannelRequest) -> Result<(), UseCaseError> {
        request.validate()?;
        let channel = ChannelName::parse(&request.channel_name)?;

        let block = self.channels.layout(channel.as_str()).block();
        require_exists("channel block", &block.host)?;

        tracing::info!(
            channel = %channel,
            peer = request.peer_address.as_deref().unwrap_or("default"),
            "Joining channel"
        );
        self.network_cli
            .join_channel(&ChannelJoin {
                block: block.container,
                peer_address: request.peer_address,
            })
            .await
            .map_err(UseCaseError::stage("failed to join channel"))?;

        tracing::info!(channel = %channel, "Peer joined channel");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::network_cli::MockNetworkCli;

    #[tokio::test]
    async fn should_join_designated_peer() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("mychannel")).unwrap();
        std::fs::write(dir.path().join("mychannel/mychannel.block"), b"block").unwrap();

        let mut cli = MockNetworkCli::new();
        cli.expect_join_channel()
            .times(1)
            .withf(|j| {
                j.block == "/peer/channels/mychannel/mychannel.block"
                    && j.peer_address.as_deref() == Some("peer1.org1.example.com:8051")
            })
            .returning(|_| Ok(()));

        let use_case = JoinChannelUseCase::new(Arc::new(cli), ChannelsRoot::new(dir.path(), "/peer/channels"));
        let request = ChannelRequest::new("mychannel", "Org1MSP")
            .with_peer(Some("peer1.org1.example.com:8051".to_string()));

        assert!(use_case.execute(request).await.is_ok());
    }

    #[tokio::test]
    async fn should_require_channel_block() {
        let dir = tempfile::tempdir().unwrap();
        let mut cli = MockNetworkCli::new();
        cli.expect_join_channel().never();

        let use_case = JoinChannelUseCase::new(Arc::new(cli), ChannelsRoot::new(dir.path(), "/peer/channels"));
        let err = use_case
            .execute(ChannelRequest::new("mychannel", "Org1MSP"))
            .await
            .unwrap_err();

        assert!(matches!(err, UseCaseError::MissingPrerequisite { .. }));
    }

    #[tokio::test]
    async fn should_return_usage_error_without_channel() {
        let dir = tempfile::tempdir().unwrap();
        let use_case = JoinChannelUseCase::new(
            Arc::new(MockNetworkCli::new()),
            ChannelsRoot::new(dir.path(), "/peer/channels"),
        );
        let err = use_case.execute(ChannelRequest::new("", "Org1MSP")).await.unwrap_err();

        assert_eq!(err.error_code(), "USAGE_ERROR");
    }
}
