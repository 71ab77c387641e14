//! Channel Domain Model
//!
//! Identifiers and requests for channel lifecycle operations.

use lazy_static::lazy_static;
use regex::Regex;
use validator::Validate;

use crate::shared::errors::DomainError;

lazy_static! {
    /// Channel names accepted by the ordering service
    static ref CHANNEL_NAME_REGEX: Regex = Regex::new(r"^[a-z][a-z0-9.-]*$").expect("valid regex");
}

/// Newtype wrapper for a validated channel name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelName(String);

impl ChannelName {
    /// Parse a channel name
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidChannelName` if the name does not match the
    /// ordering service's naming rule.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        if CHANNEL_NAME_REGEX.is_match(value) {
            Ok(Self(value.to_string()))
        } else {
            Err(DomainError::InvalidChannelName(value.to_string()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChannelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for ChannelName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Identifying arguments shared by create, join and update
#[derive(Debug, Clone, Default, Validate)]
pub struct ChannelRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub channel_name: String,

    #[validate(length(min = 1, message = "is required"))]
    pub org_id: String,

    /// Peer address to target; the utility container's default peer when absent
    pub peer_address: Option<String>,
}

impl ChannelRequest {
    #[must_use]
    pub fn new(channel_name: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            channel_name: channel_name.into(),
            org_id: org_id.into(),
            peer_address: None,
        }
    }

    #[must_use]
    pub fn with_peer(mut self, peer_address: Option<String>) -> Self {
        self.peer_address = peer_address.filter(|p| !p.is_empty());
        self
    }
}

/// Channel-creation submission handed to the network command interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelCreation {
    pub channel: ChannelName,
    pub channel_tx: String,
    pub output_block: String,
}

/// Channel-join submission handed to the network command interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelJoin {
    pub block: String,
    pub peer_address: Option<String>,
}

/// Anchor-peer update submission handed to the network command interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorPeersUpdate {
    pub channel: ChannelName,
    pub org_id: String,
    pub anchors_tx: String,
}
