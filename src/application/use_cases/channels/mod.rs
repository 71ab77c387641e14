//! Channel Use Cases
//!
//! Create, join and anchor-peer update against the running network. Each
//! operation checks that the artifact it submits exists before forwarding.

mod create_channel;
mod join_channel;
mod update_channel;

pub use create_channel::CreateChannelUseCase;
pub use join_channel::JoinChannelUseCase;
pub use update_channel::UpdateChannelUseCase;
