//! Network Use Cases
//!
//! Bring-up pipeline, readiness poll, idempotent teardown and image install.

mod await_network_ready;
mod install_images;
mod start_network;
mod stop_network;

pub use await_network_ready::AwaitNetworkReadyUseCase;
pub use install_images::InstallImagesUseCase;
pub use start_network::{BootstrapStages, StartNetworkUseCase};
pub use stop_network::StopNetworkUseCase;
