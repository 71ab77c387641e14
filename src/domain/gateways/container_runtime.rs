//! Container Runtime Gateway
//!
//! Abstract trait over the container runtime that owns the network's
//! processes. The orchestrator starts and stops the composition but never
//! mutates running containers directly.

use async_trait::async_trait;

use crate::shared::errors::GatewayError;

/// Container runtime operations used by bootstrap, teardown and image install
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Start every process of the declared composition in the background
    async fn up(&self) -> Result<(), GatewayError>;

    /// Stop and remove the declared composition; succeeds when nothing runs
    async fn down(&self) -> Result<(), GatewayError>;

    /// Force-remove containers whose name matches the filter, returning how many
    async fn remove_containers(&self, name_filter: &str) -> Result<usize, GatewayError>;

    /// Remove images whose reference matches the filter, returning how many
    async fn remove_images(&self, name_filter: &str) -> Result<usize, GatewayError>;

    /// Prune dangling images
    async fn prune_dangling_images(&self) -> Result<(), GatewayError>;

    /// Pull an image reference
    async fn pull_image(&self, image: &str) -> Result<(), GatewayError>;

    /// Tag an existing image with another reference
    async fn tag_image(&self, source: &str, target: &str) -> Result<(), GatewayError>;
}
