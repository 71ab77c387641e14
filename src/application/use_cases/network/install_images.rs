//! Install Images Use Case
//!
//! Pre-flight pull of the network images at the configured tag, retagged as
//! `latest` so the composition resolves them.

use std::sync::Arc;

use crate::domain::gateways::ContainerRuntime;
use crate::domain::models::bootstrap::ImageSet;
use crate::shared::errors::UseCaseError;

/// Use case for pulling and tagging network images
pub struct InstallImagesUseCase {
    runtime: Arc<dyn ContainerRuntime>,
}

impl InstallImagesUseCase {
    /// Create a new InstallImagesUseCase
    #[must_use]
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    /// Execute the use case, returning how many images were installed
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` for an empty tag and
    /// `UseCaseError::StageFailed` on the first failing pull or tag.
    pub async fn execute(&self, images: ImageSet) -> Result<usize, UseCaseError> {
        if images.tag.is_empty() {
            return Err(UseCaseError::missing("tag"));
        }

        let references = images.references();
        for (pulled, latest) in &references {
            tracing::info!(image = %pulled, "Pulling image");
            self.runtime
                .pull_image(pulled)
                .await
                .map_err(UseCaseError::stage("failed to pull image"))?;
            self.runtime
                .tag_image(pulled, latest)
                .await
                .map_err(UseCaseError::stage("failed to tag image"))?;
        }

        tracing::info!(count = references.len(), tag = %images.tag, "Images installed");
        Ok(references.len())
    }
}
