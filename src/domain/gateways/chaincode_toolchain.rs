//! Chaincode Toolchain Gateway
//!
//! Abstract trait over the environment that builds and unit-tests contracts.

use std::path::Path;

use async_trait::async_trait;

use crate::shared::errors::GatewayError;

/// Build and test steps for a chaincode source tree
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChaincodeToolchain: Send + Sync {
    /// Compile the chaincode found in `source_dir`
    async fn build(&self, name: &str, source_dir: &Path) -> Result<(), GatewayError>;

    /// Run the chaincode's unit tests found in `source_dir`
    async fn test(&self, name: &str, source_dir: &Path) -> Result<(), GatewayError>;
}
