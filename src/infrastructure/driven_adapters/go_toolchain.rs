//! Go Chaincode Toolchain
//!
//! Implements the ChaincodeToolchain trait with the local `go` binary when it
//! is installed, and with the configured golang image otherwise.

use std::path::Path;

use async_trait::async_trait;

use super::process::{host_path, CommandRunner, CommandSpec};
use crate::domain::gateways::ChaincodeToolchain;
use crate::shared::errors::GatewayError;

/// Where build and test steps run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toolchain {
    Local,
    Container { image: String },
}

/// Go implementation of ChaincodeToolchain
pub struct GoToolchain {
    runner: CommandRunner,
    toolchain: Toolchain,
}

impl GoToolchain {
    /// Create a new GoToolchain with an explicit environment
    #[must_use]
    pub fn new(runner: CommandRunner, toolchain: Toolchain) -> Self {
        Self { runner, toolchain }
    }

    /// Use the local `go` binary if it runs, the golang image otherwise
    pub async fn detect(runner: CommandRunner, golang_image: String) -> Self {
        let toolchain = if runner.is_available("go", "version").await {
            Toolchain::Local
        } else {
            Toolchain::Container { image: golang_image }
        };
        tracing::debug!(toolchain = ?toolchain, "Selected chaincode toolchain");
        Self::new(runner, toolchain)
    }

    fn go(&self, name: &str, source_dir: &Path, go_args: &[&str]) -> Result<CommandSpec, GatewayError> {
        Ok(match &self.toolchain {
            Toolchain::Local => CommandSpec::new("go").args(go_args.iter().copied()).current_dir(source_dir),
            Toolchain::Container { image } => {
                let workdir = format!("/chaincode/{name}");
                CommandSpec::new("docker")
                    .args(["run", "--rm", "-v"])
                    .arg(format!("{}:{workdir}", host_path(source_dir)?))
                    .arg("-w")
                    .arg(workdir)
                    .arg(image.clone())
                    .arg("go")
                    .args(go_args.iter().copied())
            }
        })
    }
}

#[async_trait]
impl ChaincodeToolchain for GoToolchain {
    async fn build(&self, name: &str, source_dir: &Path) -> Result<(), GatewayError> {
        self.runner.run(&self.go(name, source_dir, &["build", "./..."])?).await?;
        Ok(())
    }

    async fn test(&self, name: &str, source_dir: &Path) -> Result<(), GatewayError> {
        self.runner.run(&self.go(name, source_dir, &["test", "./..."])?).await?;
        Ok(())
    }
}
