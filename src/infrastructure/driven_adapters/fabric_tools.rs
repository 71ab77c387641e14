//! Containerized Generator Tools
//!
//! Implements the ArtifactTool trait by running `cryptogen` and `configtxgen`
//! inside the tools image with the host directories bind-mounted.

use std::path::Path;

use async_trait::async_trait;

use super::config::ContainerPathsConfig;
use super::process::{host_path, CommandRunner, CommandSpec};
use crate::domain::gateways::ArtifactTool;
use crate::domain::models::artifacts::{AnchorPeersJob, ChannelTxJob, GenesisBlockJob};
use crate::shared::errors::GatewayError;

/// Docker implementation of ArtifactTool
pub struct DockerizedFabricTools {
    runner: CommandRunner,
    image: String,
    mounts: ContainerPathsConfig,
}

impl DockerizedFabricTools {
    /// Create a new DockerizedFabricTools
    #[must_use]
    pub fn new(runner: CommandRunner, image: String, mounts: ContainerPathsConfig) -> Self {
        Self {
            runner,
            image,
            mounts,
        }
    }

    /// `docker run` of the tools image with the given `(host, container)` mounts
    fn tool(&self, volumes: &[(String, &str)]) -> CommandSpec {
        let mut spec = CommandSpec::new("docker").args(["run", "--rm"]);
        for (host, container) in volumes {
            spec = spec.arg("-v").arg(format!("{host}:{container}"));
        }
        spec.arg("-e")
            .arg(format!("FABRIC_CFG_PATH={}", self.mounts.tools_config))
            .arg(self.image.clone())
    }

    fn in_output(&self, file: &Path) -> String {
        let name = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        format!("{}/{}", self.mounts.tools_output, name)
    }

    fn config_mounts(&self, config_dir: &Path, cryptos_dir: &Path, output: &Path) -> Result<Vec<(String, &str)>, GatewayError> {
        Ok(vec![
            (host_path(config_dir)?, self.mounts.tools_config.as_str()),
            (host_path(cryptos_dir)?, self.mounts.tools_crypto.as_str()),
            (host_path(parent_of(output))?, self.mounts.tools_output.as_str()),
        ])
    }
}

fn parent_of(file: &Path) -> &Path {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[async_trait]
impl ArtifactTool for DockerizedFabricTools {
    async fn generate_crypto(&self, config_file: &Path, output_dir: &Path) -> Result<(), GatewayError> {
        let file_name = config_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let volumes = [
            (host_path(parent_of(config_file))?, self.mounts.tools_config.as_str()),
            (host_path(output_dir)?, self.mounts.tools_output.as_str()),
        ];

        let spec = self.tool(&volumes).args([
            "cryptogen".to_string(),
            "generate".to_string(),
            format!("--config={}/{}", self.mounts.tools_config, file_name),
            format!("--output={}", self.mounts.tools_output),
        ]);
        self.runner.run(&spec).await?;
        Ok(())
    }

    async fn output_genesis_block(&self, job: &GenesisBlockJob) -> Result<(), GatewayError> {
        let volumes = self.config_mounts(&job.config_dir, &job.cryptos_dir, &job.output_block)?;
        let spec = self.tool(&volumes).args([
            "configtxgen".to_string(),
            "-profile".to_string(),
            job.profile.clone(),
            "-channelID".to_string(),
            job.system_channel.clone(),
            "-outputBlock".to_string(),
            self.in_output(&job.output_block),
        ]);
        self.runner.run(&spec).await?;
        Ok(())
    }

    async fn inspect_block(&self, config_dir: &Path, block: &Path) -> Result<(), GatewayError> {
        let volumes = [
            (host_path(config_dir)?, self.mounts.tools_config.as_str()),
            (host_path(parent_of(block))?, self.mounts.tools_output.as_str()),
        ];
        let spec = self
            .tool(&volumes)
            .args(["configtxgen".to_string(), "-inspectBlock".to_string(), self.in_output(block)]);
        self.runner.run(&spec).await?;
        Ok(())
    }

    async fn output_channel_tx(&self, job: &ChannelTxJob) -> Result<(), GatewayError> {
        let volumes = self.config_mounts(&job.config_dir, &job.cryptos_dir, &job.output_tx)?;
        let spec = self.tool(&volumes).args([
            "configtxgen".to_string(),
            "-profile".to_string(),
            job.profile.clone(),
            "-channelID".to_string(),
            job.channel_name.clone(),
            "-outputCreateChannelTx".to_string(),
            self.in_output(&job.output_tx),
        ]);
        self.runner.run(&spec).await?;
        Ok(())
    }

    async fn inspect_channel_tx(&self, config_dir: &Path, tx: &Path) -> Result<(), GatewayError> {
        let volumes = [
            (host_path(config_dir)?, self.mounts.tools_config.as_str()),
            (host_path(parent_of(tx))?, self.mounts.tools_output.as_str()),
        ];
        let spec = self.tool(&volumes).args([
            "configtxgen".to_string(),
            "-inspectChannelCreateTx".to_string(),
            self.in_output(tx),
        ]);
        self.runner.run(&spec).await?;
        Ok(())
    }

    async fn output_anchor_peers_update(&self, job: &AnchorPeersJob) -> Result<(), GatewayError> {
        let volumes = self.config_mounts(&job.config_dir, &job.cryptos_dir, &job.output_tx)?;
        let spec = self.tool(&volumes).args([
            "configtxgen".to_string(),
            "-profile".to_string(),
            job.profile.clone(),
            "-channelID".to_string(),
            job.channel_name.clone(),
            "-asOrg".to_string(),
            job.org_id.clone(),
            "-outputAnchorPeersUpdate".to_string(),
            self.in_output(&job.output_tx),
        ]);
        self.runner.run(&spec).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounts() -> ContainerPathsConfig {
        ContainerPathsConfig {
            channels: "/opt/peer/channels".to_string(),
            chaincode: "github.com/chaincode".to_string(),
            tools_config: "/config".to_string(),
            tools_crypto: "/crypto-config".to_string(),
            tools_output: "/output".to_string(),
        }
    }

    #[test]
    fn test_tool_command_mounts_and_env() {
        let tools = DockerizedFabricTools::new(
            CommandRunner::new(),
            "hyperledger/fabric-tools:1.4.3".to_string(),
            mounts(),
        );
        let spec = tools.tool(&[("/srv/config".to_string(), "/config")]).arg("configtxgen");

        assert_eq!(
            spec.display(),
            "docker run --rm -v /srv/config:/config -e FABRIC_CFG_PATH=/config hyperledger/fabric-tools:1.4.3 configtxgen"
        );
    }

    #[test]
    fn test_in_output_uses_file_name_only() {
        let tools = DockerizedFabricTools::new(CommandRunner::new(), "tools".to_string(), mounts());
        assert_eq!(
            tools.in_output(Path::new("/srv/channels/mychannel/mychannel.tx")),
            "/output/mychannel.tx"
        );
    }

    #[test]
    fn test_parent_of_bare_file_is_current_dir() {
        assert_eq!(parent_of(Path::new("genesis.block")), Path::new("."));
        assert_eq!(parent_of(Path::new("a/genesis.block")), Path::new("a"));
    }
}
