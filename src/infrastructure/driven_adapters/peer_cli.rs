//! Peer Command Interface
//!
//! Implements the NetworkCli trait by executing `peer` commands inside the
//! running utility container.

use async_trait::async_trait;

use super::process::{CommandRunner, CommandSpec};
use crate::domain::gateways::NetworkCli;
use crate::domain::models::chaincode::{ChaincodeCall, ChaincodeDeployment, ChaincodeInstall};
use crate::domain::models::channel::{AnchorPeersUpdate, ChannelCreation, ChannelJoin};
use crate::shared::errors::GatewayError;

/// `docker exec` implementation of NetworkCli
pub struct PeerCli {
    runner: CommandRunner,
    utility_container: String,
    orderer_address: String,
}

impl PeerCli {
    /// Create a new PeerCli
    #[must_use]
    pub fn new(runner: CommandRunner, utility_container: String, orderer_address: String) -> Self {
        Self {
            runner,
            utility_container,
            orderer_address,
        }
    }

    fn peer(&self, peer_address: Option<&str>) -> CommandSpec {
        let mut spec = CommandSpec::new("docker").arg("exec");
        if let Some(address) = peer_address {
            spec = spec.arg("-e").arg(format!("CORE_PEER_ADDRESS={address}"));
        }
        spec.arg(self.utility_container.clone()).arg("peer")
    }

    fn deployment(&self, verb: &str, deployment: &ChaincodeDeployment) -> CommandSpec {
        let instance = &deployment.instance;
        let spec = self.peer(None).args([
            "chaincode".to_string(),
            verb.to_string(),
            "-o".to_string(),
            self.orderer_address.clone(),
            "-C".to_string(),
            instance.channel.to_string(),
            "-n".to_string(),
            instance.name.clone(),
            "-v".to_string(),
            instance.version.to_string(),
            "-c".to_string(),
            deployment.args.to_payload(),
        ]);
        match &deployment.endorsement_policy {
            Some(policy) => spec.arg("-P").arg(policy.clone()),
            None => spec,
        }
    }
}

/// Channel names from `peer channel list` output
fn parse_channel_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.contains(':') && !line.contains(' '))
        .map(ToString::to_string)
        .collect()
}

#[async_trait]
impl NetworkCli for PeerCli {
    async fn list_channels(&self) -> Result<Vec<String>, GatewayError> {
        let output = self.runner.run(&self.peer(None).args(["channel", "list"])).await?;
        Ok(parse_channel_list(&output.stdout))
    }

    async fn create_channel(&self, creation: &ChannelCreation) -> Result<(), GatewayError> {
        let spec = self.peer(None).args([
            "channel".to_string(),
            "create".to_string(),
            "-o".to_string(),
            self.orderer_address.clone(),
            "-c".to_string(),
            creation.channel.to_string(),
            "-f".to_string(),
            creation.channel_tx.clone(),
            "--outputBlock".to_string(),
            creation.output_block.clone(),
        ]);
        self.runner.run(&spec).await?;
        Ok(())
    }

    async fn join_channel(&self, join: &ChannelJoin) -> Result<(), GatewayError> {
        let spec = self
            .peer(join.peer_address.as_deref())
            .args(["channel", "join", "-b"])
            .arg(join.block.clone());
        self.runner.run(&spec).await?;
        Ok(())
    }

    async fn update_anchor_peers(&self, update: &AnchorPeersUpdate) -> Result<(), GatewayError> {
        let spec = self.peer(None).args([
            "channel".to_string(),
            "update".to_string(),
            "-o".to_string(),
            self.orderer_address.clone(),
            "-c".to_string(),
            update.channel.to_string(),
            "-f".to_string(),
            update.anchors_tx.clone(),
        ]);
        self.runner.run(&spec).await?;
        Ok(())
    }

    async fn install_chaincode(&self, install: &ChaincodeInstall) -> Result<(), GatewayError> {
        let spec = self.peer(None).args([
            "chaincode".to_string(),
            "install".to_string(),
            "-n".to_string(),
            install.name.clone(),
            "-v".to_string(),
            install.version.to_string(),
            "-p".to_string(),
            install.path.clone(),
        ]);
        self.runner.run(&spec).await?;
        Ok(())
    }

    async fn instantiate_chaincode(&self, deployment: &ChaincodeDeployment) -> Result<(), GatewayError> {
        self.runner.run(&self.deployment("instantiate", deployment)).await?;
        Ok(())
    }

    async fn upgrade_chaincode(&self, deployment: &ChaincodeDeployment) -> Result<(), GatewayError> {
        self.runner.run(&self.deployment("upgrade", deployment)).await?;
        Ok(())
    }

    async fn invoke_chaincode(&self, call: &ChaincodeCall) -> Result<String, GatewayError> {
        let spec = self.peer(None).args([
            "chaincode".to_string(),
            "invoke".to_string(),
            "-o".to_string(),
            self.orderer_address.clone(),
            "-C".to_string(),
            call.channel.clone(),
            "-n".to_string(),
            call.name.clone(),
            "-c".to_string(),
            call.args.to_payload(),
        ]);
        let output = self.runner.run(&spec).await?;
        // invoke reports its result on stderr
        Ok(if output.stdout.is_empty() { output.stderr } else { output.stdout })
    }

    async fn query_chaincode(&self, call: &ChaincodeCall) -> Result<String, GatewayError> {
        let spec = self.peer(None).args([
            "chaincode".to_string(),
            "query".to_string(),
            "-C".to_string(),
            call.channel.clone(),
            "-n".to_string(),
            call.name.clone(),
            "-c".to_string(),
            call.args.to_payload(),
        ]);
        Ok(self.runner.run(&spec).await?.stdout)
    }
}
