//! Common test utilities for e2e tests
//!
//! Provides recording fakes for every gateway, sharing one call log so tests
//! can assert the order in which the orchestrator drives external tools, plus
//! a temporary workspace laid out like a real network directory.

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use ledger_network_bootstrap::domain::gateways::{
    ArtifactTool, ChaincodeToolchain, Confirmer, ContainerRuntime, NetworkCli,
};
use ledger_network_bootstrap::domain::models::artifacts::{AnchorPeersJob, ChannelTxJob, GenesisBlockJob};
use ledger_network_bootstrap::domain::models::chaincode::{ChaincodeCall, ChaincodeDeployment, ChaincodeInstall};
use ledger_network_bootstrap::domain::models::channel::{AnchorPeersUpdate, ChannelCreation, ChannelJoin};
use ledger_network_bootstrap::infrastructure::driven_adapters::config::AppConfig;
use ledger_network_bootstrap::infrastructure::driving_adapters::cli::{AppContext, Gateways};
use ledger_network_bootstrap::shared::errors::GatewayError;

/// Ordered record of every gateway call, with operations forced to fail
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl Recorder {
    /// Record `call`; fails with a non-zero exit if `operation` was marked failing
    fn record(&self, operation: &str, call: String) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(operation) {
            return Err(GatewayError::NonZeroExit {
                command: operation.to_string(),
                code: Some(1),
                stderr: format!("{operation} failed"),
            });
        }
        Ok(())
    }

    pub fn fail(&self, operation: &str) {
        self.failing.lock().unwrap().insert(operation.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Operation names in call order, without arguments
    pub fn operations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|c| c.split(':').next().unwrap_or_default().to_string())
            .collect()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.operations().iter().filter(|o| *o == operation).count()
    }

    pub fn position(&self, operation: &str) -> Option<usize> {
        self.operations().iter().position(|o| o == operation)
    }
}

fn touch(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

pub struct FakeRuntime(pub Recorder);

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn up(&self) -> Result<(), GatewayError> {
        self.0.record("up", "up".to_string())
    }

    async fn down(&self) -> Result<(), GatewayError> {
        self.0.record("down", "down".to_string())
    }

    async fn remove_containers(&self, name_filter: &str) -> Result<usize, GatewayError> {
        self.0
            .record("remove_containers", format!("remove_containers:{name_filter}"))
            .map(|()| 0)
    }

    async fn remove_images(&self, name_filter: &str) -> Result<usize, GatewayError> {
        self.0.record("remove_images", format!("remove_images:{name_filter}")).map(|()| 0)
    }

    async fn prune_dangling_images(&self) -> Result<(), GatewayError> {
        self.0.record("prune", "prune".to_string())
    }

    async fn pull_image(&self, image: &str) -> Result<(), GatewayError> {
        self.0.record("pull", format!("pull:{image}"))
    }

    async fn tag_image(&self, source: &str, target: &str) -> Result<(), GatewayError> {
        self.0.record("tag", format!("tag:{source}->{target}"))
    }
}

/// Writes placeholder artifacts where the real tools would
pub struct FakeArtifactTool(pub Recorder);

#[async_trait]
impl ArtifactTool for FakeArtifactTool {
    async fn generate_crypto(&self, _config_file: &Path, output_dir: &Path) -> Result<(), GatewayError> {
        self.0.record("cryptogen", "cryptogen".to_string())?;
        touch(
            &output_dir.join("peerOrganizations/org1.example.com/msp/cacerts/ca.pem"),
            "fresh",
        );
        Ok(())
    }

    async fn output_genesis_block(&self, job: &GenesisBlockJob) -> Result<(), GatewayError> {
        self.0.record("genesis", format!("genesis:{}", job.profile))?;
        touch(&job.output_block, "block");
        Ok(())
    }

    async fn inspect_block(&self, _config_dir: &Path, _block: &Path) -> Result<(), GatewayError> {
        self.0.record("inspect_block", "inspect_block".to_string())
    }

    async fn output_channel_tx(&self, job: &ChannelTxJob) -> Result<(), GatewayError> {
        self.0.record("channel_tx", format!("channel_tx:{}", job.channel_name))?;
        touch(&job.output_tx, "tx");
        Ok(())
    }

    async fn inspect_channel_tx(&self, _config_dir: &Path, _tx: &Path) -> Result<(), GatewayError> {
        self.0.record("inspect_channel_tx", "inspect_channel_tx".to_string())
    }

    async fn output_anchor_peers_update(&self, job: &AnchorPeersJob) -> Result<(), GatewayError> {
        self.0.record("anchors_tx", format!("anchors_tx:{}", job.org_id))?;
        touch(&job.output_tx, "anchors");
        Ok(())
    }
}

/// Peer command interface; container paths equal host paths in tests
pub struct FakeNetworkCli(pub Recorder);

#[async_trait]
impl NetworkCli for FakeNetworkCli {
    async fn list_channels(&self) -> Result<Vec<String>, GatewayError> {
        self.0.record("list_channels", "list_channels".to_string())?;
        Ok(vec![])
    }

    async fn create_channel(&self, creation: &ChannelCreation) -> Result<(), GatewayError> {
        self.0.record("create_channel", format!("create_channel:{}", creation.channel))?;
        touch(Path::new(&creation.output_block), "channel block");
        Ok(())
    }

    async fn join_channel(&self, _join: &ChannelJoin) -> Result<(), GatewayError> {
        self.0.record("join_channel", "join_channel".to_string())
    }

    async fn update_anchor_peers(&self, update: &AnchorPeersUpdate) -> Result<(), GatewayError> {
        self.0.record("update_channel", format!("update_channel:{}", update.org_id))
    }

    async fn install_chaincode(&self, install: &ChaincodeInstall) -> Result<(), GatewayError> {
        self.0
            .record("install", format!("install:{}:{}", install.name, install.version))
    }

    async fn instantiate_chaincode(&self, deployment: &ChaincodeDeployment) -> Result<(), GatewayError> {
        self.0.record("instantiate", format!("instantiate:{}", deployment.instance))
    }

    async fn upgrade_chaincode(&self, deployment: &ChaincodeDeployment) -> Result<(), GatewayError> {
        self.0.record("upgrade", format!("upgrade:{}", deployment.instance))
    }

    async fn invoke_chaincode(&self, call: &ChaincodeCall) -> Result<String, GatewayError> {
        self.0.record("invoke", format!("invoke:{}", call.args.to_payload()))?;
        Ok("status:200".to_string())
    }

    async fn query_chaincode(&self, call: &ChaincodeCall) -> Result<String, GatewayError> {
        self.0.record("query", format!("query:{}", call.args.to_payload()))?;
        Ok("100".to_string())
    }
}

pub struct FakeToolchain(pub Recorder);

#[async_trait]
impl ChaincodeToolchain for FakeToolchain {
    async fn build(&self, name: &str, _source_dir: &Path) -> Result<(), GatewayError> {
        self.0.record("build", format!("build:{name}"))
    }

    async fn test(&self, name: &str, _source_dir: &Path) -> Result<(), GatewayError> {
        self.0.record("test", format!("test:{name}"))
    }
}

/// Answers every prompt with a fixed answer and records the question
pub struct FakeConfirmer {
    pub recorder: Recorder,
    pub answer: bool,
}

#[async_trait]
impl Confirmer for FakeConfirmer {
    async fn confirm(&self, question: &str) -> Result<bool, GatewayError> {
        self.recorder.record("confirm", format!("confirm:{question}"))?;
        Ok(self.answer)
    }
}

/// Temporary network workspace wired to recording fakes
pub struct TestNetwork {
    pub dir: TempDir,
    pub config: AppConfig,
    pub recorder: Recorder,
}

impl TestNetwork {
    /// Workspace with configtx, crypto config and chaincode source in place
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        let config_dir = root.join("config");
        touch(&config_dir.join("default.toml"), include_str!("../../config/default.toml"));
        let mut config = AppConfig::load_from(config_dir.to_str().unwrap()).unwrap();

        let network = root.join("network");
        config.paths.crypto_config_file = network.join("config/crypto-config.yaml");
        config.paths.configtx_dir = network.join("config");
        config.paths.cryptos = network.join("cryptos");
        config.paths.channels = network.join("channels");
        config.paths.chaincode = root.join("chaincode");
        config.paths.ledger_data = network.join("data");
        config.paths.compose_file = network.join("docker-compose.yaml");
        config.paths.lock_file = network.join(".bootstrap.lock");
        config.container_paths.channels = config.paths.channels.display().to_string();
        config.readiness.interval_ms = 1;
        config.readiness.max_attempts = 3;

        touch(&config.paths.crypto_config_file, "OrdererOrgs: []");
        touch(&config.paths.configtx_dir.join("configtx.yaml"), "Profiles: {}");
        touch(&config.paths.chaincode.join("mycc/main.go"), "package main");

        Self {
            dir,
            config,
            recorder: Recorder::default(),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Application context whose prompts all answer `answer`
    pub fn context(&self, answer: bool) -> AppContext {
        let gateways = Gateways {
            runtime: Arc::new(FakeRuntime(self.recorder.clone())),
            artifact_tool: Arc::new(FakeArtifactTool(self.recorder.clone())),
            network_cli: Arc::new(FakeNetworkCli(self.recorder.clone())),
            toolchain: Arc::new(FakeToolchain(self.recorder.clone())),
            confirmer: Arc::new(FakeConfirmer {
                recorder: self.recorder.clone(),
                answer,
            }),
        };
        AppContext::new(self.config.clone(), gateways).unwrap()
    }
}

/// Snapshot of every file under `dir` with its contents, for byte-identity checks
pub fn snapshot(dir: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in std::fs::read_dir(&current).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path);
            } else {
                let contents = std::fs::read(&path).unwrap();
                files.push((path, contents));
            }
        }
    }
    files.sort();
    files
}
