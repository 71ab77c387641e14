//! Application Configuration
//!
//! Loads configuration from files and environment variables once at startup.
//! The resulting `AppConfig` is immutable and handed to adapters and use cases
//! by parameter.

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::models::artifacts::{
    ChannelArtifactsRequest, ChannelsRoot, CryptoMaterialRequest, GenesisBlockRequest,
};
use crate::domain::models::bootstrap::{BootstrapPlan, ImageSet, ReadinessPolicy, TeardownTargets};
use crate::domain::models::chaincode::{ChaincodeNameRequest, DeployRequest, InstallRequest};
use crate::domain::models::channel::ChannelRequest;
use crate::domain::models::load::LoadTarget;

/// Container images
#[derive(Debug, Clone, Deserialize)]
pub struct ImagesConfig {
    /// Tag applied to every ledger image (tools, peer, orderer, ...)
    pub fabric_tag: String,
    /// Image carrying the crypto and configtx generator tools
    pub tools: String,
    /// Image used to build and test chaincode when no local toolchain exists
    pub golang: String,
    /// Images pulled by `install-images`
    #[serde(default)]
    pub pull: Vec<String>,
}

impl ImagesConfig {
    #[must_use]
    pub fn tools_image(&self) -> String {
        format!("{}:{}", self.tools, self.fabric_tag)
    }
}

/// Host filesystem layout
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    pub crypto_config_file: PathBuf,
    pub configtx_dir: PathBuf,
    pub cryptos: PathBuf,
    pub channels: PathBuf,
    pub chaincode: PathBuf,
    pub ledger_data: PathBuf,
    pub compose_file: PathBuf,
    pub lock_file: PathBuf,
}

/// Network identity and process naming
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Compose project name
    pub project: String,
    /// Genesis profile in configtx.yaml
    pub profile: String,
    pub system_channel: String,
    pub orderer_address: String,
    /// Container the peer command interface is executed in
    pub utility_container: String,
    /// Name fragment of derived chaincode containers and images
    pub derived_filter: String,
    /// Name fragment of every network container
    pub container_filter: String,
}

/// Where host directories are visible inside containers
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerPathsConfig {
    /// Channels root inside the utility container
    pub channels: String,
    /// Chaincode import root inside the utility container
    pub chaincode: String,
    /// Mount points used by the generator tools container
    pub tools_config: String,
    pub tools_crypto: String,
    pub tools_output: String,
}

/// Default identifiers used by the bootstrap pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    pub channel: String,
    pub channel_profile: String,
    pub org_msp_id: String,
    pub peer_address: Option<String>,
    pub chaincode_name: String,
    pub chaincode_version: String,
    pub instantiate_args: String,
    pub endorsement_policy: Option<String>,
}

/// Readiness poll after the runtime is started
#[derive(Debug, Clone, Deserialize)]
pub struct ReadinessConfig {
    pub max_attempts: u32,
    pub interval_ms: u64,
    pub attempt_timeout_ms: u64,
}

impl ReadinessConfig {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    #[must_use]
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }
}

/// Load generator target
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkConfig {
    pub channel: String,
    pub chaincode: String,
    pub function: String,
    pub key_length: usize,
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub images: ImagesConfig,
    pub paths: PathsConfig,
    pub network: NetworkConfig,
    pub container_paths: ContainerPathsConfig,
    pub defaults: DefaultsConfig,
    pub readiness: ReadinessConfig,
    pub benchmark: BenchmarkConfig,
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration rooted at `config_dir`
    pub fn load_from(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "default".into());

        Config::builder()
            // Start with default config
            .add_source(File::with_name(&format!("{config_dir}/default")).required(true))
            // Merge environment-specific config if it exists
            .add_source(File::with_name(&format!("{config_dir}/{run_mode}")).required(false))
            // Override with environment variables (e.g., FABRIC__NETWORK__ORDERER_ADDRESS)
            .add_source(Environment::with_prefix("FABRIC").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Channels root on the host and inside the utility container
    #[must_use]
    pub fn channels_root(&self) -> ChannelsRoot {
        ChannelsRoot::new(&self.paths.channels, &self.container_paths.channels)
    }

    /// Package path of chaincode `name` as seen by the peer
    #[must_use]
    pub fn install_path(&self, name: &str) -> String {
        format!("{}/{name}", self.container_paths.chaincode.trim_end_matches('/'))
    }

    #[must_use]
    pub fn readiness_policy(&self) -> ReadinessPolicy {
        ReadinessPolicy {
            max_attempts: self.readiness.max_attempts,
            interval: self.readiness.interval(),
            attempt_timeout: self.readiness.attempt_timeout(),
        }
    }

    #[must_use]
    pub fn teardown_targets(&self) -> TeardownTargets {
        TeardownTargets {
            derived_filter: self.network.derived_filter.clone(),
            container_filter: self.network.container_filter.clone(),
            ledger_data: self.paths.ledger_data.clone(),
        }
    }

    #[must_use]
    pub fn image_set(&self) -> ImageSet {
        ImageSet {
            images: self.images.pull.clone(),
            tag: self.images.fabric_tag.clone(),
        }
    }

    #[must_use]
    pub fn load_target(&self) -> LoadTarget {
        LoadTarget {
            channel: self.benchmark.channel.clone(),
            chaincode: self.benchmark.chaincode.clone(),
            function: self.benchmark.function.clone(),
            key_length: self.benchmark.key_length,
        }
    }

    /// Requests for every stage of `start`, built from the defaults
    #[must_use]
    pub fn bootstrap_plan(&self) -> BootstrapPlan {
        let paths = &self.paths;
        let defaults = &self.defaults;
        let display = |p: &PathBuf| p.display().to_string();

        BootstrapPlan {
            chaincode: ChaincodeNameRequest {
                name: defaults.chaincode_name.clone(),
            },
            crypto: CryptoMaterialRequest {
                config_path: display(&paths.crypto_config_file),
                output_path: display(&paths.cryptos),
            },
            genesis: GenesisBlockRequest {
                base_path: display(&paths.channels),
                config_path: display(&paths.configtx_dir),
                cryptos_path: display(&paths.cryptos),
                network_profile: self.network.profile.clone(),
            },
            channel_artifacts: ChannelArtifactsRequest {
                channel_name: defaults.channel.clone(),
                base_path: display(&paths.channels),
                config_path: display(&paths.configtx_dir),
                cryptos_path: display(&paths.cryptos),
                network_profile: self.network.profile.clone(),
                channel_profile: defaults.channel_profile.clone(),
                org_id: defaults.org_msp_id.clone(),
            },
            channel: ChannelRequest::new(&defaults.channel, &defaults.org_msp_id)
                .with_peer(defaults.peer_address.clone()),
            install: InstallRequest {
                name: defaults.chaincode_name.clone(),
                version: defaults.chaincode_version.clone(),
                path: self.install_path(&defaults.chaincode_name),
            },
            deploy: DeployRequest {
                name: defaults.chaincode_name.clone(),
                version: defaults.chaincode_version.clone(),
                channel: defaults.channel.clone(),
            },
        }
    }
}
