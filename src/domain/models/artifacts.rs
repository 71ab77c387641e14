//! Artifact Domain Models
//!
//! Requests for the three generation steps (crypto material, genesis block,
//! channel artifacts) and the filesystem layout every later step relies on.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// File name of the ordering service genesis block
pub const GENESIS_BLOCK_FILE: &str = "genesis.block";

/// File name of the generation manifest written next to generated artifacts
pub const MANIFEST_FILE: &str = "manifest.json";

/// Request for `generateCryptoMaterial`
#[derive(Debug, Clone, Default, Validate)]
pub struct CryptoMaterialRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub config_path: String,

    #[validate(length(min = 1, message = "is required"))]
    pub output_path: String,
}

/// Request for `generateGenesisBlock`
#[derive(Debug, Clone, Default, Validate)]
pub struct GenesisBlockRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub base_path: String,

    #[validate(length(min = 1, message = "is required"))]
    pub config_path: String,

    #[validate(length(min = 1, message = "is required"))]
    pub cryptos_path: String,

    #[validate(length(min = 1, message = "is required"))]
    pub network_profile: String,
}

/// Request for `generateChannelArtifacts`
#[derive(Debug, Clone, Default, Validate)]
pub struct ChannelArtifactsRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub channel_name: String,

    #[validate(length(min = 1, message = "is required"))]
    pub base_path: String,

    #[validate(length(min = 1, message = "is required"))]
    pub config_path: String,

    #[validate(length(min = 1, message = "is required"))]
    pub cryptos_path: String,

    #[validate(length(min = 1, message = "is required"))]
    pub network_profile: String,

    #[validate(length(min = 1, message = "is required"))]
    pub channel_profile: String,

    #[validate(length(min = 1, message = "is required"))]
    pub org_id: String,
}

/// Result of a generation step
///
/// `Skipped` is returned when the target already existed and the operator
/// declined regeneration. It is a successful no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Generated(PathBuf),
    Skipped(PathBuf),
}

impl GenerationOutcome {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Generated(path) | Self::Skipped(path) => path,
        }
    }

    #[must_use]
    pub fn was_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

/// Job handed to the generator tool to produce a genesis block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisBlockJob {
    pub config_dir: PathBuf,
    pub cryptos_dir: PathBuf,
    pub profile: String,
    pub system_channel: String,
    pub output_block: PathBuf,
}

/// Job handed to the generator tool to produce one channel transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTxJob {
    pub config_dir: PathBuf,
    pub cryptos_dir: PathBuf,
    pub profile: String,
    pub channel_name: String,
    pub output_tx: PathBuf,
}

/// Job handed to the generator tool to produce an anchor-peer update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorPeersJob {
    pub config_dir: PathBuf,
    pub cryptos_dir: PathBuf,
    pub profile: String,
    pub channel_name: String,
    pub org_id: String,
    pub output_tx: PathBuf,
}

/// Root of every channel's artifacts, on the host and inside the utility container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelsRoot {
    pub host: PathBuf,
    pub container: String,
}

impl ChannelsRoot {
    #[must_use]
    pub fn new(host: impl Into<PathBuf>, container: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            container: container.into(),
        }
    }

    #[must_use]
    pub fn layout(&self, channel_name: &str) -> ChannelLayout {
        ChannelLayout::new(self.host.clone(), self.container.clone(), channel_name)
    }
}

/// Where the artifacts of one channel live, on the host and inside the
/// utility container
///
/// Layout: `{root}/{channel}/{channel}.tx`, `{root}/{channel}/{org}anchors.tx`
/// and `{root}/{channel}/{channel}.block`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelLayout {
    host_root: PathBuf,
    container_root: String,
    channel_name: String,
}

impl ChannelLayout {
    #[must_use]
    pub fn new(host_root: impl Into<PathBuf>, container_root: impl Into<String>, channel_name: &str) -> Self {
        Self {
            host_root: host_root.into(),
            container_root: container_root.into(),
            channel_name: channel_name.to_string(),
        }
    }

    /// Layout used while generating, where only host paths matter
    #[must_use]
    pub fn host_only(host_root: impl Into<PathBuf>, channel_name: &str) -> Self {
        Self::new(host_root, String::new(), channel_name)
    }

    #[must_use]
    pub fn channel_dir(&self) -> PathBuf {
        self.host_root.join(&self.channel_name)
    }

    #[must_use]
    pub fn channel_tx(&self) -> ArtifactLocation {
        self.locate(format!("{}.tx", self.channel_name))
    }

    #[must_use]
    pub fn anchors_tx(&self, org_id: &str) -> ArtifactLocation {
        self.locate(format!("{org_id}anchors.tx"))
    }

    #[must_use]
    pub fn block(&self) -> ArtifactLocation {
        self.locate(format!("{}.block", self.channel_name))
    }

    fn locate(&self, file: String) -> ArtifactLocation {
        ArtifactLocation {
            host: self.channel_dir().join(&file),
            container: format!(
                "{}/{}/{}",
                self.container_root.trim_end_matches('/'),
                self.channel_name,
                file
            ),
        }
    }
}

/// One artifact addressed both on the host and inside the utility container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    pub host: PathBuf,
    pub container: String,
}

/// Record of what produced a set of artifacts, written as `manifest.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationManifest {
    pub kind: String,
    pub network_profile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_profile: Option<String>,
    pub channel: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    pub artifacts: Vec<String>,
    pub generated_at: DateTime<Utc>,
}
