//! Bootstrap Domain Model
//!
//! Everything the bring-up pipeline needs to know up front, plus the
//! outcomes of teardown and image installation.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::models::artifacts::{ChannelArtifactsRequest, CryptoMaterialRequest, GenesisBlockRequest};
use crate::domain::models::chaincode::{ChaincodeNameRequest, DeployRequest, InstallRequest};
use crate::domain::models::channel::ChannelRequest;

/// Requests for every stage of the bring-up pipeline, resolved from
/// configuration before the run starts
#[derive(Debug, Clone)]
pub struct BootstrapPlan {
    pub chaincode: ChaincodeNameRequest,
    pub crypto: CryptoMaterialRequest,
    pub genesis: GenesisBlockRequest,
    pub channel_artifacts: ChannelArtifactsRequest,
    pub channel: ChannelRequest,
    pub install: InstallRequest,
    pub deploy: DeployRequest,
}

/// Bounded readiness poll against the network command interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadinessPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
    /// Upper bound on a single probe; an elapsed probe counts as a failed attempt
    pub attempt_timeout: Duration,
}

/// Name filters and data directory used by teardown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownTargets {
    /// Matches chaincode containers and images derived by the peers
    pub derived_filter: String,
    /// Matches leftover containers of the network's naming convention
    pub container_filter: String,
    pub ledger_data: PathBuf,
}

/// What teardown did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownOutcome {
    pub containers_removed: usize,
    pub images_removed: usize,
    pub data_removed: bool,
}

/// Images to pull at a tag and retag as `latest`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSet {
    pub images: Vec<String>,
    pub tag: String,
}

impl ImageSet {
    /// `(pulled, latest)` reference pairs
    #[must_use]
    pub fn references(&self) -> Vec<(String, String)> {
        self.images
            .iter()
            .map(|image| (format!("{image}:{}", self.tag), format!("{image}:latest")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_references() {
        let set = ImageSet {
            images: vec!["hyperledger/fabric-peer".to_string()],
            tag: "1.4.3".to_string(),
        };

        assert_eq!(
            set.references(),
            vec![(
                "hyperledger/fabric-peer:1.4.3".to_string(),
                "hyperledger/fabric-peer:latest".to_string()
            )]
        );
    }
}
