//! Domain Models
//!
//! Pure value types describing artifacts, channels, chaincode, bootstrap
//! and load runs.

pub mod artifacts;
pub mod bootstrap;
pub mod chaincode;
pub mod channel;
pub mod load;

pub use artifacts::{
    AnchorPeersJob, ArtifactLocation, ChannelArtifactsRequest, ChannelLayout, ChannelTxJob, ChannelsRoot,
    CryptoMaterialRequest, GenerationManifest, GenerationOutcome, GenesisBlockJob,
    GenesisBlockRequest,
};
pub use bootstrap::{BootstrapPlan, ImageSet, ReadinessPolicy, TeardownOutcome, TeardownTargets};
pub use chaincode::{
    CallRequest, ChaincodeArgs, ChaincodeCall, ChaincodeDeployment, ChaincodeInstall,
    ChaincodeInstance, ChaincodeNameRequest, ChaincodeVersion, DeployRequest, InstallRequest,
};
pub use channel::{AnchorPeersUpdate, ChannelCreation, ChannelJoin, ChannelName, ChannelRequest};
pub use load::{LoadPlan, LoadReport, LoadRequest, LoadTarget, WorkerReport};
