//! Domain Layer
//!
//! Contains the value types and gateway traits (ports) for every external
//! collaborator. This layer has no dependencies on infrastructure.

pub mod gateways;
pub mod models;

pub use gateways::{ArtifactTool, ChaincodeToolchain, Confirmer, ContainerRuntime, NetworkCli};
