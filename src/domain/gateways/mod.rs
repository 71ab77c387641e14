//! Gateway Traits (Ports)
//!
//! Abstract interfaces defining contracts for the external tools the
//! orchestrator delegates to. These are implemented by driven adapters in the
//! infrastructure layer.

pub mod artifact_tool;
pub mod chaincode_toolchain;
pub mod confirmer;
pub mod container_runtime;
pub mod network_cli;

pub use artifact_tool::ArtifactTool;
pub use chaincode_toolchain::ChaincodeToolchain;
pub use confirmer::Confirmer;
pub use container_runtime::ContainerRuntime;
pub use network_cli::NetworkCli;
