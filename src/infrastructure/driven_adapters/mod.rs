//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - Container runtime (docker compose)
//! - Generator tools and chaincode toolchain
//! - Peer command interface
//! - Confirmation prompts, operator lock and configuration

pub mod config;
pub mod docker_runtime;
pub mod fabric_tools;
pub mod go_toolchain;
pub mod lock;
pub mod peer_cli;
pub mod process;
pub mod prompt;

pub use config::AppConfig;
pub use docker_runtime::DockerComposeRuntime;
pub use fabric_tools::DockerizedFabricTools;
pub use go_toolchain::GoToolchain;
pub use lock::OperatorLock;
pub use peer_cli::PeerCli;
pub use process::CommandRunner;
pub use prompt::{FixedAnswer, StdinConfirmer};
