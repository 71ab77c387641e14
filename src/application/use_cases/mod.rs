//! Use Cases
//!
//! Application-specific orchestration rules.
//! Each use case is a single-purpose struct with an execute() method.

pub mod artifacts;
pub mod benchmark;
pub mod chaincode;
pub mod channels;
pub mod network;

pub use artifacts::{GenerateChannelArtifactsUseCase, GenerateCryptoMaterialUseCase, GenerateGenesisBlockUseCase};
pub use benchmark::RunLoadUseCase;
pub use chaincode::{
    BuildChaincodeUseCase, InstallChaincodeUseCase, InstantiateChaincodeUseCase, InvokeChaincodeUseCase,
    QueryChaincodeUseCase, TestChaincodeUseCase, UpgradeChaincodeUseCase,
};
pub use channels::{CreateChannelUseCase, JoinChannelUseCase, UpdateChannelUseCase};
pub use network::{
    AwaitNetworkReadyUseCase, BootstrapStages, InstallImagesUseCase, StartNetworkUseCase, StopNetworkUseCase,
};
