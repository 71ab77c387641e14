//! Chaincode Use Cases
//!
//! Build and test run through the chaincode toolchain; install, instantiate,
//! upgrade, invoke and query forward to the network command interface.

mod build_chaincode;
mod call_chaincode;
mod install_chaincode;
mod instantiate_chaincode;
mod upgrade_chaincode;

pub use build_chaincode::{BuildChaincodeUseCase, TestChaincodeUseCase};
pub use call_chaincode::{InvokeChaincodeUseCase, QueryChaincodeUseCase};
pub use install_chaincode::InstallChaincodeUseCase;
pub use instantiate_chaincode::InstantiateChaincodeUseCase;
pub use upgrade_chaincode::UpgradeChaincodeUseCase;

use std::path::{Path, PathBuf};

use crate::application::use_cases::artifacts::require_exists;
use crate::shared::errors::UseCaseError;

/// Host directory holding the source of chaincode `name`, which must exist
fn source_dir(chaincode_root: &Path, name: &str) -> Result<PathBuf, UseCaseError> {
    let dir = chaincode_root.join(name);
    require_exists("chaincode source", &dir)?;
    Ok(dir)
}
