//! Artifact Use Cases
//!
//! Crypto material, genesis block and channel artifact generation. Every
//! step shares the same idiom: validate arguments, check prerequisites, ask
//! before wiping an existing target, then delegate to the generator tool.

mod generate_channel_artifacts;
mod generate_crypto_material;
mod generate_genesis_block;

pub use generate_channel_artifacts::GenerateChannelArtifactsUseCase;
pub use generate_crypto_material::GenerateCryptoMaterialUseCase;
pub use generate_genesis_block::GenerateGenesisBlockUseCase;

use std::path::Path;

use crate::domain::gateways::Confirmer;
use crate::domain::models::artifacts::{GenerationManifest, MANIFEST_FILE};
use crate::shared::errors::UseCaseError;

/// Fail with `MissingPrerequisite` unless `path` exists
pub(crate) fn require_exists(artifact: &str, path: &Path) -> Result<(), UseCaseError> {
    if path.exists() {
        Ok(())
    } else {
        Err(UseCaseError::MissingPrerequisite {
            artifact: artifact.to_string(),
            path: path.to_path_buf(),
        })
    }
}

/// Make `target` an empty directory ready for generation
///
/// Returns `false` when the target already exists and the operator declined
/// regeneration; the directory is left untouched in that case.
async fn prepare_target(
    confirmer: &dyn Confirmer,
    what: &str,
    target: &Path,
) -> Result<bool, UseCaseError> {
    if target.exists() {
        let question = format!("{what} already exists at {}. Delete and regenerate?", target.display());
        if !confirmer.confirm(&question).await? {
            tracing::warn!(dir = %target.display(), "Regeneration declined, keeping existing {what}");
            return Ok(false);
        }

        tracing::info!(dir = %target.display(), "Removing existing {what}");
        tokio::fs::remove_dir_all(target)
            .await
            .map_err(UseCaseError::io(format!("failed to remove {}", target.display())))?;
    }

    tokio::fs::create_dir_all(target)
        .await
        .map_err(UseCaseError::io(format!("failed to create {}", target.display())))?;
    Ok(true)
}

async fn write_manifest(dir: &Path, manifest: &GenerationManifest) -> Result<(), UseCaseError> {
    let path = dir.join(MANIFEST_FILE);
    let body = serde_json::to_string_pretty(manifest)
        .map_err(|e| UseCaseError::io("failed to encode manifest")(std::io::Error::other(e)))?;
    tokio::fs::write(&path, body)
        .await
        .map_err(UseCaseError::io(format!("failed to write {}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::confirmer::MockConfirmer;

    #[tokio::test]
    async fn should_create_missing_target_without_asking() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        let mut confirmer = MockConfirmer::new();
        confirmer.expect_confirm().never();

        assert!(prepare_target(&confirmer, "crypto material", &target).await.unwrap());
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn should_leave_target_untouched_on_decline() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        std::fs::create_dir_all(&target).unwrap();
        std::fs::write(target.join("keep.pem"), "old").unwrap();

        let mut confirmer = MockConfirmer::new();
        confirmer.expect_confirm().times(1).returning(|_| Ok(false));

        assert!(!prepare_target(&confirmer, "crypto material", &target).await.unwrap());
        assert_eq!(std::fs::read_to_string(target.join("keep.pem")).unwrap(), "old");
    }

    #[tokio::test]
    async fn should_empty_target_on_accept() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");
        std::fs::create_dir_all(target.join("nested")).unwrap();
        std::fs::write(target.join("nested/stale.pem"), "old").unwrap();

        let mut confirmer = MockConfirmer::new();
        confirmer.expect_confirm().times(1).returning(|_| Ok(true));

        assert!(prepare_target(&confirmer, "crypto material", &target).await.unwrap());
        assert!(target.is_dir());
        assert_eq!(std::fs::read_dir(&target).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn should_write_manifest_next_to_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = GenerationManifest {
            kind: "genesis".to_string(),
            network_profile: "OneOrgOrdererGenesis".to_string(),
            channel_profile: None,
            channel: "syschannel".to_string(),
            org_id: None,
            artifacts: vec!["genesis.block".to_string()],
            generated_at: chrono::Utc::now(),
        };

        write_manifest(dir.path(), &manifest).await.unwrap();

        let written: GenerationManifest =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap()).unwrap();
        assert_eq!(written, manifest);
    }

    #[test]
    fn test_require_exists() {
        let dir = tempfile::tempdir().unwrap();
        assert!(require_exists("config", dir.path()).is_ok());

        let missing = dir.path().join("configtx.yaml");
        let err = require_exists("configtx", &missing).unwrap_err();
        assert!(matches!(err, UseCaseError::MissingPrerequisite { path, .. } if path == missing));
    }
}
