//! Docker Compose Container Runtime
//!
//! Implements the ContainerRuntime trait with the `docker` command line.

use std::collections::BTreeSet;
use std::path::PathBuf;

use async_trait::async_trait;

use super::process::{CommandRunner, CommandSpec};
use crate::domain::gateways::ContainerRuntime;
use crate::shared::errors::GatewayError;

/// Docker implementation of ContainerRuntime
pub struct DockerComposeRuntime {
    runner: CommandRunner,
    compose_file: PathBuf,
    project: String,
}

impl DockerComposeRuntime {
    /// Create a new DockerComposeRuntime
    #[must_use]
    pub fn new(runner: CommandRunner, compose_file: PathBuf, project: String) -> Self {
        Self {
            runner,
            compose_file,
            project,
        }
    }

    fn compose(&self) -> CommandSpec {
        CommandSpec::new("docker").args([
            "compose".to_string(),
            "-f".to_string(),
            self.compose_file.display().to_string(),
            "-p".to_string(),
            self.project.clone(),
        ])
    }
}

/// Distinct image ids from `docker images --format '{{.Repository}} {{.ID}}'`
/// whose repository contains `filter`
fn matching_image_ids(listing: &str, filter: &str) -> Vec<String> {
    listing
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let repository = parts.next()?;
            let id = parts.next()?;
            repository.contains(filter).then(|| id.to_string())
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn non_empty_lines(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[async_trait]
impl ContainerRuntime for DockerComposeRuntime {
    async fn up(&self) -> Result<(), GatewayError> {
        self.runner.run(&self.compose().args(["up", "-d"])).await?;
        Ok(())
    }

    async fn down(&self) -> Result<(), GatewayError> {
        self.runner
            .run(&self.compose().args(["down", "--volumes", "--remove-orphans"]))
            .await?;
        Ok(())
    }

    async fn remove_containers(&self, name_filter: &str) -> Result<usize, GatewayError> {
        let listing = self
            .runner
            .run(&CommandSpec::new("docker").args(["ps", "-aq", "--filter"]).arg(format!("name={name_filter}")))
            .await?;
        let ids = non_empty_lines(&listing.stdout);
        if ids.is_empty() {
            return Ok(0);
        }

        self.runner
            .run(&CommandSpec::new("docker").args(["rm", "-f"]).args(ids.iter().cloned()))
            .await?;
        Ok(ids.len())
    }

    async fn remove_images(&self, name_filter: &str) -> Result<usize, GatewayError> {
        let listing = self
            .runner
            .run(&CommandSpec::new("docker").args(["images", "--format", "{{.Repository}} {{.ID}}"]))
            .await?;
        let ids = matching_image_ids(&listing.stdout, name_filter);
        if ids.is_empty() {
            return Ok(0);
        }

        self.runner
            .run(&CommandSpec::new("docker").args(["rmi", "-f"]).args(ids.iter().cloned()))
            .await?;
        Ok(ids.len())
    }

    async fn prune_dangling_images(&self) -> Result<(), GatewayError> {
        self.runner
            .run(&CommandSpec::new("docker").args(["image", "prune", "-f"]))
            .await?;
        Ok(())
    }

    async fn pull_image(&self, image: &str) -> Result<(), GatewayError> {
        self.runner.run(&CommandSpec::new("docker").args(["pull", image])).await?;
        Ok(())
    }

    async fn tag_image(&self, source: &str, target: &str) -> Result<(), GatewayError> {
        self.runner
            .run(&CommandSpec::new("docker").args(["tag", source, target]))
            .await?;
        Ok(())
    }
}
