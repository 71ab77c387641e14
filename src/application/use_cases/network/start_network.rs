//! Start Network Use Case
//!
//! The bring-up pipeline. Every stage must succeed before the next begins and
//! the first failure aborts the run:
//!
//! 1. build and test the default chaincode
//! 2. tear down any previous runtime
//! 3. generate crypto material, genesis block and channel artifacts
//! 4. start the runtime and poll until it is ready
//! 5. create, join and update the default channel
//! 6. install and instantiate the default chaincode

use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;

use super::{AwaitNetworkReadyUseCase, StopNetworkUseCase};
use crate::application::use_cases::artifacts::{
    GenerateChannelArtifactsUseCase, GenerateCryptoMaterialUseCase, GenerateGenesisBlockUseCase,
};
use crate::application::use_cases::chaincode::{
    BuildChaincodeUseCase, InstallChaincodeUseCase, InstantiateChaincodeUseCase, TestChaincodeUseCase,
};
use crate::application::use_cases::channels::{CreateChannelUseCase, JoinChannelUseCase, UpdateChannelUseCase};
use crate::domain::gateways::ContainerRuntime;
use crate::domain::models::bootstrap::BootstrapPlan;
use crate::shared::errors::UseCaseError;

/// The use cases the pipeline sequences
pub struct BootstrapStages {
    pub build: Arc<BuildChaincodeUseCase>,
    pub test: Arc<TestChaincodeUseCase>,
    pub stop: Arc<StopNetworkUseCase>,
    pub crypto: Arc<GenerateCryptoMaterialUseCase>,
    pub genesis: Arc<GenerateGenesisBlockUseCase>,
    pub channel_artifacts: Arc<GenerateChannelArtifactsUseCase>,
    pub await_ready: Arc<AwaitNetworkReadyUseCase>,
    pub create_channel: Arc<CreateChannelUseCase>,
    pub join_channel: Arc<JoinChannelUseCase>,
    pub update_channel: Arc<UpdateChannelUseCase>,
    pub install: Arc<InstallChaincodeUseCase>,
    pub instantiate: Arc<InstantiateChaincodeUseCase>,
}

/// Use case for bringing up the whole network
pub struct StartNetworkUseCase {
    stages: BootstrapStages,
    runtime: Arc<dyn ContainerRuntime>,
}

impl StartNetworkUseCase {
    /// Create a new StartNetworkUseCase
    #[must_use]
    pub fn new(stages: BootstrapStages, runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { stages, runtime }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing stage. Artifacts produced by
    /// earlier stages are left in place.
    pub async fn execute(&self, plan: BootstrapPlan) -> Result<(), UseCaseError> {
        let span = tracing::info_span!("bootstrap", run_id = %Uuid::new_v4());
        self.run(plan)
            .instrument(span)
            .await
            .inspect_err(|e| tracing::error!(error = %e, code = e.error_code(), "Bootstrap aborted"))
    }

    async fn run(&self, plan: BootstrapPlan) -> Result<(), UseCaseError> {
        let stages = &self.stages;
        tracing::info!(chaincode = %plan.chaincode.name, channel = %plan.channel.channel_name, "Starting network");

        stages.build.execute(plan.chaincode.clone()).await?;
        stages.test.execute(plan.chaincode).await?;

        stages.stop.execute().await?;

        stages.crypto.execute(plan.crypto).await?;
        stages.genesis.execute(plan.genesis).await?;
        stages.channel_artifacts.execute(plan.channel_artifacts).await?;

        tracing::info!("Starting network runtime");
        self.runtime
            .up()
            .await
            .map_err(UseCaseError::stage("failed to start network"))?;
        stages.await_ready.execute().await?;

        stages.create_channel.execute(plan.channel.clone()).await?;
        stages.join_channel.execute(plan.channel.clone()).await?;
        stages.update_channel.execute(plan.channel).await?;

        stages.install.execute(plan.install).await?;
        stages.instantiate.execute(plan.deploy).await?;

        tracing::info!("Network started");
        Ok(())
    }
}
