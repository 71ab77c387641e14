//! Application Context
//!
//! Wires every use case to its gateways once at startup.

use std::sync::Arc;

use anyhow::Context;

use crate::application::use_cases::artifacts::{
    GenerateChannelArtifactsUseCase, GenerateCryptoMaterialUseCase, GenerateGenesisBlockUseCase,
};
use crate::application::use_cases::benchmark::RunLoadUseCase;
use crate::application::use_cases::chaincode::{
    BuildChaincodeUseCase, InstallChaincodeUseCase, InstantiateChaincodeUseCase, InvokeChaincodeUseCase,
    QueryChaincodeUseCase, TestChaincodeUseCase, UpgradeChaincodeUseCase,
};
use crate::application::use_cases::channels::{CreateChannelUseCase, JoinChannelUseCase, UpdateChannelUseCase};
use crate::application::use_cases::network::{
    AwaitNetworkReadyUseCase, BootstrapStages, InstallImagesUseCase, StartNetworkUseCase, StopNetworkUseCase,
};
use crate::domain::gateways::{ArtifactTool, ChaincodeToolchain, Confirmer, ContainerRuntime, NetworkCli};
use crate::domain::models::chaincode::ChaincodeArgs;
use crate::infrastructure::driven_adapters::{
    AppConfig, CommandRunner, DockerComposeRuntime, DockerizedFabricTools, FixedAnswer, GoToolchain, PeerCli,
    StdinConfirmer,
};

/// External collaborators behind every use case
#[derive(Clone)]
pub struct Gateways {
    pub runtime: Arc<dyn ContainerRuntime>,
    pub artifact_tool: Arc<dyn ArtifactTool>,
    pub network_cli: Arc<dyn NetworkCli>,
    pub toolchain: Arc<dyn ChaincodeToolchain>,
    pub confirmer: Arc<dyn Confirmer>,
}

impl Gateways {
    /// Docker-backed gateways; `assume_yes` replaces the terminal prompt
    pub async fn docker(config: &AppConfig, assume_yes: bool) -> Self {
        let runner = CommandRunner::new();
        let confirmer: Arc<dyn Confirmer> = if assume_yes {
            Arc::new(FixedAnswer(true))
        } else {
            Arc::new(StdinConfirmer::new())
        };

        Self {
            runtime: Arc::new(DockerComposeRuntime::new(
                runner,
                config.paths.compose_file.clone(),
                config.network.project.clone(),
            )),
            artifact_tool: Arc::new(DockerizedFabricTools::new(
                runner,
                config.images.tools_image(),
                config.container_paths.clone(),
            )),
            network_cli: Arc::new(PeerCli::new(
                runner,
                config.network.utility_container.clone(),
                config.network.orderer_address.clone(),
            )),
            toolchain: Arc::new(GoToolchain::detect(runner, config.images.golang.clone()).await),
            confirmer,
        }
    }
}

/// Use cases shared by every command handler
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub start_network_use_case: Arc<StartNetworkUseCase>,
    pub stop_network_use_case: Arc<StopNetworkUseCase>,
    pub install_images_use_case: Arc<InstallImagesUseCase>,
    pub generate_crypto_material_use_case: Arc<GenerateCryptoMaterialUseCase>,
    pub generate_genesis_block_use_case: Arc<GenerateGenesisBlockUseCase>,
    pub generate_channel_artifacts_use_case: Arc<GenerateChannelArtifactsUseCase>,
    pub create_channel_use_case: Arc<CreateChannelUseCase>,
    pub join_channel_use_case: Arc<JoinChannelUseCase>,
    pub update_channel_use_case: Arc<UpdateChannelUseCase>,
    pub build_chaincode_use_case: Arc<BuildChaincodeUseCase>,
    pub test_chaincode_use_case: Arc<TestChaincodeUseCase>,
    pub install_chaincode_use_case: Arc<InstallChaincodeUseCase>,
    pub instantiate_chaincode_use_case: Arc<InstantiateChaincodeUseCase>,
    pub upgrade_chaincode_use_case: Arc<UpgradeChaincodeUseCase>,
    pub invoke_chaincode_use_case: Arc<InvokeChaincodeUseCase>,
    pub query_chaincode_use_case: Arc<QueryChaincodeUseCase>,
    pub run_load_use_case: Arc<RunLoadUseCase>,
}

impl AppContext {
    /// Build every use case from the configuration and gateways
    ///
    /// # Errors
    ///
    /// Returns an error if `defaults.instantiate_args` is not a valid payload.
    pub fn new(config: AppConfig, gateways: Gateways) -> anyhow::Result<Self> {
        let init_args = ChaincodeArgs::from_json(&config.defaults.instantiate_args)
            .context("defaults.instantiate_args must be a JSON argument list")?;
        let policy = config.defaults.endorsement_policy.clone();
        let channels = config.channels_root();
        let Gateways {
            runtime,
            artifact_tool,
            network_cli,
            toolchain,
            confirmer,
        } = gateways;

        let stop = Arc::new(StopNetworkUseCase::new(
            runtime.clone(),
            confirmer.clone(),
            config.teardown_targets(),
        ));
        let crypto = Arc::new(GenerateCryptoMaterialUseCase::new(artifact_tool.clone(), confirmer.clone()));
        let genesis = Arc::new(GenerateGenesisBlockUseCase::new(
            artifact_tool.clone(),
            confirmer.clone(),
            config.network.system_channel.clone(),
        ));
        let channel_artifacts = Arc::new(GenerateChannelArtifactsUseCase::new(artifact_tool, confirmer));
        let create = Arc::new(CreateChannelUseCase::new(network_cli.clone(), channels.clone()));
        let join = Arc::new(JoinChannelUseCase::new(network_cli.clone(), channels.clone()));
        let update = Arc::new(UpdateChannelUseCase::new(network_cli.clone(), channels));
        let build = Arc::new(BuildChaincodeUseCase::new(toolchain.clone(), config.paths.chaincode.clone()));
        let test = Arc::new(TestChaincodeUseCase::new(toolchain, config.paths.chaincode.clone()));
        let install = Arc::new(InstallChaincodeUseCase::new(
            network_cli.clone(),
            config.paths.chaincode.clone(),
            config.container_paths.chaincode.clone(),
        ));
        let instantiate = Arc::new(InstantiateChaincodeUseCase::new(
            network_cli.clone(),
            init_args.clone(),
            policy.clone(),
        ));
        let upgrade = Arc::new(UpgradeChaincodeUseCase::new(
            build.clone(),
            test.clone(),
            install.clone(),
            network_cli.clone(),
            config.container_paths.chaincode.clone(),
            init_args,
            policy,
        ));
        let await_ready = Arc::new(AwaitNetworkReadyUseCase::new(network_cli.clone(), config.readiness_policy()));

        let start = Arc::new(StartNetworkUseCase::new(
            BootstrapStages {
                build: build.clone(),
                test: test.clone(),
                stop: stop.clone(),
                crypto: crypto.clone(),
                genesis: genesis.clone(),
                channel_artifacts: channel_artifacts.clone(),
                await_ready,
                create_channel: create.clone(),
                join_channel: join.clone(),
                update_channel: update.clone(),
                install: install.clone(),
                instantiate: instantiate.clone(),
            },
            runtime.clone(),
        ));

        Ok(Self {
            start_network_use_case: start,
            stop_network_use_case: stop,
            install_images_use_case: Arc::new(InstallImagesUseCase::new(runtime)),
            generate_crypto_material_use_case: crypto,
            generate_genesis_block_use_case: genesis,
            generate_channel_artifacts_use_case: channel_artifacts,
            create_channel_use_case: create,
            join_channel_use_case: join,
            update_channel_use_case: update,
            build_chaincode_use_case: build,
            test_chaincode_use_case: test,
            install_chaincode_use_case: install,
            instantiate_chaincode_use_case: instantiate,
            upgrade_chaincode_use_case: upgrade,
            invoke_chaincode_use_case: Arc::new(InvokeChaincodeUseCase::new(network_cli.clone())),
            query_chaincode_use_case: Arc::new(QueryChaincodeUseCase::new(network_cli.clone())),
            run_load_use_case: Arc::new(RunLoadUseCase::new(network_cli, config.load_target())),
            config: Arc::new(config),
        })
    }
}
