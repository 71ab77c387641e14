//! Command Handlers
//!
//! Translate parsed commands into use-case requests and print results on
//! stdout. Diagnostics go through `tracing` on stderr.

use crate::domain::models::artifacts::{
    ChannelArtifactsRequest, CryptoMaterialRequest, GenerationOutcome, GenesisBlockRequest,
};
use crate::domain::models::chaincode::{CallRequest, ChaincodeNameRequest, DeployRequest, InstallRequest};
use crate::domain::models::channel::ChannelRequest;
use crate::domain::models::load::LoadRequest;
use crate::infrastructure::driven_adapters::OperatorLock;
use crate::shared::errors::UseCaseError;

use super::commands::{ChaincodeCommand, ChannelCommand, Commands, GenerateCommand};
use super::context::AppContext;

/// Run one command to completion
///
/// # Errors
///
/// Returns the use case's error unchanged; the caller maps it to exit status 1.
pub async fn run(context: &AppContext, command: Commands) -> Result<(), UseCaseError> {
    match command {
        Commands::Start => {
            let _lock = OperatorLock::acquire(&context.config.paths.lock_file)?;
            context
                .start_network_use_case
                .execute(context.config.bootstrap_plan())
                .await?;
            println!("Network started");
        }
        Commands::Stop => {
            let _lock = OperatorLock::acquire(&context.config.paths.lock_file)?;
            let outcome = context.stop_network_use_case.execute().await?;
            println!(
                "Network stopped ({} containers, {} images removed{})",
                outcome.containers_removed,
                outcome.images_removed,
                if outcome.data_removed { ", ledger data deleted" } else { "" }
            );
        }
        Commands::InstallImages => {
            let count = context
                .install_images_use_case
                .execute(context.config.image_set())
                .await?;
            println!("Installed {count} images");
        }
        Commands::Generate { command } => generate(context, command).await?,
        Commands::Channel { command } => channel(context, command).await?,
        Commands::Chaincode { command } => chaincode(context, command).await?,
        Commands::Benchmark { jobs, entries, json } => {
            let report = context
                .run_load_use_case
                .execute(LoadRequest { jobs, entries })
                .await?;
            if json {
                let body = serde_json::to_string_pretty(&report)
                    .map_err(|e| UseCaseError::io("failed to encode report")(std::io::Error::other(e)))?;
                println!("{body}");
            } else {
                println!("{report}");
            }
        }
    }

    Ok(())
}

async fn generate(context: &AppContext, command: GenerateCommand) -> Result<(), UseCaseError> {
    let outcome = match command {
        GenerateCommand::Crypto { config, output } => {
            context
                .generate_crypto_material_use_case
                .execute(CryptoMaterialRequest {
                    config_path: config.unwrap_or_default(),
                    output_path: output.unwrap_or_default(),
                })
                .await?
        }
        GenerateCommand::Genesis {
            base,
            config,
            cryptos,
            profile,
        } => {
            context
                .generate_genesis_block_use_case
                .execute(GenesisBlockRequest {
                    base_path: base.unwrap_or_default(),
                    config_path: config.unwrap_or_default(),
                    cryptos_path: cryptos.unwrap_or_default(),
                    network_profile: profile.unwrap_or_default(),
                })
                .await?
        }
        GenerateCommand::Channel {
            channel,
            base,
            config,
            cryptos,
            profile,
            channel_profile,
            org,
        } => {
            context
                .generate_channel_artifacts_use_case
                .execute(ChannelArtifactsRequest {
                    channel_name: channel.unwrap_or_default(),
                    base_path: base.unwrap_or_default(),
                    config_path: config.unwrap_or_default(),
                    cryptos_path: cryptos.unwrap_or_default(),
                    network_profile: profile.unwrap_or_default(),
                    channel_profile: channel_profile.unwrap_or_default(),
                    org_id: org.unwrap_or_default(),
                })
                .await?
        }
    };

    match outcome {
        GenerationOutcome::Generated(path) => println!("Generated {}", path.display()),
        GenerationOutcome::Skipped(path) => println!("Kept existing {}", path.display()),
    }
    Ok(())
}

async fn channel(context: &AppContext, command: ChannelCommand) -> Result<(), UseCaseError> {
    match command {
        ChannelCommand::Create { channel, org } => {
            context
                .create_channel_use_case
                .execute(ChannelRequest::new(channel.unwrap_or_default(), org.unwrap_or_default()))
                .await?;
            println!("Channel created");
        }
        ChannelCommand::Join { channel, org, peer } => {
            let request = ChannelRequest::new(channel.unwrap_or_default(), org.unwrap_or_default()).with_peer(peer);
            context.join_channel_use_case.execute(request).await?;
            println!("Peer joined channel");
        }
        ChannelCommand::Update { channel, org } => {
            context
                .update_channel_use_case
                .execute(ChannelRequest::new(channel.unwrap_or_default(), org.unwrap_or_default()))
                .await?;
            println!("Anchor peers updated");
        }
    }
    Ok(())
}

async fn chaincode(context: &AppContext, command: ChaincodeCommand) -> Result<(), UseCaseError> {
    match command {
        ChaincodeCommand::Build { name } => {
            context
                .build_chaincode_use_case
                .execute(ChaincodeNameRequest {
                    name: name.unwrap_or_default(),
                })
                .await?;
            println!("Chaincode built");
        }
        ChaincodeCommand::Test { name } => {
            context
                .test_chaincode_use_case
                .execute(ChaincodeNameRequest {
                    name: name.unwrap_or_default(),
                })
                .await?;
            println!("Chaincode tests passed");
        }
        ChaincodeCommand::Install { name, version, path } => {
            let name = name.unwrap_or_default();
            let path = match path {
                Some(path) => path,
                None if name.is_empty() => String::new(),
                None => context.config.install_path(&name),
            };
            context
                .install_chaincode_use_case
                .execute(InstallRequest {
                    name,
                    version: version.unwrap_or_default(),
                    path,
                })
                .await?;
            println!("Chaincode installed");
        }
        ChaincodeCommand::Instantiate { name, version, channel } => {
            context
                .instantiate_chaincode_use_case
                .execute(deploy_request(name, version, channel))
                .await?;
            println!("Chaincode instantiated");
        }
        ChaincodeCommand::Upgrade { name, version, channel } => {
            context
                .upgrade_chaincode_use_case
                .execute(deploy_request(name, version, channel))
                .await?;
            println!("Chaincode upgraded");
        }
        ChaincodeCommand::Invoke { channel, name, args } => {
            let response = context
                .invoke_chaincode_use_case
                .execute(call_request(channel, name, args))
                .await?;
            println!("{response}");
        }
        ChaincodeCommand::Query { channel, name, args } => {
            let response = context
                .query_chaincode_use_case
                .execute(call_request(channel, name, args))
                .await?;
            println!("{response}");
        }
    }
    Ok(())
}

fn deploy_request(name: Option<String>, version: Option<String>, channel: Option<String>) -> DeployRequest {
    DeployRequest {
        name: name.unwrap_or_default(),
        version: version.unwrap_or_default(),
        channel: channel.unwrap_or_default(),
    }
}

fn call_request(channel: Option<String>, name: Option<String>, args: Option<String>) -> CallRequest {
    CallRequest {
        channel: channel.unwrap_or_default(),
        name: name.unwrap_or_default(),
        args: args.unwrap_or_default(),
    }
}
