//! Command Tree
//!
//! Arguments left out on the command line arrive empty and are reported by
//! the use case's own validation as usage errors.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ledger-network-bootstrap", version)]
#[command(about = "Bootstrap, operate and load-test a permissioned ledger network", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build the default chaincode, regenerate artifacts and bring the network up
    Start,

    /// Tear the network down and optionally delete its ledger data
    Stop,

    /// Pull the network images at the configured tag and tag them `latest`
    InstallImages,

    /// Generate crypto material, genesis block or channel artifacts
    Generate {
        #[command(subcommand)]
        command: GenerateCommand,
    },

    /// Channel lifecycle against the running network
    Channel {
        #[command(subcommand)]
        command: ChannelCommand,
    },

    /// Chaincode lifecycle against the running network
    Chaincode {
        #[command(subcommand)]
        command: ChaincodeCommand,
    },

    /// Run concurrent write workers against the running network
    Benchmark {
        /// Number of concurrent workers
        #[arg(short, long)]
        jobs: Option<u32>,

        /// Writes issued by each worker
        #[arg(short, long)]
        entries: Option<u32>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum GenerateCommand {
    /// Generate the identity tree from a crypto config file
    Crypto {
        /// Crypto config file
        #[arg(long)]
        config: Option<String>,

        /// Output directory
        #[arg(long)]
        output: Option<String>,
    },

    /// Generate and inspect the ordering service genesis block
    Genesis {
        /// Base directory; the block lands in `{base}/{system channel}/`
        #[arg(long)]
        base: Option<String>,

        /// Directory holding configtx.yaml
        #[arg(long)]
        config: Option<String>,

        /// Crypto material directory
        #[arg(long)]
        cryptos: Option<String>,

        /// Network profile
        #[arg(long)]
        profile: Option<String>,
    },

    /// Generate the channel creation and anchor peer transactions
    Channel {
        #[arg(short, long)]
        channel: Option<String>,

        #[arg(long)]
        base: Option<String>,

        #[arg(long)]
        config: Option<String>,

        #[arg(long)]
        cryptos: Option<String>,

        /// Network profile
        #[arg(long)]
        profile: Option<String>,

        #[arg(long)]
        channel_profile: Option<String>,

        /// Organization MSP id
        #[arg(short, long)]
        org: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ChannelCommand {
    /// Submit the channel creation transaction and fetch the channel block
    Create {
        #[arg(short, long)]
        channel: Option<String>,

        #[arg(short, long)]
        org: Option<String>,
    },

    /// Join a peer to the channel
    Join {
        #[arg(short, long)]
        channel: Option<String>,

        #[arg(short, long)]
        org: Option<String>,

        /// Peer address; the utility container's default peer when omitted
        #[arg(short, long)]
        peer: Option<String>,
    },

    /// Submit the organization's anchor peer update
    Update {
        #[arg(short, long)]
        channel: Option<String>,

        #[arg(short, long)]
        org: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ChaincodeCommand {
    /// Compile a chaincode
    Build {
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Run a chaincode's unit tests
    Test {
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Install a chaincode version on the peer
    Install {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(long)]
        version: Option<String>,

        /// Package path as seen by the peer; derived from the name when omitted
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Instantiate an installed chaincode on a channel
    Instantiate {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(long)]
        version: Option<String>,

        #[arg(short, long)]
        channel: Option<String>,
    },

    /// Build, test and install a new version, then upgrade to it
    Upgrade {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(long)]
        version: Option<String>,

        #[arg(short, long)]
        channel: Option<String>,
    },

    /// Submit a write transaction
    Invoke {
        #[arg(short, long)]
        channel: Option<String>,

        #[arg(short, long)]
        name: Option<String>,

        /// JSON payload, e.g. '{"Args":["put","a","1"]}'
        #[arg(short, long)]
        args: Option<String>,
    },

    /// Evaluate a read-only query
    Query {
        #[arg(short, long)]
        channel: Option<String>,

        #[arg(short, long)]
        name: Option<String>,

        /// JSON payload, e.g. '{"Args":["get","a"]}'
        #[arg(short, long)]
        args: Option<String>,
    },
}
