//! Definitions of CLI arguments for the deploy script

use std::path::PathBuf;

use clap::{Args, Parser};
use tracing::Level;

use crate::{
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_CONTRACT_NAME, DEFAULT_PKEY, DEFAULT_RPC_URL,
        NUM_DEPLOY_CONFIRMATIONS,
    },
    types::OutputFormat,
};

/// Deploy the Freelance contract to an EVM chain
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer, defaults to the first Anvil account
    #[arg(short, long = "pkey", env = "PKEY", default_value = DEFAULT_PKEY)]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Directory containing the compiled contract artifacts
    #[arg(short, long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Number of block confirmations to wait for
    #[arg(long, default_value_t = NUM_DEPLOY_CONFIRMATIONS)]
    pub confirmations: u64,

    /// Maximum level of the logs written to stderr
    #[arg(long, default_value_t = Level::INFO)]
    pub log_level: Level,

    /// The deployment to perform
    #[command(flatten)]
    pub deploy: DeployArgs,
}

/// Which contract to deploy and how to report it
#[derive(Args)]
pub struct DeployArgs {
    /// Name of the contract to deploy
    #[arg(short, long, default_value = DEFAULT_CONTRACT_NAME)]
    pub contract: String,

    /// Format of the line reporting the deployed address
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output_format: OutputFormat,

    /// Path to a `deployments.json` file in which to record the deployed address
    #[arg(short, long)]
    pub deployments: Option<PathBuf>,
}
