//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy::{
    json_abi::JsonAbi,
    primitives::{Address, Bytes, TxHash},
};
use clap::ValueEnum;

/// A factory capable of deploying new instances of a compiled contract
#[derive(Clone, Debug)]
pub struct ContractFactory {
    /// The name of the contract
    pub name: String,
    /// The ABI of the contract
    pub abi: JsonAbi,
    /// The creation bytecode of the contract
    pub bytecode: Bytes,
}

impl ContractFactory {
    /// The number of arguments the contract's constructor expects
    pub fn num_constructor_args(&self) -> usize {
        self.abi
            .constructor
            .as_ref()
            .map_or(0, |constructor| constructor.inputs.len())
    }
}

/// A deployment transaction which has been accepted by the provider
/// but not yet confirmed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingDeployment {
    /// The name of the contract being deployed
    pub contract_name: String,
    /// The hash of the deployment transaction
    pub tx_hash: TxHash,
}

/// A confirmed contract deployment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployedContract {
    /// The name of the deployed contract
    pub contract_name: String,
    /// The address at which the contract was deployed
    pub address: Address,
    /// The hash of the deployment transaction
    pub tx_hash: TxHash,
}

/// The stages a deployment moves through
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeploymentStage {
    /// Nothing has been requested from the toolkit yet
    NotStarted,
    /// The contract factory has been resolved
    FactoryResolved,
    /// The deployment transaction has been submitted
    DeploySubmitted,
    /// The deployment has been confirmed
    Deployed,
}

impl Display for DeploymentStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeploymentStage::NotStarted => write!(f, "not-started"),
            DeploymentStage::FactoryResolved => write!(f, "factory-resolved"),
            DeploymentStage::DeploySubmitted => write!(f, "deploy-submitted"),
            DeploymentStage::Deployed => write!(f, "deployed"),
        }
    }
}

/// The format of the line reporting a successful deployment
#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `<name> deployed to <address>`
    #[default]
    Plain,
    /// `<name> deployed to ' <address> `, kept for existing log consumers
    Legacy,
}

impl OutputFormat {
    /// Format the report line for the given deployment
    pub fn format(&self, deployed: &DeployedContract) -> String {
        let DeployedContract {
            contract_name,
            address,
            ..
        } = deployed;

        match self {
            OutputFormat::Plain => format!("{contract_name} deployed to {address}"),
            OutputFormat::Legacy => format!("{contract_name} deployed to ' {address} "),
        }
    }
}
