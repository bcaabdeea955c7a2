//! Scripts for deploying the Freelance smart contract.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
mod commands;
pub mod constants;
pub mod errors;
pub mod toolkit;
pub mod types;
pub mod utils;

pub use commands::deploy_contract;
