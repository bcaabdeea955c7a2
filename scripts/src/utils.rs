//! Utilities for the deploy scripts.

use std::{fs, path::Path, str::FromStr};

use alloy::{
    network::Ethereum,
    primitives::Address,
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Map, Serializer, Value};
use tracing::debug;

use crate::{
    constants::{DEPLOYMENTS_INDENT, DEPLOYMENTS_KEY},
    errors::ScriptError,
};

/// Sets up the signing provider with which to submit the deployment,
/// from the deployer's private key and the RPC url.
///
/// No request is made to the node here; chain ID, nonce, and fees are filled
/// in by the provider when the transaction is sent.
pub fn setup_client(priv_key: &str, rpc_url: &str) -> Result<DynProvider<Ethereum>, ScriptError> {
    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    debug!("Deploying from {:#x} via {}", signer.address(), url);

    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);
    Ok(DynProvider::new(provider))
}

/// Records the deployed address of a contract in the deployments file,
/// creating the file if it doesn't exist
pub fn write_deployed_address(
    file_path: &Path,
    contract_key: &str,
    address: Address,
) -> Result<(), ScriptError> {
    let mut parsed_json = if file_path.exists() {
        let contents = fs::read_to_string(file_path)
            .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
        serde_json::from_str::<Value>(&contents)
            .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?
    } else {
        Value::Object(Map::new())
    };

    let root = parsed_json.as_object_mut().ok_or_else(|| {
        ScriptError::WriteDeployments("deployments file is not a JSON object".to_string())
    })?;
    let deployments = root
        .entry(DEPLOYMENTS_KEY)
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| {
            ScriptError::WriteDeployments(format!("`{DEPLOYMENTS_KEY}` is not a JSON object"))
        })?;
    deployments.insert(contract_key.to_string(), Value::String(format!("{address:#x}")));

    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(DEPLOYMENTS_INDENT));
    parsed_json
        .serialize(&mut ser)
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;

    fs::write(file_path, buf).map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;

    Ok(())
}
