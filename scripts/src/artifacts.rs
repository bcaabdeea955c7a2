//! Resolution of contract factories from compiled contract artifacts
//!
//! Both the Hardhat layout (`<root>/contracts/<Name>.sol/<Name>.json`) and the
//! Foundry layout (`<root>/<Name>.sol/<Name>.json`) are supported.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use serde::Deserialize;
use tracing::debug;

use crate::{
    constants::{ARTIFACT_EXTENSION, HARDHAT_SOURCES_DIR, SOLIDITY_EXTENSION},
    errors::ScriptError,
    types::ContractFactory,
};

/// A compilation artifact as emitted by Hardhat or Foundry
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Artifact {
    /// The contract name, only present in Hardhat artifacts
    contract_name: Option<String>,
    /// The contract ABI
    abi: JsonAbi,
    /// The creation bytecode
    bytecode: ArtifactBytecode,
}

/// The creation bytecode of an artifact
#[derive(Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    /// Hardhat stores the bytecode as a bare hex string
    Hex(String),
    /// Foundry nests the hex string in an object alongside link references
    Object {
        /// The bytecode hex string
        object: String,
    },
}

impl ArtifactBytecode {
    /// The bytecode hex string
    fn hex(&self) -> &str {
        match self {
            ArtifactBytecode::Hex(hex) => hex,
            ArtifactBytecode::Object { object } => object,
        }
    }
}

/// The candidate paths of the artifact for the given contract, in lookup order
pub fn artifact_paths(artifacts_dir: &Path, contract_name: &str) -> Vec<PathBuf> {
    let source_dir = format!("{contract_name}.{SOLIDITY_EXTENSION}");
    let file_name = format!("{contract_name}.{ARTIFACT_EXTENSION}");

    vec![
        artifacts_dir
            .join(HARDHAT_SOURCES_DIR)
            .join(&source_dir)
            .join(&file_name),
        artifacts_dir.join(&source_dir).join(&file_name),
    ]
}

/// Parses a contract factory from the contents of an artifact file
pub fn parse_artifact(contract_name: &str, contents: &str) -> Result<ContractFactory, ScriptError> {
    let artifact: Artifact = serde_json::from_str(contents)
        .map_err(|e| ScriptError::ArtifactParsing(format!("{contract_name}: {e}")))?;

    if let Some(name) = &artifact.contract_name {
        if name != contract_name {
            return Err(ScriptError::ArtifactParsing(format!(
                "expected artifact for `{contract_name}`, found `{name}`"
            )));
        }
    }

    let bytecode = Bytes::from_str(artifact.bytecode.hex())
        .map_err(|e| ScriptError::ArtifactParsing(format!("{contract_name}: {e}")))?;

    // Interfaces and abstract contracts compile to empty bytecode
    if bytecode.is_empty() {
        return Err(ScriptError::ArtifactParsing(format!(
            "`{contract_name}` has no creation bytecode and cannot be deployed"
        )));
    }

    Ok(ContractFactory {
        name: contract_name.to_string(),
        abi: artifact.abi,
        bytecode,
    })
}

/// Resolves the contract factory for the given contract from the artifacts directory
pub async fn load_contract_factory(
    artifacts_dir: &Path,
    contract_name: &str,
) -> Result<ContractFactory, ScriptError> {
    let candidates = artifact_paths(artifacts_dir, contract_name);

    for path in &candidates {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => {
                debug!("Reading artifact for {} from {}", contract_name, path.display());
                return parse_artifact(contract_name, &contents);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(ScriptError::ArtifactParsing(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        }
    }

    let searched = candidates
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    Err(ScriptError::ArtifactNotFound(format!(
        "no artifact for `{contract_name}` (searched {searched})"
    )))
}
