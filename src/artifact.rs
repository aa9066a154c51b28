//! Compiler artifact loading
//!
//! The controller's creation bytecode comes from a hardhat-style artifact
//! JSON on disk. Only the bytecode field is consumed; the ABI is defined
//! statically in `contracts`.

use alloy::primitives::Bytes;
use serde::Deserialize;
use std::path::Path;

use crate::error::Error;

/// Hardhat artifact file (`{ "contractName", "abi", "bytecode": "0x…" }`)
#[derive(Debug, Deserialize)]
pub struct ContractArtifact {
    #[serde(rename = "contractName")]
    pub contract_name: Option<String>,
    pub bytecode: String,
}

impl ContractArtifact {
    /// Load from file path
    pub fn load(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            Error::Artifact(format!("failed to read {}: {e}", path.display()))
        })?;
        let artifact: ContractArtifact = serde_json::from_str(&raw).map_err(|e| {
            Error::Artifact(format!("invalid artifact {}: {e}", path.display()))
        })?;

        if artifact.bytecode.trim_start_matches("0x").is_empty() {
            return Err(Error::Artifact(format!(
                "artifact {} carries no creation bytecode (abstract contract or interface?)",
                path.display()
            )));
        }

        Ok(artifact)
    }

    /// Raw creation bytecode
    pub fn creation_code(&self) -> Result<Vec<u8>, Error> {
        hex::decode(self.bytecode.trim_start_matches("0x"))
            .map_err(|e| Error::Artifact(format!("bytecode is not valid hex: {e}")))
    }

    /// Creation bytecode with the ABI-encoded constructor arguments appended
    pub fn deploy_code(&self, constructor_args: &[u8]) -> Result<Bytes, Error> {
        let mut code = self.creation_code()?;
        code.extend_from_slice(constructor_args);
        Ok(code.into())
    }
}
