use crate::error::{DesynthError, Result};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// Targets and sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub address: Address,
    pub source: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    #[serde(default)]
    pub abi: Option<Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Deployment
// ---------------------------------------------------------------------------

/// The append-only record of everything ever deployed to a network:
/// logical target name → address/source, and source name → ABI. The removal
/// pipeline reads it but never rewrites it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
    #[serde(default)]
    pub targets: BTreeMap<String, Target>,
    #[serde(default)]
    pub sources: BTreeMap<String, Source>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Deployment {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn has_target(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    pub fn target_address(&self, name: &str) -> Result<Address> {
        self.targets
            .get(name)
            .map(|t| t.address)
            .ok_or_else(|| DesynthError::MissingTarget(name.to_string()))
    }

    /// Every address the pipeline touches must resolve to a source that
    /// carries an ABI, or the run aborts before any transaction.
    pub fn require_abi(&self, name: &str) -> Result<()> {
        let target = self
            .targets
            .get(name)
            .ok_or_else(|| DesynthError::MissingTarget(name.to_string()))?;
        let has_abi = self
            .sources
            .get(&target.source)
            .and_then(|s| s.abi.as_ref())
            .is_some();
        if !has_abi {
            return Err(DesynthError::MissingAbi {
                target: name.to_string(),
                source_name: target.source.clone(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Value {
        serde_json::json!({
            "targets": {
                "Issuer": { "address": "0x0000000000000000000000000000000000000011", "source": "Issuer", "timestamp": "2023-01-01" },
                "SynthsETH": { "address": "0x0000000000000000000000000000000000000022", "source": "Synth" },
                "Broken": { "address": "0x0000000000000000000000000000000000000033", "source": "Missing" }
            },
            "sources": {
                "Issuer": { "abi": [] },
                "Synth": { "abi": [] }
            }
        })
    }

    #[test]
    fn load_and_resolve_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deployment.json");
        std::fs::write(&path, serde_json::to_string(&sample()).unwrap()).unwrap();

        let deployment = Deployment::load(&path).unwrap();
        let addr = deployment.target_address("Issuer").unwrap();
        assert_eq!(
            addr,
            "0x0000000000000000000000000000000000000011"
                .parse::<Address>()
                .unwrap()
        );
        assert!(deployment.target_address("Nope").is_err());
    }

    #[test]
    fn require_abi_checks_source() {
        let deployment: Deployment = serde_json::from_value(sample()).unwrap();
        deployment.require_abi("Issuer").unwrap();
        deployment.require_abi("SynthsETH").unwrap();
        assert!(matches!(
            deployment.require_abi("Broken"),
            Err(DesynthError::MissingAbi { .. })
        ));
    }

    #[test]
    fn unknown_fields_survive_roundtrip() {
        let deployment: Deployment = serde_json::from_value(sample()).unwrap();
        let back = serde_json::to_value(&deployment).unwrap();
        assert_eq!(back["targets"]["Issuer"]["timestamp"], "2023-01-01");
    }
}
