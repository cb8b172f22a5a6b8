use crate::error::Result;
use crate::io;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// The config mirror: contract-instance name → metadata, kept in lock-step
/// with confirmed on-chain state. Metadata is opaque to the pipeline and
/// preserved as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    entries: BTreeMap<String, Value>,
}

impl ConfigDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        io::write_json(path, self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    /// Delete a synth's Proxy/TokenState/Synth entries together. Returns the
    /// names that were actually present.
    pub fn remove_synth_contracts(&mut self, synth: &str) -> Vec<String> {
        ["Proxy", "TokenState", "Synth"]
            .iter()
            .map(|prefix| format!("{prefix}{synth}"))
            .filter(|name| self.remove(name))
            .collect()
    }
}
