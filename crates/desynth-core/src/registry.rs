use crate::error::Result;
use crate::io;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// The base synth the protocol denominates debt in. It is never removable.
pub const BASE_SYNTH: &str = "sUSD";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthEntry {
    pub name: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The ordered asset registry (`synths.json`). An entry is removed exactly
/// when the corresponding on-chain issuer removal is confirmed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynthRegistry {
    entries: Vec<SynthEntry>,
}

impl SynthRegistry {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        io::write_json(path, self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|s| s.name == name)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|s| s.name != name);
        self.entries.len() != before
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
