use crate::error::Result;
use crate::io;
use crate::types::OwnerAction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The owner-action queue (`owner-actions.json`), keyed by the human-facing
/// call label (`Issuer.removeSynth(sETH)`). Re-queuing the same call on a
/// later run overwrites the keyed entry; nothing here verifies that a queued
/// action was ever executed by the multisig.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerActions {
    entries: BTreeMap<String, OwnerAction>,
}

impl OwnerActions {
    /// Missing file means an empty queue; deployments only grow this file
    /// on demand.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        io::write_json(path, self)
    }

    pub fn insert(&mut self, key: String, action: OwnerAction) {
        self.entries.insert(key, action);
    }

    pub fn get(&self, key: &str) -> Option<&OwnerAction> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use chrono::Utc;
    use tempfile::TempDir;

    fn action() -> OwnerAction {
        OwnerAction {
            target: Address::ZERO,
            action: "Issuer.removeSynth(sETH)".to_string(),
            data: "0xdeadbeef".to_string(),
            complete: false,
            requested_by: Address::ZERO,
            requested_at: Utc::now(),
        }
    }

    #[test]
    fn missing_file_is_empty_queue() {
        let dir = TempDir::new().unwrap();
        let queue = OwnerActions::load(&dir.path().join("owner-actions.json")).unwrap();
        assert!(queue.is_empty());
    }

    #[test]
    fn insert_overwrites_same_key() {
        let mut queue = OwnerActions::default();
        queue.insert("Issuer.removeSynth(sETH)".to_string(), action());
        queue.insert("Issuer.removeSynth(sETH)".to_string(), action());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("owner-actions.json");
        let mut queue = OwnerActions::default();
        queue.insert("Issuer.removeSynth(sETH)".to_string(), action());
        queue.save(&path).unwrap();

        let loaded = OwnerActions::load(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(
            loaded.get("Issuer.removeSynth(sETH)").unwrap().data,
            "0xdeadbeef"
        );
    }
}
