use crate::error::{DesynthError, Result};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// File constants
// ---------------------------------------------------------------------------

/// Default root for per-network deployment directories.
pub const DEPLOYED_DIR: &str = "publish/deployed";

pub const CONFIG_FILE: &str = "config.json";
pub const DEPLOYMENT_FILE: &str = "deployment.json";
pub const SYNTHS_FILE: &str = "synths.json";
pub const OWNER_ACTIONS_FILE: &str = "owner-actions.json";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Directory holding the deployment artifacts for `network`.
pub fn deployment_dir(root: &Path, network: &str) -> PathBuf {
    root.join(DEPLOYED_DIR).join(network)
}

pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

pub fn deployment_path(dir: &Path) -> PathBuf {
    dir.join(DEPLOYMENT_FILE)
}

pub fn synths_path(dir: &Path) -> PathBuf {
    dir.join(SYNTHS_FILE)
}

pub fn owner_actions_path(dir: &Path) -> PathBuf {
    dir.join(OWNER_ACTIONS_FILE)
}

// ---------------------------------------------------------------------------
// Currency key validation
// ---------------------------------------------------------------------------

/// A currency key must fit in an on-chain bytes32 and be plain ASCII.
/// Keys are case-sensitive: `sETH` and `seth` are different synths.
pub fn validate_currency_key(key: &str) -> Result<()> {
    if key.is_empty() || key.len() > 32 || !key.is_ascii() {
        return Err(DesynthError::InvalidCurrencyKey(key.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
