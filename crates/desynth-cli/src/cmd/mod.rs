pub mod remove;
pub mod verify;

use alloy::primitives::Address;
use clap::Args;
use desynth_core::deployment::Deployment;
use desynth_core::paths;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct TargetOpts {
    /// Network whose deployment to operate on
    #[arg(long, short = 'n', default_value = "sepolia")]
    pub network: String,

    /// Deployment directory (default: publish/deployed/<network>)
    #[arg(long)]
    pub deployment_path: Option<PathBuf>,

    /// JSON-RPC endpoint
    #[arg(
        long,
        env = "DESYNTH_PROVIDER_URL",
        default_value = "http://127.0.0.1:8545"
    )]
    pub provider_url: String,
}

impl TargetOpts {
    pub fn deployment_dir(&self) -> PathBuf {
        self.deployment_path
            .clone()
            .unwrap_or_else(|| paths::deployment_dir(Path::new("."), &self.network))
    }
}

/// Logical name → address map for the chain client.
pub fn target_addresses(deployment: &Deployment) -> BTreeMap<String, Address> {
    deployment
        .targets
        .iter()
        .map(|(name, target)| (name.clone(), target.address))
        .collect()
}
