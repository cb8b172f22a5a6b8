use crate::chain::{EthChain, SignerSource};
use crate::cmd::{target_addresses, TargetOpts};
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Args;
use desynth_core::chain::{ChainClient, ContractCall};
use desynth_core::registry::BASE_SYNTH;
use desynth_core::remove::validate_request;
use desynth_core::session::Session;
use desynth_core::types::AssetKey;

#[derive(Args)]
pub struct VerifyOpts {
    #[command(flatten)]
    pub target: TargetOpts,

    /// Synth to check (repeatable; default: every removable synth)
    #[arg(long = "synth", short = 's', value_name = "CODE")]
    pub synths: Vec<String>,
}

/// Read-only dress rehearsal: the batch validation plus the per-synth
/// deployment-vs-protocol address comparison, with no signer and no writes.
pub async fn run(opts: VerifyOpts, json: bool) -> anyhow::Result<()> {
    let dir = opts.target.deployment_dir();
    let session = Session::open(&dir, &opts.target.network, true)
        .with_context(|| format!("failed to open deployment at {}", dir.display()))?;

    let synths: Vec<String> = if opts.synths.is_empty() {
        session
            .registry
            .names()
            .filter(|name| *name != BASE_SYNTH)
            .map(String::from)
            .collect()
    } else {
        opts.synths.clone()
    };
    validate_request(&session, &synths)?;

    let chain = EthChain::connect(
        &opts.target.provider_url,
        SignerSource::ReadOnly,
        target_addresses(&session.deployment),
    )
    .await?;

    let mut rows = Vec::new();
    let mut mismatches = 0usize;
    for name in &synths {
        let key = AssetKey::new(name.as_str())?;
        let deployed = session.deployment.target_address(&format!("Synth{name}"))?;
        let registered = chain
            .read_address(&ContractCall::keyed("Synthetix", "synths", &key))
            .await?;
        let in_registry = session.registry.contains(name);
        let status = if !in_registry {
            "removed"
        } else if registered == deployed {
            "ok"
        } else {
            mismatches += 1;
            "mismatch"
        };
        rows.push((name.clone(), deployed, registered, status));
    }

    if json {
        let entries: Vec<serde_json::Value> = rows
            .iter()
            .map(|(name, deployed, registered, status)| {
                serde_json::json!({
                    "synth": name,
                    "deployed": deployed.to_string(),
                    "registered": registered.to_string(),
                    "status": status,
                })
            })
            .collect();
        print_json(&entries)?;
    } else {
        print_table(
            &["SYNTH", "DEPLOYED", "REGISTERED", "STATUS"],
            rows.iter()
                .map(|(name, deployed, registered, status)| {
                    vec![
                        name.clone(),
                        deployed.to_string(),
                        registered.to_string(),
                        status.to_string(),
                    ]
                })
                .collect(),
        );
    }

    if mismatches > 0 {
        anyhow::bail!("{mismatches} synth(s) out of sync with the deployment record");
    }
    Ok(())
}
