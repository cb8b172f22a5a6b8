use crate::chain::{EthChain, SignerSource};
use crate::cmd::{target_addresses, TargetOpts};
use crate::confirm::StdinConfirmer;
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Args;
use desynth_core::confirm::{AutoConfirm, Confirmer};
use desynth_core::remove::{validate_request, Remover, RunReport};
use desynth_core::session::Session;
use desynth_core::types::{GasParams, StepOutcome};

#[derive(Args)]
pub struct RemoveOpts {
    #[command(flatten)]
    pub target: TargetOpts,

    /// Synth to remove (repeatable)
    #[arg(long = "synth", short = 's', value_name = "CODE")]
    pub synths: Vec<String>,

    /// Skip confirmation prompts
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Log what would happen without sending transactions or writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Send from this node-managed account instead of the node default
    #[arg(long, value_name = "ADDRESS")]
    pub account: Option<String>,

    /// Sign locally with this private key
    #[arg(long, env = "DESYNTH_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Max fee per gas, in gwei
    #[arg(long, default_value_t = 100.0)]
    pub max_fee_per_gas: f64,

    /// Max priority fee per gas, in gwei
    #[arg(long, default_value_t = 2.0)]
    pub max_priority_fee_per_gas: f64,

    /// Gas limit per transaction
    #[arg(long, default_value_t = 500_000)]
    pub gas_limit: u64,
}

pub async fn run(opts: RemoveOpts, json: bool) -> anyhow::Result<()> {
    if opts.synths.is_empty() {
        println!("No synths requested; nothing to do.");
        return Ok(());
    }

    let dir = opts.target.deployment_dir();
    let mut session = Session::open(&dir, &opts.target.network, opts.dry_run)
        .with_context(|| format!("failed to open deployment at {}", dir.display()))?;

    // Batch preconditions are local; fail before touching the network.
    validate_request(&session, &opts.synths)?;

    let signing = if let Some(key) = &opts.private_key {
        SignerSource::PrivateKey(key.clone())
    } else if let Some(account) = &opts.account {
        SignerSource::Account(account.parse().context("invalid --account address")?)
    } else {
        SignerSource::NodeDefault
    };
    let chain = EthChain::connect(
        &opts.target.provider_url,
        signing,
        target_addresses(&session.deployment),
    )
    .await?;

    let confirmer: Box<dyn Confirmer> = if opts.yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(StdinConfirmer)
    };
    let gas = GasParams::from_gwei(
        opts.max_fee_per_gas,
        opts.max_priority_fee_per_gas,
        opts.gas_limit,
    );

    let remover = Remover::new(&chain, confirmer.as_ref(), gas);
    let report = remover.run(&mut session, &opts.synths).await?;
    render(&report, json)
}

fn render(report: &RunReport, json: bool) -> anyhow::Result<()> {
    if json {
        let assets: Vec<serde_json::Value> = report
            .assets
            .iter()
            .map(|a| {
                serde_json::json!({
                    "synth": a.synth,
                    "declined": a.declined,
                    "steps": a.outcomes.iter().map(|(step, outcome)| {
                        serde_json::json!({
                            "step": step.as_str(),
                            "outcome": outcome.as_str(),
                            "tx": match outcome {
                                StepOutcome::Executed(hash) => Some(hash.to_string()),
                                _ => None,
                            },
                        })
                    }).collect::<Vec<_>>(),
                })
            })
            .collect();
        return print_json(&serde_json::json!({ "assets": assets }));
    }

    let mut rows = Vec::new();
    for asset in &report.assets {
        if asset.declined {
            rows.push(vec![
                asset.synth.clone(),
                "-".to_string(),
                "declined".to_string(),
                String::new(),
            ]);
            continue;
        }
        for (step, outcome) in &asset.outcomes {
            let tx = match outcome {
                StepOutcome::Executed(hash) => hash.to_string(),
                _ => String::new(),
            };
            rows.push(vec![
                asset.synth.clone(),
                step.to_string(),
                outcome.to_string(),
                tx,
            ]);
        }
    }
    print_table(&["SYNTH", "STEP", "OUTCOME", "TX"], rows);
    Ok(())
}
