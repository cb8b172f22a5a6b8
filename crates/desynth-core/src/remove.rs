use crate::chain::{ChainClient, ContractCall};
use crate::confirm::Confirmer;
use crate::error::{DesynthError, Result};
use crate::registry::BASE_SYNTH;
use crate::session::Session;
use crate::step::{execute_step, Expected, Probe, StepSpec};
use crate::types::{AssetKey, GasParams, StepName, StepOutcome};
use alloy_primitives::utils::format_ether;
use alloy_primitives::U256;
use tracing::{info, warn};

/// Contracts every removal touches, besides the synth's own token contract.
pub const CORE_CONTRACTS: [&str; 4] = ["Synthetix", "Issuer", "ExchangeRates", "SystemStatus"];

fn synth_target(name: &str) -> String {
    format!("Synth{name}")
}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct RunReport {
    pub assets: Vec<AssetReport>,
}

#[derive(Debug)]
pub struct AssetReport {
    pub synth: String,
    pub outcomes: Vec<(StepName, StepOutcome)>,
    /// Operator declined the supply confirmation; no steps were attempted.
    pub declined: bool,
}

impl AssetReport {
    fn new(synth: &str) -> Self {
        Self {
            synth: synth.to_string(),
            outcomes: Vec::new(),
            declined: false,
        }
    }

    pub fn outcome(&self, step: StepName) -> Option<StepOutcome> {
        self.outcomes
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, o)| *o)
    }
}

// ---------------------------------------------------------------------------
// Batch validation
// ---------------------------------------------------------------------------

/// Batch-level preconditions, checked before any asset enters the pipeline
/// and before any network traffic.
///
/// An identifier is "known" when it is in the registry, or — the resume case
/// after a crash between the issuer commit and the later cleanup steps —
/// when it is absent from the registry but its `Synth<name>` target is still
/// in the deployment record.
pub fn validate_request(session: &Session, synths: &[String]) -> Result<()> {
    for name in synths {
        if name == BASE_SYNTH {
            return Err(DesynthError::ProtectedSynth(name.clone()));
        }
        AssetKey::new(name.as_str())?;
        let target = synth_target(name);
        if !session.deployment.has_target(&target) {
            if session.registry.contains(name) {
                return Err(DesynthError::MissingTarget(target));
            }
            return Err(DesynthError::UnknownSynth(name.clone()));
        }
        session.deployment.require_abi(&target)?;
    }
    for contract in CORE_CONTRACTS {
        session.deployment.require_abi(contract)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Remover
// ---------------------------------------------------------------------------

/// Drives the per-asset pipeline: consistency check, supply confirmation,
/// then the three guarded transactional steps in their fixed order. One
/// asset is fully processed (or aborted) before the next begins.
pub struct Remover<'a> {
    client: &'a dyn ChainClient,
    confirmer: &'a dyn Confirmer,
    gas: GasParams,
}

impl<'a> Remover<'a> {
    pub fn new(client: &'a dyn ChainClient, confirmer: &'a dyn Confirmer, gas: GasParams) -> Self {
        Self {
            client,
            confirmer,
            gas,
        }
    }

    pub async fn run(&self, session: &mut Session, synths: &[String]) -> Result<RunReport> {
        let mut report = RunReport::default();
        if synths.is_empty() {
            warn!("no synths requested; nothing to do");
            return Ok(report);
        }
        validate_request(session, synths)?;
        for name in synths {
            report.assets.push(self.process(session, name).await?);
        }
        Ok(report)
    }

    async fn process(&self, session: &mut Session, name: &str) -> Result<AssetReport> {
        let key = AssetKey::new(name)?;
        let target = synth_target(name);
        let deployed = session.deployment.target_address(&target)?;
        let mut report = AssetReport::new(name);

        if session.registry.contains(name) {
            // The deployment record and the protocol must agree on which
            // contract this synth is before anything is torn down.
            let registered = self
                .client
                .read_address(&ContractCall::keyed("Synthetix", "synths", &key))
                .await?;
            if registered != deployed {
                return Err(DesynthError::AddressMismatch {
                    synth: name.to_string(),
                    deployed: deployed.to_string(),
                    registered: registered.to_string(),
                });
            }

            if !self.confirm_supply(session, name, &key, &target).await? {
                report.declined = true;
                return Ok(report);
            }

            let outcome = execute_step(
                self.client,
                session,
                &StepSpec {
                    step: StepName::RemoveFromIssuer,
                    synth: name.to_string(),
                    probe: None,
                    write: ContractCall::keyed("Issuer", "removeSynth", &key),
                },
                &self.gas,
            )
            .await?;
            if matches!(outcome, StepOutcome::Executed(_)) {
                session.remove_synth(name);
                session.commit()?;
            }
            report.outcomes.push((StepName::RemoveFromIssuer, outcome));
        } else {
            info!(
                synth = name,
                "absent from the registry; issuer removal already complete"
            );
            report
                .outcomes
                .push((StepName::RemoveFromIssuer, StepOutcome::Skipped));
        }

        let outcome = execute_step(
            self.client,
            session,
            &StepSpec {
                step: StepName::DeregisterAggregator,
                synth: name.to_string(),
                probe: Some(Probe {
                    call: ContractCall::keyed("ExchangeRates", "aggregators", &key),
                    expected: Expected::ZeroAddress,
                }),
                write: ContractCall::keyed("ExchangeRates", "removeAggregator", &key),
            },
            &self.gas,
        )
        .await?;
        report
            .outcomes
            .push((StepName::DeregisterAggregator, outcome));

        let outcome = execute_step(
            self.client,
            session,
            &StepSpec {
                step: StepName::ResumeStatus,
                synth: name.to_string(),
                probe: Some(Probe {
                    call: ContractCall::keyed("SystemStatus", "synthSuspension", &key),
                    expected: Expected::NotSuspended,
                }),
                write: ContractCall::keyed("SystemStatus", "resumeSynth", &key),
            },
            &self.gas,
        )
        .await?;
        report.outcomes.push((StepName::ResumeStatus, outcome));

        Ok(report)
    }

    /// Reads the synth's circulating supply and, when non-zero, requires an
    /// explicit operator confirmation while the removal is still fully
    /// reversible. Returns false when the operator declines.
    async fn confirm_supply(
        &self,
        session: &Session,
        name: &str,
        key: &AssetKey,
        target: &str,
    ) -> Result<bool> {
        let supply = self
            .client
            .read_uint(&ContractCall::no_arg(target, "totalSupply"))
            .await?;
        if supply == U256::ZERO {
            return Ok(true);
        }

        let quote = AssetKey::new(BASE_SYNTH)?;
        let value = self.client.effective_value(key, supply, &quote).await?;
        if session.dry_run {
            info!(
                synth = name,
                "[dry-run] non-zero supply of {} (~{} {BASE_SYNTH}); a live run prompts here",
                format_ether(supply),
                format_ether(value),
            );
            return Ok(true);
        }

        let prompt = format!(
            "{name} still has a circulating supply of {} (~{} {BASE_SYNTH}). Removing it \
             deprecates its proxy and token state contracts. Continue?",
            format_ether(supply),
            format_ether(value),
        );
        if self.confirmer.confirm(&prompt) {
            Ok(true)
        } else {
            warn!(synth = name, "operator declined; leaving this synth in place");
            Ok(false)
        }
    }
}
