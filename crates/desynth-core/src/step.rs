use crate::chain::{ChainClient, ChainError, ContractCall};
use crate::error::{DesynthError, Result};
use crate::session::Session;
use crate::types::{GasParams, OwnerAction, StepName, StepOutcome};
use alloy_primitives::Address;
use chrono::Utc;
use tracing::info;

// ---------------------------------------------------------------------------
// Probe / Expected
// ---------------------------------------------------------------------------

/// Predicate over a read probe's result: "the target state is already
/// reached, send nothing".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// Probe reads an address; satisfied when it is the zero address.
    ZeroAddress,
    /// Probe reads a suspension flag; satisfied when not suspended.
    NotSuspended,
}

#[derive(Debug, Clone)]
pub struct Probe {
    pub call: ContractCall,
    pub expected: Expected,
}

// ---------------------------------------------------------------------------
// StepSpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct StepSpec {
    pub step: StepName,
    pub synth: String,
    pub probe: Option<Probe>,
    pub write: ContractCall,
}

// ---------------------------------------------------------------------------
// execute_step
// ---------------------------------------------------------------------------

/// Run one state-changing call safely, whether or not the caller holds
/// authority and whether or not a prior run already applied the change.
///
/// In order: probe satisfied → `Skipped`; dry run → `Aborted` after a log
/// line; signer is not the contract owner → append one owner action and
/// persist the queue → `QueuedForOwner`; otherwise submit exactly one
/// transaction and await its confirmation → `Executed`.
pub async fn execute_step(
    client: &dyn ChainClient,
    session: &mut Session,
    spec: &StepSpec,
    gas: &GasParams,
) -> Result<StepOutcome> {
    if let Some(probe) = &spec.probe {
        let satisfied = match probe.expected {
            Expected::ZeroAddress => {
                let addr = client
                    .read_address(&probe.call)
                    .await
                    .map_err(|e| step_err(spec, e))?;
                addr == Address::ZERO
            }
            Expected::NotSuspended => {
                let suspended = client
                    .read_bool(&probe.call)
                    .await
                    .map_err(|e| step_err(spec, e))?;
                !suspended
            }
        };
        if satisfied {
            info!(synth = %spec.synth, step = %spec.step, "already satisfied, skipping");
            return Ok(StepOutcome::Skipped);
        }
    }

    if session.dry_run {
        info!(
            synth = %spec.synth,
            step = %spec.step,
            "[dry-run] would call {}",
            spec.write.label()
        );
        return Ok(StepOutcome::Aborted);
    }

    let owner = client
        .owner_of(&spec.write.contract)
        .await
        .map_err(|e| step_err(spec, e))?;
    if owner != client.signer() {
        let target = session.deployment.target_address(&spec.write.contract)?;
        let data = spec.write.calldata();
        let label = spec.write.label();
        info!(
            synth = %spec.synth,
            step = %spec.step,
            "signer is not the owner of {}; queueing for owner signing: {} data={data}",
            spec.write.contract,
            label,
        );
        session.owner_actions.insert(
            label.clone(),
            OwnerAction {
                target,
                action: label,
                data: data.to_string(),
                complete: false,
                requested_by: client.signer(),
                requested_at: Utc::now(),
            },
        );
        session.save_owner_actions()?;
        return Ok(StepOutcome::QueuedForOwner);
    }

    let hash = client
        .submit(&spec.write, gas)
        .await
        .map_err(|e| step_err(spec, e))?;
    info!(
        synth = %spec.synth,
        step = %spec.step,
        tx = %hash,
        "confirmed {}",
        spec.write.label()
    );
    Ok(StepOutcome::Executed(hash))
}

fn step_err(spec: &StepSpec, source: ChainError) -> DesynthError {
    DesynthError::StepFailed {
        synth: spec.synth.clone(),
        step: spec.step,
        source,
    }
}
