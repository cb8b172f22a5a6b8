use crate::error::Result;
use crate::paths;
use alloy_primitives::{Address, B256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// AssetKey
// ---------------------------------------------------------------------------

/// A synth currency code (`sETH`, `sBTC`, ...), passed on-chain as a
/// right-padded bytes32.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetKey(String);

impl AssetKey {
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        paths::validate_currency_key(&code)?;
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ASCII bytes right-padded with zeros, as the contracts expect.
    pub fn to_bytes32(&self) -> B256 {
        let mut word = [0u8; 32];
        word[..self.0.len()].copy_from_slice(self.0.as_bytes());
        B256::from(word)
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// GasParams
// ---------------------------------------------------------------------------

/// EIP-1559 transaction parameters, in wei (fees) and gas units (limit).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GasParams {
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
    pub gas_limit: u64,
}

impl GasParams {
    pub fn from_gwei(max_fee: f64, priority_fee: f64, gas_limit: u64) -> Self {
        const GWEI: f64 = 1e9;
        Self {
            max_fee_per_gas: (max_fee * GWEI) as u128,
            max_priority_fee_per_gas: (priority_fee * GWEI) as u128,
            gas_limit,
        }
    }
}

// ---------------------------------------------------------------------------
// StepName
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepName {
    RemoveFromIssuer,
    DeregisterAggregator,
    ResumeStatus,
}

impl StepName {
    pub fn as_str(self) -> &'static str {
        match self {
            StepName::RemoveFromIssuer => "remove_from_issuer",
            StepName::DeregisterAggregator => "deregister_aggregator",
            StepName::ResumeStatus => "resume_status",
        }
    }
}

impl fmt::Display for StepName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StepOutcome
// ---------------------------------------------------------------------------

/// Result of one guarded transactional step. Exactly one of: no on-chain
/// effect (`Skipped`/`Aborted`), one transaction (`Executed`), or one owner
/// action appended (`QueuedForOwner`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The read probe showed the target state is already reached.
    Skipped,
    /// Transaction submitted and confirmed.
    Executed(B256),
    /// Signer is not the contract owner; the call was queued for the
    /// owner/multisig flow instead.
    QueuedForOwner,
    /// Dry run: nothing read past the probe, nothing written anywhere.
    Aborted,
}

impl StepOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            StepOutcome::Skipped => "skipped",
            StepOutcome::Executed(_) => "executed",
            StepOutcome::QueuedForOwner => "queued-for-owner",
            StepOutcome::Aborted => "aborted",
        }
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OwnerAction
// ---------------------------------------------------------------------------

/// A privileged call the active signer was not allowed to make, recorded for
/// later multisig execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerAction {
    pub target: Address,
    pub action: String,
    /// ABI-encoded calldata, 0x-prefixed hex.
    pub data: String,
    pub complete: bool,
    pub requested_by: Address,
    pub requested_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
