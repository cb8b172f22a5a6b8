use crate::types::{AssetKey, GasParams};
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use async_trait::async_trait;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ContractCall
// ---------------------------------------------------------------------------

/// A call against a deployed contract, addressed by its logical deployment
/// name. Every write and probe the removal pipeline makes takes either no
/// argument or a single bytes32 currency key, so the encoding lives here
/// instead of behind a full ABI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub contract: String,
    pub method: String,
    pub arg: Option<AssetKey>,
}

impl ContractCall {
    pub fn keyed(contract: impl Into<String>, method: impl Into<String>, key: &AssetKey) -> Self {
        Self {
            contract: contract.into(),
            method: method.into(),
            arg: Some(key.clone()),
        }
    }

    pub fn no_arg(contract: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
            method: method.into(),
            arg: None,
        }
    }

    /// Canonical signature, e.g. `removeSynth(bytes32)`.
    pub fn signature(&self) -> String {
        match &self.arg {
            Some(_) => format!("{}(bytes32)", self.method),
            None => format!("{}()", self.method),
        }
    }

    /// 4-byte selector plus the padded argument word, ready for eth_call /
    /// transaction input / owner-action records.
    pub fn calldata(&self) -> Bytes {
        let selector = &keccak256(self.signature().as_bytes())[..4];
        let mut data = Vec::with_capacity(36);
        data.extend_from_slice(selector);
        if let Some(key) = &self.arg {
            data.extend_from_slice(key.to_bytes32().as_slice());
        }
        Bytes::from(data)
    }

    /// Human-facing label, e.g. `Issuer.removeSynth(sETH)`.
    pub fn label(&self) -> String {
        match &self.arg {
            Some(key) => format!("{}.{}({})", self.contract, self.method, key),
            None => format!("{}.{}()", self.contract, self.method),
        }
    }
}

// ---------------------------------------------------------------------------
// ChainError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("no deployment target for contract '{0}'")]
    UnknownContract(String),

    #[error("rpc error: {0}")]
    Rpc(String),

    #[error("transaction {hash} reverted")]
    Reverted { hash: B256 },

    #[error("bad return data from {call}: {detail}")]
    Decode { call: String, detail: String },

    #[error("no signer account available: pass --account or --private-key")]
    NoSigner,
}

// ---------------------------------------------------------------------------
// ChainClient
// ---------------------------------------------------------------------------

/// The read/write surface the removal pipeline needs from a node. The
/// production implementation lives in the CLI crate; tests use an in-memory
/// simulation.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address of the active signer.
    fn signer(&self) -> Address;

    /// `owner()` of the named contract, for the authorization check.
    async fn owner_of(&self, contract: &str) -> Result<Address, ChainError>;

    /// eth_call returning a single address word.
    async fn read_address(&self, call: &ContractCall) -> Result<Address, ChainError>;

    /// eth_call returning a single uint256 word.
    async fn read_uint(&self, call: &ContractCall) -> Result<U256, ChainError>;

    /// eth_call whose first return word is a flag (structs with a leading
    /// bool decode the same way).
    async fn read_bool(&self, call: &ContractCall) -> Result<bool, ChainError>;

    /// Submit the write and wait for its receipt. Ok only for a mined,
    /// non-reverted transaction.
    async fn submit(&self, call: &ContractCall, gas: &GasParams) -> Result<B256, ChainError>;

    /// `ExchangeRates.effectiveValue(key, amount, quote)`, used only for
    /// the supply-confirmation prompt.
    async fn effective_value(
        &self,
        key: &AssetKey,
        amount: U256,
        quote: &AssetKey,
    ) -> Result<U256, ChainError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
