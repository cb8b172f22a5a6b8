use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{keccak256, Address, Bytes, B256, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use anyhow::Context;
use async_trait::async_trait;
use desynth_core::chain::{ChainClient, ChainError, ContractCall};
use desynth_core::types::{AssetKey, GasParams};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Signer selection
// ---------------------------------------------------------------------------

pub enum SignerSource {
    /// Sign locally with a raw key.
    PrivateKey(String),
    /// Send from a node-managed account.
    Account(Address),
    /// First account the node reports.
    NodeDefault,
    /// Reads only; never submits.
    ReadOnly,
}

// ---------------------------------------------------------------------------
// EthChain
// ---------------------------------------------------------------------------

/// JSON-RPC implementation of the chain surface the removal pipeline needs.
/// Logical contract names are resolved through the deployment's target map.
pub struct EthChain {
    provider: DynProvider,
    signer: Address,
    targets: BTreeMap<String, Address>,
}

impl EthChain {
    pub async fn connect(
        url: &str,
        signing: SignerSource,
        targets: BTreeMap<String, Address>,
    ) -> anyhow::Result<Self> {
        let (provider, signer) = match signing {
            SignerSource::PrivateKey(key) => {
                let signer: PrivateKeySigner =
                    key.trim_start_matches("0x").parse().context("invalid private key")?;
                let address = signer.address();
                let provider = ProviderBuilder::new()
                    .wallet(EthereumWallet::from(signer))
                    .connect(url)
                    .await
                    .context("failed to connect provider")?
                    .erased();
                (provider, address)
            }
            SignerSource::Account(address) => {
                let provider = ProviderBuilder::new()
                    .connect(url)
                    .await
                    .context("failed to connect provider")?
                    .erased();
                (provider, address)
            }
            SignerSource::NodeDefault => {
                let provider = ProviderBuilder::new()
                    .connect(url)
                    .await
                    .context("failed to connect provider")?
                    .erased();
                let accounts = provider
                    .get_accounts()
                    .await
                    .context("failed to list node accounts")?;
                let address = *accounts.first().ok_or(ChainError::NoSigner)?;
                (provider, address)
            }
            SignerSource::ReadOnly => {
                let provider = ProviderBuilder::new()
                    .connect(url)
                    .await
                    .context("failed to connect provider")?
                    .erased();
                (provider, Address::ZERO)
            }
        };
        Ok(Self {
            provider,
            signer,
            targets,
        })
    }

    fn address_of(&self, contract: &str) -> Result<Address, ChainError> {
        self.targets
            .get(contract)
            .copied()
            .ok_or_else(|| ChainError::UnknownContract(contract.to_string()))
    }

    async fn call_raw(&self, to: Address, data: Bytes, label: &str) -> Result<Bytes, ChainError> {
        let tx = TransactionRequest::default().with_to(to).with_input(data);
        self.provider
            .call(tx)
            .await
            .map_err(|e| ChainError::Rpc(format!("{label}: {e}")))
    }

    async fn call_word(&self, call: &ContractCall) -> Result<[u8; 32], ChainError> {
        let to = self.address_of(&call.contract)?;
        let data = self.call_raw(to, call.calldata(), &call.label()).await?;
        first_word(&data, &call.label())
    }
}

fn first_word(data: &[u8], label: &str) -> Result<[u8; 32], ChainError> {
    if data.len() < 32 {
        return Err(ChainError::Decode {
            call: label.to_string(),
            detail: format!("expected at least 32 bytes, got {}", data.len()),
        });
    }
    let mut word = [0u8; 32];
    word.copy_from_slice(&data[..32]);
    Ok(word)
}

#[async_trait]
impl ChainClient for EthChain {
    fn signer(&self) -> Address {
        self.signer
    }

    async fn owner_of(&self, contract: &str) -> Result<Address, ChainError> {
        self.read_address(&ContractCall::no_arg(contract, "owner"))
            .await
    }

    async fn read_address(&self, call: &ContractCall) -> Result<Address, ChainError> {
        let word = self.call_word(call).await?;
        Ok(Address::from_slice(&word[12..]))
    }

    async fn read_uint(&self, call: &ContractCall) -> Result<U256, ChainError> {
        let word = self.call_word(call).await?;
        Ok(U256::from_be_bytes(word))
    }

    async fn read_bool(&self, call: &ContractCall) -> Result<bool, ChainError> {
        let word = self.call_word(call).await?;
        Ok(word.iter().any(|b| *b != 0))
    }

    async fn submit(&self, call: &ContractCall, gas: &GasParams) -> Result<B256, ChainError> {
        let to = self.address_of(&call.contract)?;
        let label = call.label();
        let tx = TransactionRequest::default()
            .with_from(self.signer)
            .with_to(to)
            .with_input(call.calldata())
            .with_max_fee_per_gas(gas.max_fee_per_gas)
            .with_max_priority_fee_per_gas(gas.max_priority_fee_per_gas)
            .with_gas_limit(gas.gas_limit);
        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ChainError::Rpc(format!("{label}: {e}")))?;
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| ChainError::Rpc(format!("{label}: {e}")))?;
        if !receipt.status() {
            return Err(ChainError::Reverted {
                hash: receipt.transaction_hash,
            });
        }
        Ok(receipt.transaction_hash)
    }

    async fn effective_value(
        &self,
        key: &AssetKey,
        amount: U256,
        quote: &AssetKey,
    ) -> Result<U256, ChainError> {
        let to = self.address_of("ExchangeRates")?;
        let label = format!("ExchangeRates.effectiveValue({key}, {amount}, {quote})");
        let mut data = keccak256(b"effectiveValue(bytes32,uint256,bytes32)")[..4].to_vec();
        data.extend_from_slice(key.to_bytes32().as_slice());
        data.extend_from_slice(&amount.to_be_bytes::<32>());
        data.extend_from_slice(quote.to_bytes32().as_slice());
        let out = self.call_raw(to, Bytes::from(data), &label).await?;
        let word = first_word(&out, &label)?;
        Ok(U256::from_be_bytes(word))
    }
}
