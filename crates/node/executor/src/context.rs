//! Execution context construction.

use std::time::{SystemTime, UNIX_EPOCH};

use alloy_primitives::{Address, B256, Bytes, U256};
use evmrun_config::ChainConfig;

use crate::{NamespaceDerivation, code_hash};

/// Block the call executes in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockInfo {
    /// Chain ID.
    pub chain_id: u64,
    /// Block beneficiary.
    pub coinbase: Address,
    /// Block timestamp in seconds.
    pub timestamp: u64,
    /// Block number.
    pub number: u64,
    /// Block difficulty.
    pub difficulty: U256,
    /// Block gas limit.
    pub gas_limit: u64,
    /// Block hash.
    pub hash: B256,
}

/// Transaction wrapping the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxInfo {
    /// Transaction origin.
    pub origin: Address,
    /// Gas price.
    pub gas_price: U256,
    /// Gas limit.
    pub gas_limit: u64,
}

/// The message delivered to the contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Immediate caller.
    pub caller: Address,
    /// Value transferred.
    pub value: U256,
    /// Call data.
    pub data: Bytes,
}

/// The contract being executed.
///
/// `hash` is always `keccak256(code)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contract {
    /// Namespace the contract's code and storage live under.
    pub namespace: Address,
    /// Executable bytecode.
    pub code: Bytes,
    /// Content hash of `code`.
    pub hash: B256,
}

impl Contract {
    /// Create a contract, hashing its code.
    pub fn new(namespace: Address, code: Bytes) -> Self {
        let hash = code_hash(&code);
        Self { namespace, code, hash }
    }
}

/// Everything the engine needs to run one call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Block parameters.
    pub block: BlockInfo,
    /// Transaction parameters.
    pub transaction: TxInfo,
    /// Message parameters.
    pub message: Message,
    /// Contract under execution.
    pub contract: Contract,
}

/// Builds [`ExecutionContext`]s from stable chain parameters.
///
/// Chain-level fields come from a [`ChainConfig`] and are reused for every
/// call. Code, call data, caller and timestamp vary per call.
#[derive(Clone, Debug)]
pub struct ContextBuilder<N> {
    chain: ChainConfig,
    derivation: N,
    timestamp: Option<u64>,
}

impl<N: NamespaceDerivation> ContextBuilder<N> {
    /// Create a builder over `chain` using `derivation` for namespaces.
    pub const fn new(chain: ChainConfig, derivation: N) -> Self {
        Self { chain, derivation, timestamp: None }
    }

    /// Pin the block timestamp instead of reading the system clock.
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// The chain parameters this builder uses.
    pub const fn chain(&self) -> &ChainConfig {
        &self.chain
    }

    /// Namespace `code` will execute under.
    pub fn namespace(&self, code: &[u8]) -> Address {
        self.derivation.derive(code, code_hash(code))
    }

    /// Assemble a context for one call.
    pub fn build(&self, code: Bytes, call_data: Bytes, caller: Address) -> ExecutionContext {
        let hash = code_hash(&code);
        let namespace = self.derivation.derive(&code, hash);
        let timestamp = self.timestamp.unwrap_or_else(now_secs);

        ExecutionContext {
            block: BlockInfo {
                chain_id: self.chain.chain_id,
                coinbase: self.chain.coinbase,
                timestamp,
                number: self.chain.block_number,
                difficulty: self.chain.difficulty,
                gas_limit: self.chain.block_gas_limit,
                hash: self.chain.block_hash,
            },
            transaction: TxInfo {
                origin: self.chain.origin,
                gas_price: self.chain.gas_price,
                gas_limit: self.chain.tx_gas_limit,
            },
            message: Message { caller, value: self.chain.value, data: call_data },
            contract: Contract { namespace, code, hash },
        }
    }
}

fn now_secs() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default()
}
