//! Chain, block and transaction parameters for an invocation.

use alloy_primitives::{Address, B256, U256, address};
use serde::{Deserialize, Serialize};

/// Default chain ID.
pub const DEFAULT_CHAIN_ID: u64 = 9599;

/// Default block beneficiary.
pub const DEFAULT_COINBASE: Address = address!("0x000000000000000000000000000000000000abcd");

/// Default gas limit, used for both the block and the transaction.
pub const DEFAULT_GAS_LIMIT: u64 = 0xff_ffff;

/// Default transaction origin.
pub const DEFAULT_ORIGIN: Address = address!("0x1c7cd2d37ffd63856a5bd56a9af1643f2bcf545f");

/// Default message caller when none is supplied.
pub const DEFAULT_CALLER: Address = address!("0x0000000000000000000000000000000000000001");

/// Chain-level parameters shared by every call built from this config.
///
/// These are stable across calls; only the timestamp, code and call data vary
/// per invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChainConfig {
    /// Chain ID exposed to the contract.
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Block beneficiary.
    #[serde(default = "default_coinbase")]
    pub coinbase: Address,

    /// Block number.
    #[serde(default)]
    pub block_number: u64,

    /// Block difficulty.
    #[serde(default)]
    pub difficulty: U256,

    /// Block gas limit.
    #[serde(default = "default_gas_limit")]
    pub block_gas_limit: u64,

    /// Block hash.
    #[serde(default)]
    pub block_hash: B256,

    /// Transaction origin.
    #[serde(default = "default_origin")]
    pub origin: Address,

    /// Transaction gas price.
    #[serde(default)]
    pub gas_price: U256,

    /// Transaction gas limit.
    #[serde(default = "default_gas_limit")]
    pub tx_gas_limit: u64,

    /// Value transferred with the message.
    #[serde(default)]
    pub value: U256,

    /// Caller used when the command line does not name one.
    #[serde(default = "default_caller")]
    pub caller: Address,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID,
            coinbase: DEFAULT_COINBASE,
            block_number: 0,
            difficulty: U256::ZERO,
            block_gas_limit: DEFAULT_GAS_LIMIT,
            block_hash: B256::ZERO,
            origin: DEFAULT_ORIGIN,
            gas_price: U256::ZERO,
            tx_gas_limit: DEFAULT_GAS_LIMIT,
            value: U256::ZERO,
            caller: DEFAULT_CALLER,
        }
    }
}

const fn default_chain_id() -> u64 {
    DEFAULT_CHAIN_ID
}

const fn default_coinbase() -> Address {
    DEFAULT_COINBASE
}

const fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

const fn default_origin() -> Address {
    DEFAULT_ORIGIN
}

const fn default_caller() -> Address {
    DEFAULT_CALLER
}
