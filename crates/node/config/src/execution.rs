//! Execution configuration.

use alloy_primitives::{Address, address};
use serde::{Deserialize, Serialize};

/// Default maximum stack depth handed to the engine.
pub const DEFAULT_MAX_STACK_DEPTH: usize = 1024;

/// Namespace assigned to every contract under the fixed scheme.
pub const DEFAULT_NAMESPACE: Address = address!("0x0000000000000000000000007265636569766572");

/// Gas-cost schedule, named by the hardfork that introduced it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GasSchedule {
    /// Frontier.
    Frontier,
    /// Homestead.
    Homestead,
    /// Byzantium.
    Byzantium,
    /// Istanbul.
    Istanbul,
    /// Berlin.
    Berlin,
    /// London.
    London,
    /// Shanghai.
    Shanghai,
    /// Cancun.
    #[default]
    Cancun,
    /// Prague.
    Prague,
}

/// How a contract's namespace is derived from its code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "scheme", rename_all = "kebab-case")]
pub enum NamespaceScheme {
    /// Every contract lives at the same address.
    ///
    /// Distinct contracts collide in the store under this scheme.
    Fixed {
        /// The shared namespace.
        address: Address,
    },
    /// The namespace is the low 20 bytes of `keccak256(code)`.
    CodeHash,
}

impl Default for NamespaceScheme {
    fn default() -> Self {
        Self::Fixed { address: DEFAULT_NAMESPACE }
    }
}

/// Execution layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Maximum stack depth the engine may use.
    #[serde(default = "default_max_stack_depth")]
    pub max_stack_depth: usize,

    /// Gas-cost schedule.
    #[serde(default)]
    pub gas_schedule: GasSchedule,

    /// Namespace derivation scheme.
    #[serde(default)]
    pub namespace: NamespaceScheme,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
            gas_schedule: GasSchedule::default(),
            namespace: NamespaceScheme::default(),
        }
    }
}

const fn default_max_stack_depth() -> usize {
    DEFAULT_MAX_STACK_DEPTH
}
