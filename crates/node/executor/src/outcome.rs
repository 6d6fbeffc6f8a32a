//! Result of one invocation.

use std::fmt;

use alloy_primitives::Bytes;
use evmrun_store::StorageCache;

/// How an invocation ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// Execution completed normally.
    Success,
    /// The contract reverted.
    Revert,
    /// The engine halted the call, e.g. out of gas or an invalid opcode.
    Halt(String),
    /// The contract had no code, so nothing ran.
    NoCode,
    /// The engine rejected the call before running it, or a store read failed.
    Fault(String),
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Revert => f.write_str("revert"),
            Self::Halt(reason) => write!(f, "halt: {reason}"),
            Self::NoCode => f.write_str("no code"),
            Self::Fault(err) => write!(f, "fault: {err}"),
        }
    }
}

/// Outcome of an invocation.
///
/// The storage cache is populated whatever the status; it is simply empty
/// when the engine rolled everything back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Final status.
    pub status: ExecutionStatus,
    /// Gas consumed.
    pub gas_used: u64,
    /// Bytes returned by the call.
    pub output: Bytes,
    /// Storage writes, not yet committed to any store.
    pub storage_cache: StorageCache,
}

impl ExecutionResult {
    /// Result for a call whose contract has no code.
    pub fn no_code() -> Self {
        Self {
            status: ExecutionStatus::NoCode,
            gas_used: 0,
            output: Bytes::new(),
            storage_cache: StorageCache::new(),
        }
    }

    /// Result for a call the engine refused to run.
    pub fn fault(err: impl Into<String>) -> Self {
        Self {
            status: ExecutionStatus::Fault(err.into()),
            gas_used: 0,
            output: Bytes::new(),
            storage_cache: StorageCache::new(),
        }
    }

    /// Whether the call completed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self.status, ExecutionStatus::Success | ExecutionStatus::NoCode)
    }
}
