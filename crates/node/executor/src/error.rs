//! Error types for context construction and execution.

use alloy_primitives::B256;
use evmrun_store::StoreError;
use thiserror::Error;

/// Malformed identity input.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Caller bytes do not fit in an address.
    #[error("caller is {0} bytes, at most 20 allowed")]
    CallerTooLong(usize),
}

/// Harness-side failure that prevents an invocation from starting.
///
/// Faults raised by the engine while running are not errors at this level;
/// they are reported through [`crate::ExecutionStatus`].
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The engine cannot honor the requested stack-depth bound.
    #[error("stack depth bound {requested} is tighter than the engine limit {engine}")]
    UnsupportedStackDepth {
        /// Requested bound.
        requested: usize,
        /// Engine's fixed limit.
        engine: usize,
    },

    /// The transaction environment could not be assembled.
    #[error("failed to build transaction env: {0}")]
    TxBuild(String),

    /// Identity derivation failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// Writing code or the storage cache back to the store failed.
    #[error("store write failed: {0}")]
    Store(String),
}

/// Error surfaced to the engine by the store adapter.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Backing store failed.
    #[error("store error: {0}")]
    Store(String),

    /// A stored slot value could not be decoded.
    #[error(transparent)]
    Value(#[from] StoreError),

    /// Code not found for hash.
    #[error("code not found: {0}")]
    CodeNotFound(B256),
}

impl revm::database_interface::DBErrorMarker for DatabaseError {}
