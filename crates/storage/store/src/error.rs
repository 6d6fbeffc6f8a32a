//! Error types for the external store.

use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Error type for store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A stored value does not fit in a 256-bit word.
    #[error("value at {namespace}/{slot} is {len} bytes wide, exceeds 32")]
    ValueTooWide {
        /// Namespace of the offending slot.
        namespace: Address,
        /// Slot index.
        slot: U256,
        /// Width of the stored value.
        len: usize,
    },
}
