//! Capability traits for the external store.
//!
//! An execution engine only ever sees a store through [`StoreRead`]. Writes go
//! through [`StoreWrite`] and are issued by the harness after an invocation has
//! returned, never by the engine mid-call.

use alloy_primitives::{Address, Bytes, U256};

use crate::StoreError;

/// Read access to contract storage and deployed code.
pub trait StoreRead {
    /// Error type for reads.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the raw value stored at `(namespace, slot)`.
    ///
    /// `None` means the slot was never written and reads as zero.
    fn get(&self, namespace: &Address, slot: &U256) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Read the code deployed under `namespace`.
    fn get_code(&self, namespace: &Address) -> Result<Option<Bytes>, Self::Error>;
}

/// Write access to contract storage and deployed code.
pub trait StoreWrite: StoreRead {
    /// Store `value` at `(namespace, slot)`, replacing any previous value.
    fn set(&mut self, namespace: Address, slot: U256, value: Vec<u8>) -> Result<(), Self::Error>;

    /// Deploy `code` under `namespace`, replacing any previous code.
    fn set_code(&mut self, namespace: Address, code: Bytes) -> Result<(), Self::Error>;
}

/// Canonical byte form of a storage word: big-endian with leading zeroes trimmed.
///
/// Zero encodes to the empty byte string.
pub fn encode_word(value: &U256) -> Vec<u8> {
    value.to_be_bytes_trimmed_vec()
}

/// Parse a raw stored value back into a word.
pub fn decode_word(namespace: &Address, slot: &U256, raw: &[u8]) -> Result<U256, StoreError> {
    U256::try_from_be_slice(raw).ok_or(StoreError::ValueTooWide {
        namespace: *namespace,
        slot: *slot,
        len: raw.len(),
    })
}
