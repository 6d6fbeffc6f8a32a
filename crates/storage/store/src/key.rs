//! Composite storage keys.

use alloy_primitives::{Address, U256};

/// Key into the storage table: a namespace followed by a big-endian slot index.
///
/// Keys are unique per `(namespace, slot)` pair. Two contracts that share a
/// namespace share storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey([u8; Self::SIZE]);

impl StorageKey {
    /// Encoded size: 20 byte namespace + 32 byte slot.
    pub const SIZE: usize = 52;

    /// Concatenate a namespace and a slot into a key.
    pub fn new(namespace: Address, slot: U256) -> Self {
        let mut out = [0u8; Self::SIZE];
        out[..20].copy_from_slice(namespace.as_slice());
        out[20..].copy_from_slice(&slot.to_be_bytes::<32>());
        Self(out)
    }

    /// The namespace half of the key.
    pub fn namespace(&self) -> Address {
        Address::from_slice(&self.0[..20])
    }

    /// The slot half of the key.
    pub fn slot(&self) -> U256 {
        U256::from_be_slice(&self.0[20..])
    }
}
