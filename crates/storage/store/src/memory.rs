//! In-memory external store.

use std::{collections::HashMap, convert::Infallible};

use alloy_primitives::{Address, Bytes, U256};

use crate::{StorageKey, StoreRead, StoreWrite};

/// In-memory key-value store standing in for world state.
///
/// Holds two tables: storage, keyed by [`StorageKey`], and contracts, keyed by
/// namespace. Lives for one process run and is never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemStore {
    /// Raw slot values keyed by `namespace ++ slot`.
    storage: HashMap<StorageKey, Vec<u8>>,
    /// Deployed code keyed by namespace.
    contracts: HashMap<Address, Bytes>,
}

impl MemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of storage entries.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the storage table is empty.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Number of deployed contracts.
    pub fn contract_count(&self) -> usize {
        self.contracts.len()
    }

    /// All storage entries, ordered by key.
    pub fn entries(&self) -> Vec<(StorageKey, &[u8])> {
        let mut entries: Vec<_> =
            self.storage.iter().map(|(k, v)| (*k, v.as_slice())).collect();
        entries.sort_by_key(|(k, _)| *k);
        entries
    }
}

impl StoreRead for MemStore {
    type Error = Infallible;

    fn get(&self, namespace: &Address, slot: &U256) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.storage.get(&StorageKey::new(*namespace, *slot)).cloned())
    }

    fn get_code(&self, namespace: &Address) -> Result<Option<Bytes>, Self::Error> {
        Ok(self.contracts.get(namespace).cloned())
    }
}

impl StoreWrite for MemStore {
    fn set(&mut self, namespace: Address, slot: U256, value: Vec<u8>) -> Result<(), Self::Error> {
        self.storage.insert(StorageKey::new(namespace, slot), value);
        Ok(())
    }

    fn set_code(&mut self, namespace: Address, code: Bytes) -> Result<(), Self::Error> {
        self.contracts.insert(namespace, code);
        Ok(())
    }
}
