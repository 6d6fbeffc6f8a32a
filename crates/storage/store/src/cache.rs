//! Write-set produced by an invocation and its merge into a store.

use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};
use tracing::debug;

use crate::{StoreWrite, encode_word};

/// Storage writes produced by one execution, keyed by namespace then slot.
///
/// Writes stay here until [`materialize`] commits them, so a store never
/// observes a partially applied invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StorageCache {
    /// Written values per namespace.
    pub cached_data: BTreeMap<Address, BTreeMap<U256, U256>>,
}

impl StorageCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a write.
    pub fn insert(&mut self, namespace: Address, slot: U256, value: U256) {
        self.cached_data.entry(namespace).or_default().insert(slot, value);
    }

    /// Look up a cached write.
    pub fn get(&self, namespace: &Address, slot: &U256) -> Option<&U256> {
        self.cached_data.get(namespace).and_then(|slots| slots.get(slot))
    }

    /// Total number of cached slot writes across all namespaces.
    pub fn len(&self) -> usize {
        self.cached_data.values().map(BTreeMap::len).sum()
    }

    /// Whether no writes were cached.
    pub fn is_empty(&self) -> bool {
        self.cached_data.values().all(BTreeMap::is_empty)
    }

    /// Iterate over every `(namespace, slot, value)` triple.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &U256, &U256)> {
        self.cached_data
            .iter()
            .flat_map(|(namespace, slots)| slots.iter().map(move |(slot, v)| (namespace, slot, v)))
    }
}

/// Commit every cached write into `store`.
///
/// Overwrites are unconditional and a written zero is stored as the empty
/// byte string rather than deleting the slot. Returns the number of slots
/// written.
pub fn materialize<W: StoreWrite>(cache: &StorageCache, store: &mut W) -> Result<usize, W::Error> {
    let mut written = 0;
    for (namespace, slot, value) in cache.iter() {
        store.set(*namespace, *slot, encode_word(value))?;
        written += 1;
    }
    debug!(written, "materialized storage cache");
    Ok(written)
}
