//! Contains the run report printed after execution.

use std::fmt;

use alloy_primitives::{Address, hex};
use evmrun_executor::ExecutionResult;
use evmrun_store::MemStore;

/// Summary of every invocation plus the final store contents.
#[derive(Debug)]
pub(crate) struct RunReport {
    /// Namespace the code executed under.
    namespace: Address,
    /// Result of each invocation, in order.
    runs: Vec<ExecutionResult>,
    /// Final `(namespace, slot, raw value)` entries.
    entries: Vec<(Address, String, String)>,
}

impl RunReport {
    pub(crate) const fn new(namespace: Address) -> Self {
        Self { namespace, runs: Vec::new(), entries: Vec::new() }
    }

    pub(crate) fn push(&mut self, result: ExecutionResult) {
        self.runs.push(result);
    }

    pub(crate) fn runs(&self) -> &[ExecutionResult] {
        &self.runs
    }

    pub(crate) fn capture_store(&mut self, store: &MemStore) {
        self.entries = store
            .entries()
            .into_iter()
            .map(|(key, value)| {
                (key.namespace(), key.slot().to_string(), hex::encode_prefixed(value))
            })
            .collect();
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "namespace: {}", self.namespace)?;
        for (i, run) in self.runs().iter().enumerate() {
            writeln!(
                f,
                "run {}: status={} gas_used={} output={} writes={}",
                i + 1,
                run.status,
                run.gas_used,
                run.output,
                run.storage_cache.len()
            )?;
        }
        write!(f, "storage entries: {}", self.entries.len())?;
        for (namespace, slot, value) in &self.entries {
            write!(f, "\n  {namespace} [{slot}] = {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::U256;
    use evmrun_store::StoreWrite;

    use super::*;

    #[test]
    fn display_lists_runs_and_entries() {
        let namespace = Address::with_last_byte(0x42);
        let mut store = MemStore::new();
        store.set(namespace, U256::ZERO, vec![0x0a]).unwrap();

        let mut report = RunReport::new(namespace);
        report.push(ExecutionResult::no_code());
        report.capture_store(&store);

        let text = report.to_string();
        assert!(text.contains("run 1: status=no code gas_used=0"));
        assert!(text.contains("storage entries: 1"));
        assert!(text.contains("[0] = 0x0a"));
    }
}
