//! End-to-end invocation against a store.

use alloy_primitives::{Address, Bytes};
use evmrun_config::{ExecutionConfig, HarnessConfig, NamespaceScheme};
use evmrun_store::{MemStore, StoreWrite, materialize};
use tracing::{debug, info};

use crate::{
    ContextBuilder, Engine, ExecutionError, ExecutionParams, ExecutionResult, derive_caller,
};

/// Runs invocations against one store for the lifetime of a process.
///
/// Each [`Harness::invoke`] derives identities, builds a context, runs the
/// engine and materializes the storage cache, in that order. Writes from one
/// invocation are visible to the next.
#[derive(Debug)]
pub struct Harness<S = MemStore> {
    store: S,
    builder: ContextBuilder<NamespaceScheme>,
    execution: ExecutionConfig,
    engine: &'static Engine,
}

impl Harness<MemStore> {
    /// Create a harness over an empty in-memory store.
    pub fn new(config: HarnessConfig) -> Self {
        Self::with_store(config, MemStore::new())
    }
}

impl<S: StoreWrite> Harness<S> {
    /// Create a harness over an existing store.
    pub fn with_store(config: HarnessConfig, store: S) -> Self {
        let HarnessConfig { chain, execution } = config;
        Self {
            store,
            builder: ContextBuilder::new(chain, execution.namespace),
            execution,
            engine: Engine::load(),
        }
    }

    /// Pin the block timestamp of every future invocation.
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.builder = self.builder.with_timestamp(timestamp);
        self
    }

    /// The backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Namespace `code` executes under.
    pub fn namespace(&self, code: &[u8]) -> Address {
        self.builder.namespace(code)
    }

    /// The caller used when none is supplied.
    pub const fn default_caller(&self) -> Address {
        self.builder.chain().caller
    }

    /// Like [`Harness::invoke`], deriving the caller from raw bytes.
    ///
    /// Empty `caller` bytes select the configured default caller.
    pub fn invoke_raw(
        &mut self,
        code: Bytes,
        call_data: Bytes,
        caller: &[u8],
    ) -> Result<ExecutionResult, ExecutionError> {
        let caller =
            if caller.is_empty() { self.default_caller() } else { derive_caller(caller)? };
        self.invoke(code, call_data, caller)
    }

    /// Execute `code` with `call_data` from `caller` and commit its writes.
    ///
    /// The code is registered under its namespace and the storage cache is
    /// materialized whatever the execution status. Nothing is written when
    /// the call never starts.
    pub fn invoke(
        &mut self,
        code: Bytes,
        call_data: Bytes,
        caller: Address,
    ) -> Result<ExecutionResult, ExecutionError> {
        let context = self.builder.build(code, call_data, caller);

        let params = ExecutionParams {
            context: &context,
            max_stack_depth: self.execution.max_stack_depth,
            gas_schedule: self.execution.gas_schedule,
        };
        let result = self.engine.execute(params, &self.store)?;

        if !context.contract.code.is_empty() {
            self.store
                .set_code(context.contract.namespace, context.contract.code.clone())
                .map_err(|e| ExecutionError::Store(e.to_string()))?;
        }
        let written = materialize(&result.storage_cache, &mut self.store)
            .map_err(|e| ExecutionError::Store(e.to_string()))?;

        info!(
            namespace = %context.contract.namespace,
            status = %result.status,
            gas_used = result.gas_used,
            written,
            "invocation complete"
        );
        if !result.is_success() {
            debug!(output = %result.output, "invocation did not complete successfully");
        }
        Ok(result)
    }
}
