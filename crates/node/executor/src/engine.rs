//! REVM-backed execution engine.

use std::sync::OnceLock;

use alloy_primitives::{Address, B256, U256};
use evmrun_config::GasSchedule;
use evmrun_store::{StorageCache, StoreRead};
use revm::{
    Context, InspectEvm, Inspector, Journal, MainBuilder,
    context::{BlockEnv, CfgEnv, TxEnv, result::ExecutionResult as EvmResult},
    database::CacheDB,
    interpreter::{CallInputs, CallOutcome},
    primitives::{TxKind, hardfork::SpecId},
    state::EvmState,
};
use tracing::{debug, info, warn};

use crate::{ExecutionContext, ExecutionError, ExecutionResult, ExecutionStatus, StoreAdapter};

/// Stack depth the engine enforces. It cannot be lowered per call.
pub const ENGINE_STACK_LIMIT: usize = 1024;

static ENGINE: OnceLock<Engine> = OnceLock::new();

/// Parameters for one invocation.
#[derive(Clone, Copy, Debug)]
pub struct ExecutionParams<'a> {
    /// Context to execute in.
    pub context: &'a ExecutionContext,
    /// Maximum stack depth the caller allows.
    pub max_stack_depth: usize,
    /// Gas-cost schedule.
    pub gas_schedule: GasSchedule,
}

/// Handle to the process-wide execution engine.
///
/// The only way to obtain one is [`Engine::load`], so every invocation is
/// preceded by initialization.
#[derive(Debug)]
pub struct Engine {
    stack_limit: usize,
}

impl Engine {
    /// Initialize the engine.
    ///
    /// Initialization runs once per process; later calls return the same
    /// handle.
    pub fn load() -> &'static Self {
        ENGINE.get_or_init(|| {
            info!(stack_limit = ENGINE_STACK_LIMIT, "execution engine loaded");
            Self { stack_limit: ENGINE_STACK_LIMIT }
        })
    }

    /// Stack depth the engine enforces.
    pub const fn stack_limit(&self) -> usize {
        self.stack_limit
    }

    /// Run the contract in `params.context` against `store`.
    ///
    /// The store is only read. Writes are returned in the result's storage
    /// cache for the caller to materialize. Engine faults are reported in the
    /// result status; `Err` means the call never started.
    pub fn execute<S: StoreRead>(
        &self,
        params: ExecutionParams<'_>,
        store: &S,
    ) -> Result<ExecutionResult, ExecutionError> {
        if params.max_stack_depth < self.stack_limit {
            return Err(ExecutionError::UnsupportedStackDepth {
                requested: params.max_stack_depth,
                engine: self.stack_limit,
            });
        }

        let context = params.context;
        if context.contract.code.is_empty() {
            debug!(namespace = %context.contract.namespace, "contract has no code, skipping engine");
            return Ok(ExecutionResult::no_code());
        }

        let tx_env = build_tx_env(context)?;
        let db = CacheDB::new(StoreAdapter::new(store, context));

        type Db<'a, S> = CacheDB<StoreAdapter<'a, S>>;
        let ctx: Context<BlockEnv, TxEnv, CfgEnv, Db<'_, S>, Journal<Db<'_, S>>, ()> =
            Context::new(db, spec_id(params.gas_schedule));
        let ctx = ctx
            .modify_cfg_chained(|cfg| {
                cfg.chain_id = context.block.chain_id;
            })
            .modify_block_chained(|blk: &mut BlockEnv| {
                blk.number = U256::from(context.block.number);
                blk.timestamp = U256::from(context.block.timestamp);
                blk.beneficiary = context.block.coinbase;
                blk.gas_limit = context.block.gas_limit;
                blk.difficulty = context.block.difficulty;
                blk.prevrandao = Some(B256::from(context.block.difficulty));
            });

        let mut evm = ctx.build_mainnet_with_inspector(MessageCaller::new(context.message.caller));

        debug!(
            namespace = %context.contract.namespace,
            code_hash = %context.contract.hash,
            origin = %context.transaction.origin,
            caller = %context.message.caller,
            schedule = ?params.gas_schedule,
            "invoking engine"
        );

        let outcome = match evm.inspect_tx(tx_env) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = ?e, "engine rejected invocation");
                return Ok(ExecutionResult::fault(format!("{e:?}")));
            }
        };

        let status = match &outcome.result {
            EvmResult::Success { .. } => ExecutionStatus::Success,
            EvmResult::Revert { .. } => ExecutionStatus::Revert,
            EvmResult::Halt { reason, .. } => ExecutionStatus::Halt(format!("{reason:?}")),
        };
        let result = ExecutionResult {
            gas_used: outcome.result.gas_used(),
            output: outcome.result.output().cloned().unwrap_or_default(),
            storage_cache: extract_writes(outcome.state),
            status,
        };

        debug!(
            status = %result.status,
            gas_used = result.gas_used,
            writes = result.storage_cache.len(),
            "engine returned"
        );
        Ok(result)
    }
}

/// Engine rule set for a gas schedule.
pub const fn spec_id(schedule: GasSchedule) -> SpecId {
    match schedule {
        GasSchedule::Frontier => SpecId::FRONTIER,
        GasSchedule::Homestead => SpecId::HOMESTEAD,
        GasSchedule::Byzantium => SpecId::BYZANTIUM,
        GasSchedule::Istanbul => SpecId::ISTANBUL,
        GasSchedule::Berlin => SpecId::BERLIN,
        GasSchedule::London => SpecId::LONDON,
        GasSchedule::Shanghai => SpecId::SHANGHAI,
        GasSchedule::Cancun => SpecId::CANCUN,
        GasSchedule::Prague => SpecId::PRAGUE,
    }
}

/// Substitutes the message caller on the outermost call frame.
///
/// The transaction is sent by the origin, which the engine reports through
/// ORIGIN. CALLER reads the frame's caller, so only the first frame is
/// rewritten; nested calls keep their real callers.
#[derive(Debug)]
struct MessageCaller {
    caller: Address,
    pending: bool,
}

impl MessageCaller {
    const fn new(caller: Address) -> Self {
        Self { caller, pending: true }
    }
}

impl<CTX> Inspector<CTX> for MessageCaller {
    fn call(&mut self, _context: &mut CTX, inputs: &mut CallInputs) -> Option<CallOutcome> {
        if std::mem::take(&mut self.pending) {
            inputs.caller = self.caller;
        }
        None
    }
}

/// Build the transaction env for a call into the context's contract.
///
/// The origin sends the transaction; the message caller is applied to the
/// outermost frame by [`MessageCaller`].
fn build_tx_env(context: &ExecutionContext) -> Result<TxEnv, ExecutionError> {
    TxEnv::builder()
        .caller(context.transaction.origin)
        .gas_limit(context.transaction.gas_limit)
        .gas_price(context.transaction.gas_price.saturating_to::<u128>())
        .value(context.message.value)
        .data(context.message.data.clone())
        .nonce(0)
        .chain_id(Some(context.block.chain_id))
        .kind(TxKind::Call(context.contract.namespace))
        .build()
        .map_err(|e| ExecutionError::TxBuild(format!("{e:?}")))
}

/// Collect changed storage slots of touched accounts.
fn extract_writes(state: EvmState) -> StorageCache {
    let mut cache = StorageCache::new();

    for (address, account) in state {
        if !account.is_touched() {
            continue;
        }
        for (slot, value) in account.storage {
            if value.is_changed() {
                cache.insert(address, slot, value.present_value());
            }
        }
    }

    cache
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Bytes, hex};
    use evmrun_config::{ChainConfig, NamespaceScheme};
    use evmrun_store::MemStore;
    use rstest::rstest;

    use revm::interpreter::{CallInput, CallScheme, CallValue};

    use super::*;
    use crate::ContextBuilder;

    fn context(code: &[u8]) -> ExecutionContext {
        ContextBuilder::new(ChainConfig::default(), NamespaceScheme::default())
            .with_timestamp(1)
            .build(Bytes::copy_from_slice(code), Bytes::new(), Address::with_last_byte(1))
    }

    fn params(context: &ExecutionContext) -> ExecutionParams<'_> {
        ExecutionParams {
            context,
            max_stack_depth: ENGINE_STACK_LIMIT,
            gas_schedule: GasSchedule::Cancun,
        }
    }

    #[test]
    fn load_returns_same_handle() {
        let a = Engine::load();
        let b = Engine::load();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.stack_limit(), ENGINE_STACK_LIMIT);
    }

    #[test]
    fn rejects_tighter_stack_bound() {
        let ctx = context(&hex!("00"));
        let mut params = params(&ctx);
        params.max_stack_depth = 16;

        let err = Engine::load().execute(params, &MemStore::new()).unwrap_err();
        assert!(matches!(
            err,
            ExecutionError::UnsupportedStackDepth { requested: 16, engine: ENGINE_STACK_LIMIT }
        ));
    }

    #[test]
    fn empty_code_is_no_code() {
        let ctx = context(&[]);
        let result = Engine::load().execute(params(&ctx), &MemStore::new()).unwrap();
        assert_eq!(result, ExecutionResult::no_code());
    }

    #[test]
    fn store_constant_produces_one_write() {
        let ctx = context(&hex!("600a600055"));
        let store = MemStore::new();

        let result = Engine::load().execute(params(&ctx), &store).unwrap();

        assert_eq!(result.status, ExecutionStatus::Success);
        assert_eq!(result.storage_cache.len(), 1);
        assert_eq!(
            result.storage_cache.get(&ctx.contract.namespace, &U256::ZERO),
            Some(&U256::from(10))
        );
        // the engine never writes through to the store
        assert!(store.is_empty());
    }

    #[test]
    fn revert_discards_writes() {
        // PUSH1 0x0a PUSH1 0 SSTORE PUSH1 0 PUSH1 0 REVERT
        let ctx = context(&hex!("600a60005560006000fd"));
        let result = Engine::load().execute(params(&ctx), &MemStore::new()).unwrap();

        assert_eq!(result.status, ExecutionStatus::Revert);
        assert!(result.storage_cache.is_empty());
    }

    #[test]
    fn invalid_opcode_halts() {
        let ctx = context(&hex!("fe"));
        let result = Engine::load().execute(params(&ctx), &MemStore::new()).unwrap();

        assert!(matches!(result.status, ExecutionStatus::Halt(_)));
        assert!(!result.is_success());
        assert!(result.storage_cache.is_empty());
    }

    #[test]
    fn returns_output_bytes() {
        // PUSH1 0x2a PUSH1 0 MSTORE PUSH1 32 PUSH1 0 RETURN
        let ctx = context(&hex!("602a60005260206000f3"));
        let result = Engine::load().execute(params(&ctx), &MemStore::new()).unwrap();

        assert_eq!(result.status, ExecutionStatus::Success);
        assert_eq!(U256::from_be_slice(&result.output), U256::from(42));
        assert!(result.gas_used > 21_000);
    }

    #[rstest]
    #[case(GasSchedule::Istanbul)]
    #[case(GasSchedule::London)]
    #[case(GasSchedule::Cancun)]
    #[case(GasSchedule::Prague)]
    fn store_constant_under_schedule(#[case] schedule: GasSchedule) {
        let ctx = context(&hex!("600a600055"));
        let params = ExecutionParams { gas_schedule: schedule, ..params(&ctx) };

        let result = Engine::load().execute(params, &MemStore::new()).unwrap();
        assert_eq!(result.status, ExecutionStatus::Success);
        assert_eq!(result.storage_cache.len(), 1);
    }

    #[test]
    fn message_caller_rewrites_first_frame_only() {
        let caller = Address::repeat_byte(0x0c);
        let mut inspector = MessageCaller::new(caller);
        let mut inputs = CallInputs {
            input: CallInput::default(),
            return_memory_offset: 0..0,
            gas_limit: 100_000,
            bytecode_address: Address::repeat_byte(0x11),
            target_address: Address::repeat_byte(0x11),
            caller: Address::repeat_byte(0x0a),
            value: CallValue::Transfer(U256::ZERO),
            scheme: CallScheme::Call,
            is_static: false,
        };

        let outcome = <MessageCaller as Inspector<()>>::call(&mut inspector, &mut (), &mut inputs);
        assert!(outcome.is_none());
        assert_eq!(inputs.caller, caller);

        let nested = Address::repeat_byte(0x11);
        inputs.caller = nested;
        <MessageCaller as Inspector<()>>::call(&mut inspector, &mut (), &mut inputs);
        assert_eq!(inputs.caller, nested);
    }

    #[test]
    fn origin_and_caller_reach_contract_separately() {
        // ORIGIN PUSH1 0 SSTORE CALLER PUSH1 1 SSTORE STOP
        let ctx = context(&hex!("326000553360015500"));
        let result = Engine::load().execute(params(&ctx), &MemStore::new()).unwrap();

        assert_eq!(result.status, ExecutionStatus::Success);
        let namespace = ctx.contract.namespace;
        let as_word = |a: Address| U256::from_be_slice(a.as_slice());
        assert_eq!(
            result.storage_cache.get(&namespace, &U256::ZERO),
            Some(&as_word(ctx.transaction.origin))
        );
        assert_eq!(
            result.storage_cache.get(&namespace, &U256::from(1)),
            Some(&as_word(ctx.message.caller))
        );
    }

    #[test]
    fn extract_writes_empty_state() {
        assert!(extract_writes(EvmState::default()).is_empty());
    }

    #[test]
    fn spec_id_follows_schedule() {
        assert_eq!(spec_id(GasSchedule::Cancun), SpecId::CANCUN);
        assert_eq!(spec_id(GasSchedule::Frontier), SpecId::FRONTIER);
    }
}
