//! Read-only REVM database view over an external store.
//!
//! The engine reads through this adapter and keeps every write in its own
//! journal. Nothing reaches the store until the harness materializes the
//! resulting storage cache.

use alloy_primitives::{Address, B256, KECCAK256_EMPTY, U256};
use evmrun_store::{StoreRead, decode_word};
use revm::{bytecode::Bytecode, database_interface::DatabaseRef, state::AccountInfo};

use crate::{DatabaseError, ExecutionContext};

/// Nonce reported for any account that carries code.
const CONTRACT_NONCE: u64 = 1;

/// Adapter exposing a [`StoreRead`] plus the context of one invocation to REVM.
///
/// The executing contract is served from the context, so its code does not
/// have to be deployed in the store beforehand. Other contracts are resolved
/// through the store's contracts table.
///
/// The store holds no balances. The origin and the message caller are
/// reported with enough balance to cover `gas_limit * gas_price + value`, so
/// the configured price and value reach the contract.
#[derive(Debug)]
pub struct StoreAdapter<'a, S> {
    store: &'a S,
    context: &'a ExecutionContext,
    funding: U256,
}

impl<'a, S: StoreRead> StoreAdapter<'a, S> {
    /// Wrap `store` for an invocation described by `context`.
    pub fn new(store: &'a S, context: &'a ExecutionContext) -> Self {
        let funding = U256::from(context.transaction.gas_limit)
            .saturating_mul(context.transaction.gas_price)
            .saturating_add(context.message.value);
        Self { store, context, funding }
    }

    /// Balance granted to the origin and the message caller.
    pub const fn funding(&self) -> U256 {
        self.funding
    }

    fn is_sender(&self, address: &Address) -> bool {
        *address == self.context.transaction.origin || *address == self.context.message.caller
    }

    fn load_code(&self, address: &Address) -> Result<Option<(B256, Bytecode)>, DatabaseError> {
        let contract = &self.context.contract;
        if *address == contract.namespace {
            let code = Bytecode::new_raw(contract.code.clone());
            return Ok(Some((contract.hash, code)));
        }
        let code = self.store.get_code(address).map_err(|e| DatabaseError::Store(e.to_string()))?;
        Ok(code.filter(|c| !c.is_empty()).map(|c| {
            let hash = crate::code_hash(&c);
            (hash, Bytecode::new_raw(c))
        }))
    }
}

impl<S: StoreRead> DatabaseRef for StoreAdapter<'_, S> {
    type Error = DatabaseError;

    fn basic_ref(&self, address: Address) -> Result<Option<AccountInfo>, Self::Error> {
        if let Some((hash, code)) = self.load_code(&address)? {
            return Ok(Some(AccountInfo::new(U256::ZERO, CONTRACT_NONCE, hash, code)));
        }
        if self.funding.is_zero() || !self.is_sender(&address) {
            return Ok(None);
        }
        Ok(Some(AccountInfo::new(self.funding, 0, KECCAK256_EMPTY, Bytecode::default())))
    }

    fn code_by_hash_ref(&self, code_hash: B256) -> Result<Bytecode, Self::Error> {
        if code_hash == KECCAK256_EMPTY || code_hash == B256::ZERO {
            return Ok(Bytecode::default());
        }
        let contract = &self.context.contract;
        if code_hash == contract.hash {
            return Ok(Bytecode::new_raw(contract.code.clone()));
        }
        Err(DatabaseError::CodeNotFound(code_hash))
    }

    fn storage_ref(&self, address: Address, index: U256) -> Result<U256, Self::Error> {
        match self.store.get(&address, &index).map_err(|e| DatabaseError::Store(e.to_string()))? {
            Some(raw) => Ok(decode_word(&address, &index, &raw)?),
            None => Ok(U256::ZERO),
        }
    }

    // Only the parent block is known; every other number reads as zero.
    fn block_hash_ref(&self, number: u64) -> Result<B256, Self::Error> {
        let block = &self.context.block;
        if block.number.checked_sub(1) == Some(number) {
            return Ok(block.hash);
        }
        Ok(B256::ZERO)
    }
}
