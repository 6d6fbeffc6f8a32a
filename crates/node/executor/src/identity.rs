//! Contract namespace and caller derivation.

use alloy_primitives::{Address, B256, keccak256};
use evmrun_config::NamespaceScheme;

use crate::IdentityError;

/// Derives the namespace a contract's code and storage live under.
///
/// Implementations must be deterministic: the same code always maps to the
/// same namespace, otherwise state written by one invocation is invisible to
/// the next.
pub trait NamespaceDerivation {
    /// Derive the namespace for `code`, whose hash is `code_hash`.
    fn derive(&self, code: &[u8], code_hash: B256) -> Address;
}

/// Places every contract at one configured address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedNamespace(pub Address);

impl NamespaceDerivation for FixedNamespace {
    fn derive(&self, _code: &[u8], _code_hash: B256) -> Address {
        self.0
    }
}

/// Uses the low 20 bytes of the code hash as the namespace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CodeHashNamespace;

impl NamespaceDerivation for CodeHashNamespace {
    fn derive(&self, _code: &[u8], code_hash: B256) -> Address {
        Address::from_word(code_hash)
    }
}

impl NamespaceDerivation for NamespaceScheme {
    fn derive(&self, code: &[u8], code_hash: B256) -> Address {
        match self {
            Self::Fixed { address } => FixedNamespace(*address).derive(code, code_hash),
            Self::CodeHash => CodeHashNamespace.derive(code, code_hash),
        }
    }
}

/// Keccak-256 content hash of contract code.
pub fn code_hash(code: &[u8]) -> B256 {
    keccak256(code)
}

/// Interpret raw caller bytes as an address.
///
/// The bytes are right-aligned into a 32-byte word and the low 20 bytes are
/// taken, so shorter inputs are zero-padded on the left.
pub fn derive_caller(raw: &[u8]) -> Result<Address, IdentityError> {
    if raw.len() > 20 {
        return Err(IdentityError::CallerTooLong(raw.len()));
    }
    let mut word = B256::ZERO;
    word[32 - raw.len()..].copy_from_slice(raw);
    Ok(Address::from_word(word))
}
