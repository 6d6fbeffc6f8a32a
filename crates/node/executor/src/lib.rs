#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod adapter;
pub use adapter::StoreAdapter;

mod context;
pub use context::{BlockInfo, Contract, ContextBuilder, ExecutionContext, Message, TxInfo};

mod engine;
pub use engine::{ENGINE_STACK_LIMIT, Engine, ExecutionParams, spec_id};

mod error;
pub use error::{DatabaseError, ExecutionError, IdentityError};

mod harness;
pub use harness::Harness;

mod identity;
pub use identity::{CodeHashNamespace, FixedNamespace, NamespaceDerivation, code_hash, derive_caller};

mod outcome;
pub use outcome::{ExecutionResult, ExecutionStatus};
