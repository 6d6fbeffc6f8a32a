#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod chain;
pub use chain::{
    ChainConfig, DEFAULT_CALLER, DEFAULT_CHAIN_ID, DEFAULT_COINBASE, DEFAULT_GAS_LIMIT,
    DEFAULT_ORIGIN,
};

mod error;
pub use error::ConfigError;

mod execution;
pub use execution::{
    DEFAULT_MAX_STACK_DEPTH, DEFAULT_NAMESPACE, ExecutionConfig, GasSchedule, NamespaceScheme,
};

mod harness;
pub use harness::HarnessConfig;
