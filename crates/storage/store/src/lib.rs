#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod cache;
pub use cache::{StorageCache, materialize};

mod error;
pub use error::StoreError;

mod key;
pub use key::StorageKey;

mod memory;
pub use memory::MemStore;

mod traits;
pub use traits::{StoreRead, StoreWrite, decode_word, encode_word};
