//! Account and storage state used by the state test runner.
//!
//! [`StateStore`] is the interface the execution engine works against and
//! [`InMemoryStore`] is the implementation every subtest starts from.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod account;
mod dump;
mod in_memory;
pub mod merkle_trie;
mod store;

pub use account::StoreAccount;
pub use dump::{DumpAccount, StateDump};
pub use in_memory::InMemoryStore;
pub use merkle_trie::{log_rlp_hash, state_merkle_trie_root, storage_root, KeccakHasher};
pub use store::{SnapshotId, StateStore};
