//! scdll-core: Sorted circular doubly-linked list stored in account storage
//!
//! This crate implements a gas-metered precompile that keeps one or more
//! sorted lists of `uint256` keys inside the storage of the calling account.
//! Every list is addressed by a caller-chosen 32-byte `pointer`; every node
//! is addressed by its key (`index`).
//!
//! ## Storage Layout
//!
//! Nothing is stored contiguously. Each cell lives at a keccak-derived slot:
//!
//! | Cell | Slot |
//! |------|------|
//! | size | `keccak256(owner32 ‖ pointer ‖ 0)` |
//! | head (sentinel.next) | `keccak256(owner32 ‖ pointer ‖ 0 ‖ 0x01)` |
//! | tail (sentinel.previous) | `keccak256(owner32 ‖ pointer ‖ 0 ‖ 0x00)` |
//! | node.next | `keccak256(owner32 ‖ pointer ‖ index ‖ 0x01)` |
//! | node.previous | `keccak256(owner32 ‖ pointer ‖ index ‖ 0x00)` |
//!
//! Index `0` is the sentinel and can never be inserted. An all-zero link
//! therefore always means "the sentinel", and removal zeroes a node's links,
//! which makes `contains` a constant-time check.
//!
//! ## Gas
//!
//! The host charges a flat base tariff returned by
//! [`SortedListPrecompile::gas_requirement`]. On top of it, every traversal
//! hop is metered during execution; a call whose metered gas exceeds the
//! caller's limit halts with [`Error::OutOfGas`].
//!
//! ## Atomicity
//!
//! Calls execute against a write [`Journal`] that is committed only when the
//! call succeeds. A halt never leaves a partial splice behind.

mod abi;
mod accessor;
mod config;
mod error;
mod gas;
mod list;
mod precompile;
mod query;
pub mod slots;
mod storage;
mod traversal;
mod value_store;

pub use abi::{function_selector, ISortedList, IValueStore, ListFunction, SelectorTable};
pub use accessor::ListAccessor;
pub use config::{GasSchedule, Limits, PrecompileConfig};
pub use error::{Error, HaltReason};
pub use gas::GasMeter;
pub use list::SortedList;
pub use precompile::{CallContext, PrecompileOutput, SortedListPrecompile};
pub use slots::Direction;
pub use storage::{Journal, MemoryStorage, StorageBackend};
pub use value_store::{ValueStorePrecompile, VALUE_STORE_ADDRESS};

pub type Result<T> = std::result::Result<T, Error>;

/// Constants shared by the list engine and its callers
pub mod constants {
    use alloy_primitives::U256;

    /// Reserved index of the sentinel node; never a valid key
    pub const SENTINEL: U256 = U256::ZERO;

    /// Default maximum number of nodes per list
    pub const MAX_SIZE: u64 = 5_000_000;

    /// Default maximum number of hops a single call may walk
    pub const MAX_HOPS: u64 = 5_000_000;

    /// Base tariff for insert, remove and shrink
    pub const MUTATION_BASE_GAS: u64 = 5_000;

    /// Base tariff for read-only functions
    pub const QUERY_BASE_GAS: u64 = 100;

    /// Gas charged for every traversal hop (a warm SLOAD)
    pub const PER_HOP_GAS: u64 = 100;
}
