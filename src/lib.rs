//! Sorted circular doubly-linked list precompile
//!
//! Facade over [`scdll_core`]; see that crate for the storage layout and gas
//! schedule. The `scdll` binary lives in `crates/scdll-cli`.

pub use scdll_core::*;
