//! Account storage seam between the list engine and its host
//!
//! The engine never touches host state directly. It only talks to a
//! [`StorageBackend`], which the host implements over its journaled account
//! state and tests implement with [`MemoryStorage`].

use std::collections::BTreeMap;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Per-account key → 32-byte word store.
///
/// Unwritten cells read as zero. Writing zero is equivalent to clearing.
pub trait StorageBackend {
    /// Read one storage cell of `account`
    fn load(&self, account: &Address, slot: U256) -> U256;

    /// Write one storage cell of `account`
    fn store(&mut self, account: &Address, slot: U256, value: U256);
}

/// In-memory storage substrate.
///
/// Zero values are not kept, so [`MemoryStorage::cell_count`] reflects the
/// number of live (non-zero) cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStorage {
    accounts: BTreeMap<Address, BTreeMap<U256, U256>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of non-zero cells held for `account`
    pub fn account_cell_count(&self, account: &Address) -> usize {
        self.accounts.get(account).map_or(0, BTreeMap::len)
    }

    /// Number of non-zero cells across all accounts
    pub fn cell_count(&self) -> usize {
        self.accounts.values().map(BTreeMap::len).sum()
    }

    /// Accounts that currently hold at least one cell
    pub fn accounts(&self) -> impl Iterator<Item = &Address> {
        self.accounts.keys()
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self, account: &Address, slot: U256) -> U256 {
        self.accounts
            .get(account)
            .and_then(|cells| cells.get(&slot))
            .copied()
            .unwrap_or(U256::ZERO)
    }

    fn store(&mut self, account: &Address, slot: U256, value: U256) {
        if value.is_zero() {
            if let Some(cells) = self.accounts.get_mut(account) {
                cells.remove(&slot);
                if cells.is_empty() {
                    self.accounts.remove(account);
                }
            }
        } else {
            self.accounts.entry(*account).or_default().insert(slot, value);
        }
    }
}

/// Write buffer over a backend.
///
/// Reads see pending writes first. Nothing reaches the inner backend until
/// [`Journal::commit`]; dropping the journal discards every pending write.
pub struct Journal<'a, S: StorageBackend> {
    inner: &'a mut S,
    pending: BTreeMap<(Address, U256), U256>,
}

impl<'a, S: StorageBackend> Journal<'a, S> {
    pub fn new(inner: &'a mut S) -> Self {
        Self {
            inner,
            pending: BTreeMap::new(),
        }
    }

    /// Number of distinct cells written so far
    pub fn pending_writes(&self) -> usize {
        self.pending.len()
    }

    /// Flush every pending write to the inner backend.
    ///
    /// Returns the number of cells written.
    pub fn commit(self) -> usize {
        let count = self.pending.len();
        for ((account, slot), value) in self.pending {
            self.inner.store(&account, slot, value);
        }
        count
    }
}

impl<S: StorageBackend> StorageBackend for Journal<'_, S> {
    fn load(&self, account: &Address, slot: U256) -> U256 {
        match self.pending.get(&(*account, slot)) {
            Some(value) => *value,
            None => self.inner.load(account, slot),
        }
    }

    fn store(&mut self, account: &Address, slot: U256, value: U256) {
        self.pending.insert((*account, slot), value);
    }
}
