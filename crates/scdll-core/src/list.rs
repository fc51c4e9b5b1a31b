//! Sorted list engine: construction and mutations
//!
//! A [`SortedList`] is a short-lived view over one `(owner, pointer)` list
//! for the duration of one call. It carries the call's [`GasMeter`] and hop
//! counter, so every walk it performs is bounded and priced.
//!
//! ```
//! use alloy_primitives::{Address, B256, U256};
//! use scdll_core::{MemoryStorage, SortedList};
//!
//! let mut storage = MemoryStorage::new();
//! let mut list = SortedList::new(&mut storage, Address::repeat_byte(1), B256::ZERO);
//!
//! for i in [5u64, 2, 8] {
//!     assert!(list.insert(U256::from(i), U256::ZERO).unwrap());
//! }
//! assert_eq!(list.head(), U256::from(2));
//! assert_eq!(list.middle().unwrap(), U256::from(5));
//! ```

use alloy_primitives::{Address, B256, U256};

use crate::accessor::ListAccessor;
use crate::config::{GasSchedule, Limits};
use crate::constants::SENTINEL;
use crate::gas::GasMeter;
use crate::storage::StorageBackend;
use crate::{Error, Result};

pub struct SortedList<'s, S: StorageBackend> {
    pub(crate) accessor: ListAccessor<'s, S>,
    pub(crate) limits: Limits,
    pub(crate) per_hop_gas: u64,
    pub(crate) meter: GasMeter,
    pub(crate) hops: u64,
}

impl<'s, S: StorageBackend> SortedList<'s, S> {
    /// View with default limits, default per-hop price and no gas limit
    pub fn new(storage: &'s mut S, owner: Address, pointer: B256) -> Self {
        Self {
            accessor: ListAccessor::new(storage, owner, pointer),
            limits: Limits::default(),
            per_hop_gas: GasSchedule::default().per_hop,
            meter: GasMeter::unlimited(),
            hops: 0,
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Meter hops at `per_hop` gas against `meter`
    pub fn with_gas(mut self, per_hop: u64, meter: GasMeter) -> Self {
        self.per_hop_gas = per_hop;
        self.meter = meter;
        self
    }

    pub fn meter(&self) -> &GasMeter {
        &self.meter
    }

    /// Hops walked so far by this view
    pub fn hops(&self) -> u64 {
        self.hops
    }

    /// Insert `index`, keeping the list sorted.
    ///
    /// Returns `Ok(false)` when the index is already present or the list is
    /// at capacity. `hint` may name a present node to start the search from;
    /// any other value is ignored.
    pub fn insert(&mut self, index: U256, hint: U256) -> Result<bool> {
        if index == SENTINEL {
            return Err(Error::InvalidIndex);
        }
        if self.contains(index) {
            tracing::debug!(%index, "insert skipped: duplicate index");
            return Ok(false);
        }

        let size = self.accessor.size();
        if size >= U256::from(self.limits.max_size) {
            tracing::debug!(%index, %size, "insert skipped: list at capacity");
            return Ok(false);
        }

        let (previous, next) = if size.is_zero() {
            (SENTINEL, SENTINEL)
        } else {
            let head = self.accessor.head();
            let tail = self.accessor.tail();
            if index < head {
                (SENTINEL, head)
            } else if index > tail {
                (tail, SENTINEL)
            } else {
                self.locate_insertion_point(index, hint)?
            }
        };

        self.link_between(index, previous, next);
        self.accessor.set_size(size + U256::from(1));

        tracing::debug!(
            pointer = %self.accessor.pointer(),
            %index,
            %previous,
            %next,
            "inserted node"
        );
        Ok(true)
    }

    /// Remove `index`. Returns false if it was not present.
    pub fn remove(&mut self, index: U256) -> bool {
        if !self.contains(index) {
            return false;
        }

        self.unlink(index);
        let size = self.accessor.size();
        self.accessor.set_size(size.saturating_sub(U256::from(1)));

        tracing::debug!(pointer = %self.accessor.pointer(), %index, "removed node");
        true
    }

    /// Remove up to `count` nodes from the tail end (largest indices first).
    ///
    /// Every removal counts as one hop against the traversal ceiling.
    /// Returns the number of nodes removed.
    pub fn shrink(&mut self, count: U256) -> Result<U256> {
        let size = self.accessor.size();
        let target = u64::try_from(count.min(size)).unwrap_or(u64::MAX);

        let mut removed = 0u64;
        while removed < target {
            self.tick()?;
            let tail = self.accessor.tail();
            if tail == SENTINEL {
                return Err(Error::CorruptedList(format!(
                    "size is {size} but only {removed} nodes were reachable from the tail"
                )));
            }
            self.unlink(tail);
            removed += 1;
        }

        if removed > 0 {
            self.accessor.set_size(size - U256::from(removed));
        }

        tracing::debug!(pointer = %self.accessor.pointer(), removed, "shrunk list");
        Ok(U256::from(removed))
    }

    /// Splice `index` between two adjacent nodes (either may be the sentinel)
    fn link_between(&mut self, index: U256, previous: U256, next: U256) {
        self.accessor.set_previous(index, previous);
        self.accessor.set_next(index, next);
        self.accessor.set_next(previous, index);
        self.accessor.set_previous(next, index);
    }

    /// Splice `index` out and zero its links
    fn unlink(&mut self, index: U256) {
        let previous = self.accessor.previous(index);
        let next = self.accessor.next(index);
        self.accessor.set_next(previous, next);
        self.accessor.set_previous(next, previous);
        self.accessor.clear(index);
    }
}
