//! Metadata and node link accessors
//!
//! A [`ListAccessor`] binds a storage backend to one `(owner, pointer)` list
//! and exposes exactly the cells the engine needs. It performs no
//! validation; keeping the list consistent is the caller's job.

use alloy_primitives::{Address, B256, U256};

use crate::constants::SENTINEL;
use crate::slots::{self, Direction};
use crate::storage::StorageBackend;

pub struct ListAccessor<'s, S: StorageBackend> {
    storage: &'s mut S,
    owner: Address,
    pointer: B256,
}

impl<'s, S: StorageBackend> ListAccessor<'s, S> {
    /// Bind `storage` to the list `pointer` owned by `owner`.
    ///
    /// Cells are read from and written to the owner's own account.
    pub fn new(storage: &'s mut S, owner: Address, pointer: B256) -> Self {
        Self {
            storage,
            owner,
            pointer,
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn pointer(&self) -> B256 {
        self.pointer
    }

    // === Metadata ===

    pub fn size(&self) -> U256 {
        self.load(slots::size_slot(&self.owner, &self.pointer))
    }

    pub fn set_size(&mut self, size: U256) {
        let slot = slots::size_slot(&self.owner, &self.pointer);
        self.save(slot, size);
    }

    /// Smallest index, or the sentinel when empty
    pub fn head(&self) -> U256 {
        self.link(SENTINEL, Direction::Next)
    }

    pub fn set_head(&mut self, index: U256) {
        self.set_link(SENTINEL, Direction::Next, index);
    }

    /// Largest index, or the sentinel when empty
    pub fn tail(&self) -> U256 {
        self.link(SENTINEL, Direction::Previous)
    }

    pub fn set_tail(&mut self, index: U256) {
        self.set_link(SENTINEL, Direction::Previous, index);
    }

    // === Node links ===

    pub fn next(&self, index: U256) -> U256 {
        self.link(index, Direction::Next)
    }

    pub fn set_next(&mut self, index: U256, next: U256) {
        self.set_link(index, Direction::Next, next);
    }

    pub fn previous(&self, index: U256) -> U256 {
        self.link(index, Direction::Previous)
    }

    pub fn set_previous(&mut self, index: U256, previous: U256) {
        self.set_link(index, Direction::Previous, previous);
    }

    pub fn link(&self, index: U256, direction: Direction) -> U256 {
        self.load(slots::node_slot(&self.owner, &self.pointer, index, direction))
    }

    pub fn set_link(&mut self, index: U256, direction: Direction, target: U256) {
        let slot = slots::node_slot(&self.owner, &self.pointer, index, direction);
        self.save(slot, target);
    }

    /// Zero both link cells of `index`
    pub fn clear(&mut self, index: U256) {
        self.set_link(index, Direction::Previous, U256::ZERO);
        self.set_link(index, Direction::Next, U256::ZERO);
    }

    fn load(&self, slot: U256) -> U256 {
        self.storage.load(&self.owner, slot)
    }

    fn save(&mut self, slot: U256, value: U256) {
        self.storage.store(&self.owner, slot, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_fresh_list_reads_sentinel_state() {
        let mut storage = MemoryStorage::new();
        let accessor = ListAccessor::new(&mut storage, Address::repeat_byte(1), B256::ZERO);

        assert_eq!(accessor.size(), U256::ZERO);
        assert_eq!(accessor.head(), SENTINEL);
        assert_eq!(accessor.tail(), SENTINEL);
    }

    #[test]
    fn test_head_tail_share_sentinel_links() {
        let mut storage = MemoryStorage::new();
        let mut accessor = ListAccessor::new(&mut storage, Address::repeat_byte(1), B256::ZERO);

        accessor.set_head(U256::from(3));
        accessor.set_tail(U256::from(9));
        assert_eq!(accessor.next(SENTINEL), U256::from(3));
        assert_eq!(accessor.previous(SENTINEL), U256::from(9));
    }

    #[test]
    fn test_clear_zeroes_links() {
        let mut storage = MemoryStorage::new();
        let owner = Address::repeat_byte(1);
        {
            let mut accessor = ListAccessor::new(&mut storage, owner, B256::ZERO);
            accessor.set_next(U256::from(4), U256::from(8));
            accessor.set_previous(U256::from(4), U256::from(2));
            accessor.clear(U256::from(4));
            assert_eq!(accessor.next(U256::from(4)), U256::ZERO);
        }
        assert_eq!(storage.account_cell_count(&owner), 0);
    }

    #[test]
    fn test_lists_do_not_share_cells() {
        let mut storage = MemoryStorage::new();
        let owner = Address::repeat_byte(1);

        ListAccessor::new(&mut storage, owner, B256::repeat_byte(1)).set_size(U256::from(3));
        let other = ListAccessor::new(&mut storage, owner, B256::repeat_byte(2));
        assert_eq!(other.size(), U256::ZERO);
    }
}
