//! Read-only list queries
//!
//! Absent indices and empty lists answer with the sentinel (`0`), which can
//! never be a real key.

use alloy_primitives::U256;

use crate::constants::SENTINEL;
use crate::list::SortedList;
use crate::slots::Direction;
use crate::storage::StorageBackend;
use crate::{Error, Result};

impl<S: StorageBackend> SortedList<'_, S> {
    pub fn size(&self) -> U256 {
        self.accessor.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size().is_zero()
    }

    /// Smallest index, or `0` when empty
    pub fn head(&self) -> U256 {
        self.accessor.head()
    }

    /// Largest index, or `0` when empty
    pub fn tail(&self) -> U256 {
        self.accessor.tail()
    }

    /// Constant-time membership check.
    ///
    /// Removal zeroes a node's links, so an absent index always has a
    /// sentinel `previous`, and the sentinel's `next` is the head. The
    /// back-link therefore round-trips only for nodes that are threaded in.
    pub fn contains(&self, index: U256) -> bool {
        index != SENTINEL && self.accessor.next(self.accessor.previous(index)) == index
    }

    /// Successor of `index`, or `0` if it is the tail or absent
    pub fn next(&self, index: U256) -> U256 {
        if self.contains(index) {
            self.accessor.next(index)
        } else {
            SENTINEL
        }
    }

    /// Predecessor of `index`, or `0` if it is the head or absent
    pub fn previous(&self, index: U256) -> U256 {
        if self.contains(index) {
            self.accessor.previous(index)
        } else {
            SENTINEL
        }
    }

    /// Node at 1-based position `ceil(size / 2)`, or `0` when empty.
    ///
    /// Walks from whichever end is fewer hops away.
    pub fn middle(&mut self) -> Result<U256> {
        let size = self.stored_size()?;
        if size == 0 {
            return Ok(SENTINEL);
        }

        let position = size.div_ceil(2);
        let from_head = position - 1;
        let from_tail = size - position;

        if from_head <= from_tail {
            let head = self.accessor.head();
            self.walk(head, Direction::Next, from_head)
        } else {
            let tail = self.accessor.tail();
            self.walk(tail, Direction::Previous, from_tail)
        }
    }

    /// Every index in ascending order.
    ///
    /// Costs one hop per node; lists longer than the hop ceiling halt.
    pub fn list(&mut self) -> Result<Vec<U256>> {
        let size = self.stored_size()?;
        let mut indices = Vec::with_capacity(size.min(self.limits.max_hops) as usize);

        let mut current = self.accessor.head();
        while current != SENTINEL {
            indices.push(current);
            current = self.step(current, Direction::Next)?;
        }

        if indices.len() as u64 != size {
            return Err(Error::CorruptedList(format!(
                "size is {} but {} nodes are linked",
                size,
                indices.len()
            )));
        }
        Ok(indices)
    }

    fn stored_size(&self) -> Result<u64> {
        let size = self.accessor.size();
        u64::try_from(size)
            .map_err(|_| Error::CorruptedList(format!("size {size} does not fit in u64")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Limits;
    use crate::storage::MemoryStorage;
    use alloy_primitives::{Address, B256};

    fn u(value: u64) -> U256 {
        U256::from(value)
    }

    fn view(storage: &mut MemoryStorage) -> SortedList<'_, MemoryStorage> {
        SortedList::new(storage, Address::repeat_byte(2), B256::repeat_byte(9))
    }

    fn build(storage: &mut MemoryStorage, indices: &[u64]) {
        let mut list = view(storage);
        for &i in indices {
            list.insert(u(i), U256::ZERO).unwrap();
        }
    }

    #[test]
    fn test_empty_list_queries() {
        let mut storage = MemoryStorage::new();
        let mut list = view(&mut storage);

        assert!(list.is_empty());
        assert_eq!(list.head(), SENTINEL);
        assert_eq!(list.tail(), SENTINEL);
        assert_eq!(list.middle().unwrap(), SENTINEL);
        assert!(list.list().unwrap().is_empty());
        assert!(!list.contains(u(1)));
        assert_eq!(list.next(u(1)), SENTINEL);
    }

    #[test]
    fn test_contains_single_node() {
        let mut storage = MemoryStorage::new();
        build(&mut storage, &[9]);

        let list = view(&mut storage);
        assert!(list.contains(u(9)));
        assert!(!list.contains(u(8)));
        assert!(!list.contains(SENTINEL));
    }

    #[test]
    fn test_next_previous_of_absent_index() {
        let mut storage = MemoryStorage::new();
        build(&mut storage, &[2, 4]);

        let list = view(&mut storage);
        assert_eq!(list.next(u(3)), SENTINEL);
        assert_eq!(list.previous(u(3)), SENTINEL);
        assert_eq!(list.next(u(2)), u(4));
        assert_eq!(list.next(u(4)), SENTINEL);
        assert_eq!(list.previous(u(2)), SENTINEL);
    }

    #[test]
    fn test_middle_positions() {
        let cases: &[(&[u64], u64)] = &[
            (&[7], 7),
            (&[1, 2], 1),
            (&[2, 5, 8], 5),
            (&[1, 2, 3, 4], 2),
            (&[1, 2, 3, 4, 5], 3),
            (&[1, 2, 3, 4, 5, 6], 3),
        ];

        for (indices, expected) in cases {
            let mut storage = MemoryStorage::new();
            build(&mut storage, indices);
            let mut list = view(&mut storage);
            assert_eq!(list.middle().unwrap(), u(*expected), "middle of {:?}", indices);
        }
    }

    #[test]
    fn test_middle_walks_from_nearer_end() {
        let mut storage = MemoryStorage::new();
        build(&mut storage, &[1, 2, 3, 4, 5, 6, 7]);

        let mut list = view(&mut storage);
        assert_eq!(list.middle().unwrap(), u(4));
        assert_eq!(list.hops(), 3);
    }

    #[test]
    fn test_list_is_ascending() {
        let mut storage = MemoryStorage::new();
        build(&mut storage, &[40, 10, 30, 20, 50]);

        let mut list = view(&mut storage);
        assert_eq!(list.list().unwrap(), vec![u(10), u(20), u(30), u(40), u(50)]);
        assert_eq!(list.hops(), 5);
    }

    #[test]
    fn test_list_longer_than_ceiling_halts() {
        let mut storage = MemoryStorage::new();
        build(&mut storage, &[1, 2, 3, 4]);

        let limits = Limits {
            max_hops: 3,
            ..Limits::default()
        };
        let mut list = view(&mut storage).with_limits(limits);
        assert_eq!(list.list(), Err(Error::TraversalLimitExceeded { limit: 3 }));
    }

    #[test]
    fn test_circularity() {
        let mut storage = MemoryStorage::new();
        build(&mut storage, &[3, 1, 4, 15, 9, 2, 6]);

        let list = view(&mut storage);
        let size = 7;

        let mut current = list.head();
        for _ in 0..size {
            assert_ne!(current, SENTINEL);
            current = list.next(current);
        }
        assert_eq!(current, SENTINEL);

        let mut current = list.tail();
        for _ in 0..size {
            assert_ne!(current, SENTINEL);
            current = list.previous(current);
        }
        assert_eq!(current, SENTINEL);
    }
}
