//! Bounded walks over the node links
//!
//! Every hop is counted against [`Limits::max_hops`](crate::Limits) and
//! priced at the per-hop gas rate before the link is read. A walk that
//! lands on the sentinel before reaching its target means the links are
//! inconsistent and fails with [`Error::CorruptedList`].

use alloy_primitives::U256;

use crate::constants::SENTINEL;
use crate::list::SortedList;
use crate::slots::Direction;
use crate::storage::StorageBackend;
use crate::{Error, Result};

/// Where a search starts and which way it walks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
    index: U256,
    direction: Direction,
    distance: U256,
}

impl<S: StorageBackend> SortedList<'_, S> {
    /// Account for one hop: enforce the ceiling, then charge gas
    pub(crate) fn tick(&mut self) -> Result<()> {
        self.hops += 1;
        if self.hops > self.limits.max_hops {
            tracing::warn!(
                pointer = %self.accessor.pointer(),
                limit = self.limits.max_hops,
                "traversal limit exceeded"
            );
            return Err(Error::TraversalLimitExceeded {
                limit: self.limits.max_hops,
            });
        }
        self.meter.charge(self.per_hop_gas)
    }

    /// Follow one link from `from`
    pub(crate) fn step(&mut self, from: U256, direction: Direction) -> Result<U256> {
        self.tick()?;
        Ok(self.accessor.link(from, direction))
    }

    /// Follow `hops` links from `from`, never crossing the sentinel
    pub(crate) fn walk(&mut self, from: U256, direction: Direction, hops: u64) -> Result<U256> {
        let mut current = from;
        for taken in 0..hops {
            current = self.step(current, direction)?;
            if current == SENTINEL {
                return Err(Error::CorruptedList(format!(
                    "reached the sentinel after {} of {} hops",
                    taken + 1,
                    hops
                )));
            }
        }
        Ok(current)
    }

    /// Find the neighbours an absent `index` must be spliced between.
    ///
    /// Requires a non-empty list with `head < index < tail`. The walk starts
    /// from whichever of head, tail, or a present `hint` is nearest to
    /// `index` by key distance; ties go to the head, then the tail.
    pub(crate) fn locate_insertion_point(
        &mut self,
        index: U256,
        hint: U256,
    ) -> Result<(U256, U256)> {
        let anchor = self.choose_anchor(index, hint);
        tracing::trace!(
            %index,
            start = %anchor.index,
            direction = ?anchor.direction,
            "locating insertion point"
        );

        let mut current = anchor.index;
        match anchor.direction {
            Direction::Next => {
                while current < index {
                    current = self.step(current, Direction::Next)?;
                    if current == SENTINEL {
                        return Err(Error::CorruptedList(format!(
                            "forward walk for {index} ran past the tail"
                        )));
                    }
                }
                Ok((self.accessor.previous(current), current))
            }
            Direction::Previous => {
                while current > index {
                    current = self.step(current, Direction::Previous)?;
                    if current == SENTINEL {
                        return Err(Error::CorruptedList(format!(
                            "backward walk for {index} ran past the head"
                        )));
                    }
                }
                Ok((current, self.accessor.next(current)))
            }
        }
    }

    fn choose_anchor(&self, index: U256, hint: U256) -> Anchor {
        let head = self.accessor.head();
        let tail = self.accessor.tail();

        let mut anchor = Anchor {
            index: head,
            direction: Direction::Next,
            distance: index - head,
        };
        if tail - index < anchor.distance {
            anchor = Anchor {
                index: tail,
                direction: Direction::Previous,
                distance: tail - index,
            };
        }

        if hint != SENTINEL && self.contains(hint) {
            let candidate = if hint < index {
                Anchor {
                    index: hint,
                    direction: Direction::Next,
                    distance: index - hint,
                }
            } else {
                Anchor {
                    index: hint,
                    direction: Direction::Previous,
                    distance: hint - index,
                }
            };
            if candidate.distance < anchor.distance {
                anchor = candidate;
            }
        }

        anchor
    }
}
