//! Storage slot derivation for list metadata and node links
//!
//! Every cell of every list is placed at a keccak-256 hash of its full
//! identity, in the spirit of Solidity mapping slots:
//!
//! ```text
//! metadata_slot = keccak256(owner32 ‖ pointer ‖ index)             (96 bytes)
//! node_slot     = keccak256(owner32 ‖ pointer ‖ index ‖ direction) (97 bytes)
//! ```
//!
//! Where:
//! - `owner32` is the 20-byte owner address left-padded to 32 bytes
//! - `pointer` is the caller-chosen 32-byte list identifier
//! - `index` is the node key as a big-endian uint256
//! - `direction` is `0x00` for the previous link and `0x01` for the next link
//!
//! The two preimage lengths differ, so a metadata cell can never alias a
//! link cell, and both the owner and the pointer are bound into every slot.

use alloy_primitives::{Address, B256, U256};
use tiny_keccak::{Hasher, Keccak};

use crate::constants::SENTINEL;

/// Which neighbour link of a node a cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous = 0,
    Next = 1,
}

impl Direction {
    /// The opposite link
    pub fn reverse(self) -> Self {
        match self {
            Direction::Previous => Direction::Next,
            Direction::Next => Direction::Previous,
        }
    }
}

/// Compute the slot of a per-list metadata cell.
///
/// The list size lives at `metadata_slot(owner, pointer, SENTINEL)`.
pub fn metadata_slot(owner: &Address, pointer: &B256, index: U256) -> U256 {
    let mut input = [0u8; 96];
    input[12..32].copy_from_slice(owner.as_slice());
    input[32..64].copy_from_slice(pointer.as_slice());
    input[64..96].copy_from_slice(&index.to_be_bytes::<32>());

    keccak_word(&input)
}

/// Compute the slot of one link cell of a node.
///
/// The sentinel's links double as the list head (`Next`) and tail
/// (`Previous`).
pub fn node_slot(owner: &Address, pointer: &B256, index: U256, direction: Direction) -> U256 {
    let mut input = [0u8; 97];
    input[12..32].copy_from_slice(owner.as_slice());
    input[32..64].copy_from_slice(pointer.as_slice());
    input[64..96].copy_from_slice(&index.to_be_bytes::<32>());
    input[96] = direction as u8;

    keccak_word(&input)
}

/// Slot holding the list size
#[inline]
pub fn size_slot(owner: &Address, pointer: &B256) -> U256 {
    metadata_slot(owner, pointer, SENTINEL)
}

/// Slot holding the list head
#[inline]
pub fn head_slot(owner: &Address, pointer: &B256) -> U256 {
    node_slot(owner, pointer, SENTINEL, Direction::Next)
}

/// Slot holding the list tail
#[inline]
pub fn tail_slot(owner: &Address, pointer: &B256) -> U256 {
    node_slot(owner, pointer, SENTINEL, Direction::Previous)
}

fn keccak_word(input: &[u8]) -> U256 {
    let mut hasher = Keccak::v256();
    hasher.update(input);

    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    U256::from_be_bytes(out)
}
