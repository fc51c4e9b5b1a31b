//! Call ABI: interfaces, selectors and return encoding
//!
//! Selectors are derived from the canonical signatures once, when a
//! precompile is constructed, as the first 4 bytes of their keccak-256 hash.
//! The `sol!` interfaces below describe the same functions and are used to
//! decode arguments; a test keeps both views in agreement.

use std::collections::HashMap;

use alloy_primitives::U256;
use alloy_sol_types::{sol, SolValue};
use tiny_keccak::{Hasher, Keccak};

use crate::{Error, Result};

sol! {
    /// Sorted circular doubly-linked list precompile
    interface ISortedList {
        function contains(bytes32 pointer, uint256 index) external view returns (bool);
        function head(bytes32 pointer) external view returns (uint256);
        function list(bytes32 pointer) external view returns (uint256[] memory);
        function middle(bytes32 pointer) external view returns (uint256);
        function next(bytes32 pointer, uint256 index) external view returns (uint256);
        function previous(bytes32 pointer, uint256 index) external view returns (uint256);
        function size(bytes32 pointer) external view returns (uint256);
        function tail(bytes32 pointer) external view returns (uint256);
        function remove(bytes32 pointer, uint256 index) external returns (bool);
        /// `hint` may name a present node to start the search from; otherwise ignored
        function insert(bytes32 pointer, uint256 index, uint256 hint) external returns (bool);
        /// Removes up to `count` nodes from the tail, returns how many were removed
        function shrink(bytes32 pointer, uint256 count) external returns (uint256);
    }

    /// Single-cell value store precompile
    interface IValueStore {
        function get() external view returns (uint256);
        function set(uint256 value) external;
    }
}

/// Compute a function selector: the first 4 bytes of keccak256(signature).
pub fn function_selector(signature: &str) -> [u8; 4] {
    let mut hasher = Keccak::v256();
    hasher.update(signature.as_bytes());

    let mut hash = [0u8; 32];
    hasher.finalize(&mut hash);

    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// Functions exposed by the sorted list precompile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListFunction {
    Contains,
    Head,
    List,
    Middle,
    Next,
    Previous,
    Size,
    Tail,
    Remove,
    Insert,
    Shrink,
}

impl ListFunction {
    pub const ALL: [ListFunction; 11] = [
        ListFunction::Contains,
        ListFunction::Head,
        ListFunction::List,
        ListFunction::Middle,
        ListFunction::Next,
        ListFunction::Previous,
        ListFunction::Size,
        ListFunction::Tail,
        ListFunction::Remove,
        ListFunction::Insert,
        ListFunction::Shrink,
    ];

    /// Canonical signature hashed into the selector
    pub fn signature(self) -> &'static str {
        match self {
            ListFunction::Contains => "contains(bytes32,uint256)",
            ListFunction::Head => "head(bytes32)",
            ListFunction::List => "list(bytes32)",
            ListFunction::Middle => "middle(bytes32)",
            ListFunction::Next => "next(bytes32,uint256)",
            ListFunction::Previous => "previous(bytes32,uint256)",
            ListFunction::Size => "size(bytes32)",
            ListFunction::Tail => "tail(bytes32)",
            ListFunction::Remove => "remove(bytes32,uint256)",
            ListFunction::Insert => "insert(bytes32,uint256,uint256)",
            ListFunction::Shrink => "shrink(bytes32,uint256)",
        }
    }

    /// Function name, also used as a log field and metrics label
    pub fn name(self) -> &'static str {
        let signature = self.signature();
        match signature.find('(') {
            Some(end) => &signature[..end],
            None => signature,
        }
    }

    /// Whether the function writes storage (and pays the mutation tariff)
    pub fn is_mutating(self) -> bool {
        matches!(
            self,
            ListFunction::Remove | ListFunction::Insert | ListFunction::Shrink
        )
    }
}

/// Selector → function lookup, built once at construction
#[derive(Debug, Clone)]
pub struct SelectorTable<F> {
    entries: HashMap<[u8; 4], F>,
}

impl<F: Copy> SelectorTable<F> {
    /// Hash every `(function, signature)` pair into the table
    pub fn new<'a>(functions: impl IntoIterator<Item = (F, &'a str)>) -> Self {
        let entries = functions
            .into_iter()
            .map(|(function, signature)| (function_selector(signature), function))
            .collect();
        Self { entries }
    }

    pub fn lookup(&self, selector: &[u8; 4]) -> Option<F> {
        self.entries.get(selector).copied()
    }

    /// Resolve the function addressed by the leading 4 bytes of `input`
    pub fn resolve(&self, input: &[u8]) -> Result<F> {
        if input.is_empty() {
            return Err(Error::EmptyInput);
        }
        let selector: [u8; 4] = input
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| Error::InvalidCalldata(format!("{} byte selector", input.len())))?;

        self.lookup(&selector).ok_or(Error::UnknownSelector(selector))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All `(selector, function)` pairs, sorted by selector
    pub fn entries(&self) -> Vec<([u8; 4], F)> {
        let mut entries: Vec<_> = self.entries.iter().map(|(s, f)| (*s, *f)).collect();
        entries.sort_by_key(|(selector, _)| *selector);
        entries
    }
}

impl SelectorTable<ListFunction> {
    pub fn for_sorted_list() -> Self {
        Self::new(ListFunction::ALL.iter().map(|f| (*f, f.signature())))
    }
}

/// ABI-encode a bool as one word
pub(crate) fn encode_bool(value: bool) -> Vec<u8> {
    value.abi_encode()
}

/// ABI-encode a uint256 as one word
pub(crate) fn encode_word(value: U256) -> Vec<u8> {
    value.abi_encode()
}

/// ABI-encode a dynamic `uint256[]` return value
pub(crate) fn encode_words(values: &[U256]) -> Vec<u8> {
    values.to_vec().abi_encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolCall;

    #[test]
    fn test_known_selectors() {
        // Well-known ERC-20 selectors
        assert_eq!(function_selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(function_selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn test_selectors_match_sol_interface() {
        use ISortedList::*;

        let expected = [
            (ListFunction::Contains, containsCall::SELECTOR),
            (ListFunction::Head, headCall::SELECTOR),
            (ListFunction::List, listCall::SELECTOR),
            (ListFunction::Middle, middleCall::SELECTOR),
            (ListFunction::Next, nextCall::SELECTOR),
            (ListFunction::Previous, previousCall::SELECTOR),
            (ListFunction::Size, sizeCall::SELECTOR),
            (ListFunction::Tail, tailCall::SELECTOR),
            (ListFunction::Remove, removeCall::SELECTOR),
            (ListFunction::Insert, insertCall::SELECTOR),
            (ListFunction::Shrink, shrinkCall::SELECTOR),
        ];

        for (function, selector) in expected {
            assert_eq!(
                function_selector(function.signature()),
                selector,
                "selector mismatch for {}",
                function.signature()
            );
        }
    }

    #[test]
    fn test_selector_table_resolves_all_functions() {
        let table = SelectorTable::for_sorted_list();
        assert_eq!(table.len(), ListFunction::ALL.len(), "Selectors must not collide");

        for function in ListFunction::ALL {
            let selector = function_selector(function.signature());
            assert_eq!(table.lookup(&selector), Some(function));
        }
        assert_eq!(table.lookup(&[0, 0, 0, 0]), None);
    }

    #[test]
    fn test_resolve_rejects_bad_input() {
        let table = SelectorTable::for_sorted_list();
        assert_eq!(table.resolve(&[]), Err(Error::EmptyInput));
        assert!(matches!(table.resolve(&[1, 2, 3]), Err(Error::InvalidCalldata(_))));
        assert_eq!(
            table.resolve(&[9, 9, 9, 9, 0]),
            Err(Error::UnknownSelector([9, 9, 9, 9]))
        );

        let mut input = function_selector("size(bytes32)").to_vec();
        input.extend_from_slice(&[0u8; 32]);
        assert_eq!(table.resolve(&input), Ok(ListFunction::Size));
    }

    #[test]
    fn test_function_names_and_tariff_class() {
        assert_eq!(ListFunction::Insert.name(), "insert");
        assert_eq!(ListFunction::Previous.name(), "previous");
        assert!(ListFunction::Shrink.is_mutating());
        assert!(!ListFunction::List.is_mutating());
    }

    #[test]
    fn test_word_encodings() {
        let one = encode_bool(true);
        assert_eq!(one.len(), 32);
        assert_eq!(one[31], 1);
        assert!(encode_bool(false).iter().all(|b| *b == 0));
        assert_eq!(encode_word(U256::from(0x1234)), U256::from(0x1234).to_be_bytes::<32>().to_vec());
    }

    #[test]
    fn test_dynamic_array_encoding() {
        let encoded = encode_words(&[U256::from(2), U256::from(5)]);
        assert_eq!(encoded.len(), 4 * 32);
        assert_eq!(U256::from_be_slice(&encoded[0..32]), U256::from(32), "offset");
        assert_eq!(U256::from_be_slice(&encoded[32..64]), U256::from(2), "length");
        assert_eq!(U256::from_be_slice(&encoded[64..96]), U256::from(2));
        assert_eq!(U256::from_be_slice(&encoded[96..128]), U256::from(5));
    }
}
