//! Single-cell value store precompile
//!
//! Keeps one `uint256` in slot 0 of a fixed account, shared by every caller.
//!
//! ```solidity
//! interface IValueStore {
//!     function get() external view returns (uint256);
//!     function set(uint256 value) external;
//! }
//! ```
//!
//! | Function | Gas |
//! |----------|-----|
//! | `get()` | 1,000 |
//! | `set(uint256)` | 2,000 |

use alloy_primitives::{address, Address, U256};
use alloy_sol_types::SolCall;

use crate::abi::{encode_word, IValueStore, SelectorTable};
use crate::precompile::{CallContext, PrecompileOutput};
use crate::storage::StorageBackend;
use crate::{Error, Result};

/// Account holding the stored value: 0x0100..0001
pub const VALUE_STORE_ADDRESS: Address = address!("0x0100000000000000000000000000000000000001");

/// Slot of the stored value
const VALUE_SLOT: U256 = U256::ZERO;

const GET_GAS: u64 = 1_000;
const SET_GAS: u64 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreFunction {
    Get,
    Set,
}

#[derive(Debug, Clone)]
pub struct ValueStorePrecompile {
    selectors: SelectorTable<StoreFunction>,
}

impl ValueStorePrecompile {
    pub fn new() -> Self {
        Self {
            selectors: SelectorTable::new([
                (StoreFunction::Get, "get()"),
                (StoreFunction::Set, "set(uint256)"),
            ]),
        }
    }

    /// `set` costs 2,000; everything else 1,000
    pub fn gas_requirement(&self, input: &[u8]) -> u64 {
        match self.resolve(input) {
            Ok(StoreFunction::Set) => SET_GAS,
            _ => GET_GAS,
        }
    }

    pub fn call<S: StorageBackend>(
        &self,
        input: &[u8],
        ctx: &CallContext,
        storage: &mut S,
    ) -> Result<PrecompileOutput> {
        let function = self.resolve(input).inspect_err(|err| {
            tracing::warn!(target: "scdll::value_store", %err, "interface not found");
        })?;

        let gas = self.gas_requirement(input);
        if gas > ctx.gas_limit {
            return Err(Error::OutOfGas {
                required: gas,
                limit: ctx.gas_limit,
            });
        }

        let state = storage.load(&VALUE_STORE_ADDRESS, VALUE_SLOT);
        match function {
            StoreFunction::Get => {
                tracing::info!(target: "scdll::value_store", %state, "latest state");
                Ok(PrecompileOutput::new(gas, encode_word(state)))
            }
            StoreFunction::Set => {
                let call = IValueStore::setCall::abi_decode_raw(&input[4..])?;
                storage.store(&VALUE_STORE_ADDRESS, VALUE_SLOT, call.value);
                tracing::info!(
                    target: "scdll::value_store",
                    from = %state,
                    to = %call.value,
                    "state updated"
                );
                Ok(PrecompileOutput::new(gas, Vec::new()))
            }
        }
    }

    fn resolve(&self, input: &[u8]) -> Result<StoreFunction> {
        self.selectors.resolve(input)
    }
}

impl Default for ValueStorePrecompile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn ctx() -> CallContext {
        CallContext::new(Address::repeat_byte(0x01), 100_000)
    }

    #[test]
    fn test_get_defaults_to_zero() {
        let precompile = ValueStorePrecompile::new();
        let mut storage = MemoryStorage::new();

        let output = precompile
            .call(&IValueStore::getCall {}.abi_encode(), &ctx(), &mut storage)
            .unwrap();
        assert_eq!(output.bytes.as_ref(), &[0u8; 32]);
        assert_eq!(output.gas_used, 1_000);
    }

    #[test]
    fn test_set_then_get() {
        let precompile = ValueStorePrecompile::new();
        let mut storage = MemoryStorage::new();

        let set = IValueStore::setCall {
            value: U256::from(77),
        }
        .abi_encode();
        let output = precompile.call(&set, &ctx(), &mut storage).unwrap();
        assert!(output.bytes.is_empty());
        assert_eq!(output.gas_used, 2_000);

        let output = precompile
            .call(&IValueStore::getCall {}.abi_encode(), &ctx(), &mut storage)
            .unwrap();
        assert_eq!(U256::from_be_slice(&output.bytes), U256::from(77));
        assert_eq!(storage.account_cell_count(&VALUE_STORE_ADDRESS), 1);
    }

    #[test]
    fn test_value_is_shared_between_callers() {
        let precompile = ValueStorePrecompile::new();
        let mut storage = MemoryStorage::new();

        let set = IValueStore::setCall {
            value: U256::from(5),
        }
        .abi_encode();
        precompile.call(&set, &ctx(), &mut storage).unwrap();

        let other = CallContext::new(Address::repeat_byte(0x02), 100_000);
        let output = precompile
            .call(&IValueStore::getCall {}.abi_encode(), &other, &mut storage)
            .unwrap();
        assert_eq!(U256::from_be_slice(&output.bytes), U256::from(5));
    }

    #[test]
    fn test_invalid_input_halts() {
        let precompile = ValueStorePrecompile::new();
        let mut storage = MemoryStorage::new();

        assert_eq!(precompile.call(&[], &ctx(), &mut storage), Err(Error::EmptyInput));
        assert!(matches!(
            precompile.call(&[1, 2, 3, 4], &ctx(), &mut storage),
            Err(Error::UnknownSelector(_))
        ));
    }

    #[test]
    fn test_gas_requirement() {
        let precompile = ValueStorePrecompile::new();
        let set = IValueStore::setCall { value: U256::ZERO }.abi_encode();
        assert_eq!(precompile.gas_requirement(&set), 2_000);
        assert_eq!(precompile.gas_requirement(&IValueStore::getCall {}.abi_encode()), 1_000);
    }
}
