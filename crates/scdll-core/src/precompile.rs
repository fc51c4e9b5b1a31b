//! Sorted list precompile: selector dispatch and gas accounting
//!
//! ## Interface
//!
//! ```solidity
//! interface ISortedList {
//!     function contains(bytes32 pointer, uint256 index) external view returns (bool);
//!     function head(bytes32 pointer) external view returns (uint256);
//!     function list(bytes32 pointer) external view returns (uint256[] memory);
//!     function middle(bytes32 pointer) external view returns (uint256);
//!     function next(bytes32 pointer, uint256 index) external view returns (uint256);
//!     function previous(bytes32 pointer, uint256 index) external view returns (uint256);
//!     function size(bytes32 pointer) external view returns (uint256);
//!     function tail(bytes32 pointer) external view returns (uint256);
//!     function remove(bytes32 pointer, uint256 index) external returns (bool);
//!     function insert(bytes32 pointer, uint256 index, uint256 hint) external returns (bool);
//!     function shrink(bytes32 pointer, uint256 count) external returns (uint256);
//! }
//! ```
//!
//! ## Gas Costs
//!
//! | Item | Default |
//! |------|---------|
//! | insert / remove / shrink base | 5,000 |
//! | read-only base | 100 |
//! | every traversal hop | 100 |
//!
//! The base is what [`SortedListPrecompile::gas_requirement`] reports to the
//! host up front. Hops are charged while walking; a call that runs past the
//! caller's gas limit halts with [`Error::OutOfGas`].
//!
//! ## Storage Scope
//!
//! Lists live in the storage of the calling account and the caller address
//! is bound into every slot, so one account can never reach another
//! account's lists.

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;

use crate::abi::{encode_bool, encode_word, encode_words, ISortedList, ListFunction, SelectorTable};
use crate::config::PrecompileConfig;
use crate::gas::GasMeter;
use crate::list::SortedList;
use crate::storage::{Journal, StorageBackend};
use crate::{Error, Result};

/// What the host tells the precompile about the current call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    /// Invoking account; owns the storage the call reads and writes
    pub caller: Address,
    /// Gas available to this call
    pub gas_limit: u64,
}

impl CallContext {
    pub fn new(caller: Address, gas_limit: u64) -> Self {
        Self { caller, gas_limit }
    }
}

/// Successful call result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecompileOutput {
    pub gas_used: u64,
    pub bytes: Bytes,
}

impl PrecompileOutput {
    pub fn new(gas_used: u64, bytes: impl Into<Bytes>) -> Self {
        Self {
            gas_used,
            bytes: bytes.into(),
        }
    }
}

/// Sorted circular doubly-linked list precompile
#[derive(Debug, Clone)]
pub struct SortedListPrecompile {
    config: PrecompileConfig,
    selectors: SelectorTable<ListFunction>,
}

impl SortedListPrecompile {
    pub fn new(config: PrecompileConfig) -> Self {
        Self {
            config,
            selectors: SelectorTable::for_sorted_list(),
        }
    }

    pub fn config(&self) -> &PrecompileConfig {
        &self.config
    }

    pub fn selectors(&self) -> &SelectorTable<ListFunction> {
        &self.selectors
    }

    /// Resolve the function addressed by `input`
    pub fn resolve(&self, input: &[u8]) -> Result<ListFunction> {
        self.selectors.resolve(input)
    }

    /// Flat base tariff the host charges before execution.
    ///
    /// Unresolvable input is priced as a query; it halts immediately anyway.
    pub fn gas_requirement(&self, input: &[u8]) -> u64 {
        match self.resolve(input) {
            Ok(function) => self.base_gas(function),
            Err(_) => self.config.gas.query_base,
        }
    }

    /// Execute one call against the caller's storage.
    ///
    /// All writes go through a [`Journal`] that is committed only on
    /// success, so a halt leaves `storage` untouched.
    pub fn call<S: StorageBackend>(
        &self,
        input: &[u8],
        ctx: &CallContext,
        storage: &mut S,
    ) -> Result<PrecompileOutput> {
        let function = match self.resolve(input) {
            Ok(function) => function,
            Err(err) => {
                tracing::warn!(target: "scdll", caller = ?ctx.caller, %err, "interface not found");
                metrics::counter!("scdll_halts_total", "reason" => err.code()).increment(1);
                return Err(err);
            }
        };

        tracing::debug!(
            target: "scdll",
            caller = ?ctx.caller,
            function = function.name(),
            gas = ctx.gas_limit,
            calldata_len = input.len(),
            "precompile call invoked"
        );
        metrics::counter!("scdll_calls_total", "function" => function.name()).increment(1);

        let mut journal = Journal::new(storage);
        let result = self.execute(function, &input[4..], ctx, &mut journal);

        match result {
            Ok(output) => {
                let writes = journal.commit();
                tracing::debug!(
                    target: "scdll",
                    function = function.name(),
                    gas_used = output.gas_used,
                    writes,
                    "precompile call succeeded"
                );
                Ok(output)
            }
            Err(err) => {
                tracing::warn!(
                    target: "scdll",
                    function = function.name(),
                    %err,
                    "precompile call halted"
                );
                metrics::counter!("scdll_halts_total", "reason" => err.code()).increment(1);
                Err(err)
            }
        }
    }

    fn base_gas(&self, function: ListFunction) -> u64 {
        if function.is_mutating() {
            self.config.gas.mutation_base
        } else {
            self.config.gas.query_base
        }
    }

    fn execute<S: StorageBackend>(
        &self,
        function: ListFunction,
        payload: &[u8],
        ctx: &CallContext,
        storage: &mut S,
    ) -> Result<PrecompileOutput> {
        let mut meter = GasMeter::new(ctx.gas_limit);
        meter.charge(self.base_gas(function))?;

        let (pointer, argument, hint) = decode_arguments(function, payload)?;
        let mut list = SortedList::new(storage, ctx.caller, pointer)
            .with_limits(self.config.limits)
            .with_gas(self.config.gas.per_hop, meter);

        let bytes = match function {
            ListFunction::Contains => encode_bool(list.contains(argument)),
            ListFunction::Head => encode_word(list.head()),
            ListFunction::List => encode_words(&list.list()?),
            ListFunction::Middle => encode_word(list.middle()?),
            ListFunction::Next => encode_word(list.next(argument)),
            ListFunction::Previous => encode_word(list.previous(argument)),
            ListFunction::Size => encode_word(list.size()),
            ListFunction::Tail => encode_word(list.tail()),
            ListFunction::Remove => encode_bool(list.remove(argument)),
            ListFunction::Insert => encode_bool(list.insert(argument, hint)?),
            ListFunction::Shrink => encode_word(list.shrink(argument)?),
        };

        Ok(PrecompileOutput::new(list.meter().used(), bytes))
    }
}

impl Default for SortedListPrecompile {
    fn default() -> Self {
        Self::new(PrecompileConfig::default())
    }
}

/// Decode `(pointer, index-or-count, hint)`; absent arguments are zero
fn decode_arguments(function: ListFunction, payload: &[u8]) -> Result<(B256, U256, U256)> {
    use ISortedList::*;

    let decoded = match function {
        ListFunction::Contains => {
            let call = containsCall::abi_decode_raw(payload)?;
            (call.pointer, call.index, U256::ZERO)
        }
        ListFunction::Head => (headCall::abi_decode_raw(payload)?.pointer, U256::ZERO, U256::ZERO),
        ListFunction::List => (listCall::abi_decode_raw(payload)?.pointer, U256::ZERO, U256::ZERO),
        ListFunction::Middle => {
            (middleCall::abi_decode_raw(payload)?.pointer, U256::ZERO, U256::ZERO)
        }
        ListFunction::Next => {
            let call = nextCall::abi_decode_raw(payload)?;
            (call.pointer, call.index, U256::ZERO)
        }
        ListFunction::Previous => {
            let call = previousCall::abi_decode_raw(payload)?;
            (call.pointer, call.index, U256::ZERO)
        }
        ListFunction::Size => (sizeCall::abi_decode_raw(payload)?.pointer, U256::ZERO, U256::ZERO),
        ListFunction::Tail => (tailCall::abi_decode_raw(payload)?.pointer, U256::ZERO, U256::ZERO),
        ListFunction::Remove => {
            let call = removeCall::abi_decode_raw(payload)?;
            (call.pointer, call.index, U256::ZERO)
        }
        ListFunction::Insert => {
            let call = insertCall::abi_decode_raw(payload)?;
            (call.pointer, call.index, call.hint)
        }
        ListFunction::Shrink => {
            let call = shrinkCall::abi_decode_raw(payload)?;
            (call.pointer, call.count, U256::ZERO)
        }
    };
    Ok(decoded)
}
