//! Sorted List Precompile CLI
//!
//! Runs single precompile calls against a JSON state file so lists survive
//! between invocations.
//!
//! Usage:
//!   scdll --caller 0x...01 insert 7 42
//!   scdll list 7
//!   scdll --gas 20000 shrink 7 3
//!   scdll call --data 0x949d225d...
//!   RUST_LOG=scdll=debug scdll middle 7

use std::path::PathBuf;

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{SolCall, SolValue};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use scdll_core::{
    function_selector, CallContext, ISortedList, IValueStore, PrecompileConfig,
    SortedListPrecompile, ValueStorePrecompile,
};
use tracing_subscriber::EnvFilter;

mod state;

#[derive(Parser, Debug)]
#[command(name = "scdll")]
#[command(about = "Call the sorted list and value store precompiles against a local state file")]
struct Args {
    /// JSON state file, created on first write
    #[arg(long, global = true, default_value = "state.json")]
    state: PathBuf,

    /// Precompile config (JSON); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Invoking account; lists are scoped to it
    #[arg(long, global = true, default_value = "0x0000000000000000000000000000000000000001")]
    caller: Address,

    /// Gas limit for the call
    #[arg(long, global = true, default_value_t = 10_000_000)]
    gas: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Insert an index, keeping ascending order
    Insert {
        #[arg(value_parser = parse_pointer)]
        pointer: B256,
        index: U256,
        /// Present node to start the search from
        #[arg(long, default_value = "0")]
        hint: U256,
    },
    /// Remove an index
    Remove {
        #[arg(value_parser = parse_pointer)]
        pointer: B256,
        index: U256,
    },
    /// Remove up to `count` indices from the tail
    Shrink {
        #[arg(value_parser = parse_pointer)]
        pointer: B256,
        count: U256,
    },
    Contains {
        #[arg(value_parser = parse_pointer)]
        pointer: B256,
        index: U256,
    },
    Next {
        #[arg(value_parser = parse_pointer)]
        pointer: B256,
        index: U256,
    },
    Previous {
        #[arg(value_parser = parse_pointer)]
        pointer: B256,
        index: U256,
    },
    Head {
        #[arg(value_parser = parse_pointer)]
        pointer: B256,
    },
    Tail {
        #[arg(value_parser = parse_pointer)]
        pointer: B256,
    },
    Size {
        #[arg(value_parser = parse_pointer)]
        pointer: B256,
    },
    Middle {
        #[arg(value_parser = parse_pointer)]
        pointer: B256,
    },
    /// Print every index in ascending order
    List {
        #[arg(value_parser = parse_pointer)]
        pointer: B256,
    },
    /// Read the value store
    Get,
    /// Write the value store
    Set { value: U256 },
    /// Send raw calldata
    Call {
        /// Hex calldata, selector first
        #[arg(long)]
        data: String,
        #[arg(long, value_enum, default_value_t = Target::List)]
        target: Target,
    },
    /// Print the selector table
    Selectors,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    List,
    ValueStore,
}

/// How to render the return data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Returns {
    Bool,
    Word,
    Words,
    Nothing,
    Raw,
}

/// Accepts a decimal or 0x-prefixed number, left-padded to 32 bytes
fn parse_pointer(s: &str) -> Result<B256, String> {
    let value: U256 = s.parse().map_err(|e| format!("invalid pointer {s:?}: {e}"))?;
    Ok(B256::from(value.to_be_bytes::<32>()))
}

impl Command {
    /// Calldata for this command, or `None` for local-only commands
    fn calldata(&self) -> Result<Option<(Target, Vec<u8>, Returns)>> {
        use ISortedList::*;

        let call = match *self {
            Command::Insert { pointer, index, hint } => (
                Target::List,
                insertCall { pointer, index, hint }.abi_encode(),
                Returns::Bool,
            ),
            Command::Remove { pointer, index } => (
                Target::List,
                removeCall { pointer, index }.abi_encode(),
                Returns::Bool,
            ),
            Command::Shrink { pointer, count } => (
                Target::List,
                shrinkCall { pointer, count }.abi_encode(),
                Returns::Word,
            ),
            Command::Contains { pointer, index } => (
                Target::List,
                containsCall { pointer, index }.abi_encode(),
                Returns::Bool,
            ),
            Command::Next { pointer, index } => (
                Target::List,
                nextCall { pointer, index }.abi_encode(),
                Returns::Word,
            ),
            Command::Previous { pointer, index } => (
                Target::List,
                previousCall { pointer, index }.abi_encode(),
                Returns::Word,
            ),
            Command::Head { pointer } => {
                (Target::List, headCall { pointer }.abi_encode(), Returns::Word)
            }
            Command::Tail { pointer } => {
                (Target::List, tailCall { pointer }.abi_encode(), Returns::Word)
            }
            Command::Size { pointer } => {
                (Target::List, sizeCall { pointer }.abi_encode(), Returns::Word)
            }
            Command::Middle { pointer } => {
                (Target::List, middleCall { pointer }.abi_encode(), Returns::Word)
            }
            Command::List { pointer } => {
                (Target::List, listCall { pointer }.abi_encode(), Returns::Words)
            }
            Command::Get => (
                Target::ValueStore,
                IValueStore::getCall {}.abi_encode(),
                Returns::Word,
            ),
            Command::Set { value } => (
                Target::ValueStore,
                IValueStore::setCall { value }.abi_encode(),
                Returns::Nothing,
            ),
            Command::Call { ref data, target } => {
                let bytes = hex::decode(data.trim_start_matches("0x"))
                    .context("calldata is not valid hex")?;
                (target, bytes, Returns::Raw)
            }
            Command::Selectors => return Ok(None),
        };
        Ok(Some(call))
    }
}

fn render(returns: Returns, bytes: &[u8]) -> Result<String> {
    let rendered = match returns {
        Returns::Bool => bool::abi_decode(bytes)?.to_string(),
        Returns::Word => U256::abi_decode(bytes)?.to_string(),
        Returns::Words => {
            let words = Vec::<U256>::abi_decode(bytes)?;
            let words: Vec<String> = words.iter().map(ToString::to_string).collect();
            format!("[{}]", words.join(", "))
        }
        Returns::Nothing => String::new(),
        Returns::Raw => format!("0x{}", hex::encode(bytes)),
    };
    Ok(rendered)
}

fn print_selectors(precompile: &SortedListPrecompile) {
    println!("ISortedList");
    for (selector, function) in precompile.selectors().entries() {
        println!("  0x{}  {}", hex::encode(selector), function.signature());
    }
    println!("IValueStore");
    for signature in ["get()", "set(uint256)"] {
        println!("  0x{}  {}", hex::encode(function_selector(signature)), signature);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PrecompileConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PrecompileConfig::default(),
    };
    let list_precompile = SortedListPrecompile::new(config);
    let value_store = ValueStorePrecompile::new();

    let Some((target, calldata, returns)) = args.command.calldata()? else {
        print_selectors(&list_precompile);
        return Ok(());
    };

    let mut storage = state::load(&args.state)?;
    let before = storage.clone();
    let ctx = CallContext::new(args.caller, args.gas);

    let result = match target {
        Target::List => list_precompile.call(&calldata, &ctx, &mut storage),
        Target::ValueStore => value_store.call(&calldata, &ctx, &mut storage),
    };
    let output = result.map_err(|err| anyhow::anyhow!("call halted [{}]: {err}", err.code()))?;

    tracing::info!(
        caller = %args.caller,
        gas_used = output.gas_used,
        "call succeeded"
    );

    if storage != before {
        state::save(&args.state, &storage)?;
    }

    let rendered = render(returns, &output.bytes)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}
