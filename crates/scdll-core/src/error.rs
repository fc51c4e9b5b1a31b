//! Precompile error types

use thiserror::Error;

/// Why the host must halt the call.
///
/// Mirrors the two exceptional halts a precompile can signal: a generic
/// precompile failure, or exhaustion of the gas the caller supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    PrecompileError,
    OutOfGas,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Empty call data")]
    EmptyInput,

    #[error("Unknown function selector 0x{}", hex::encode(.0))]
    UnknownSelector([u8; 4]),

    #[error("Invalid call data: {0}")]
    InvalidCalldata(String),

    #[error("Index 0 is reserved for the sentinel")]
    InvalidIndex,

    #[error("Traversal exceeded the limit of {limit} hops")]
    TraversalLimitExceeded { limit: u64 },

    #[error("Out of gas: required {required}, limit {limit}")]
    OutOfGas { required: u64, limit: u64 },

    #[error("Corrupted list: {0}")]
    CorruptedList(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Halt reason reported to the host for this error
    pub fn halt_reason(&self) -> HaltReason {
        match self {
            Error::OutOfGas { .. } => HaltReason::OutOfGas,
            _ => HaltReason::PrecompileError,
        }
    }

    /// Short stable code, used as a metrics label
    pub fn code(&self) -> &'static str {
        match self {
            Error::EmptyInput => "EMPTY_INPUT",
            Error::UnknownSelector(_) => "UNKNOWN_SELECTOR",
            Error::InvalidCalldata(_) => "INVALID_CALLDATA",
            Error::InvalidIndex => "INVALID_INDEX",
            Error::TraversalLimitExceeded { .. } => "TRAVERSAL_LIMIT_EXCEEDED",
            Error::OutOfGas { .. } => "OUT_OF_GAS",
            Error::CorruptedList(_) => "CORRUPTED_LIST",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}

impl From<alloy_sol_types::Error> for Error {
    fn from(err: alloy_sol_types::Error) -> Self {
        Error::InvalidCalldata(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_halt_reason_mapping() {
        let oog = Error::OutOfGas {
            required: 10,
            limit: 5,
        };
        assert_eq!(oog.halt_reason(), HaltReason::OutOfGas);
        assert_eq!(Error::EmptyInput.halt_reason(), HaltReason::PrecompileError);
        assert_eq!(
            Error::TraversalLimitExceeded { limit: 3 }.halt_reason(),
            HaltReason::PrecompileError
        );
    }

    #[test]
    fn test_unknown_selector_display() {
        let err = Error::UnknownSelector([0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(err.to_string(), "Unknown function selector 0xdeadbeef");
        assert_eq!(err.code(), "UNKNOWN_SELECTOR");
    }
}
