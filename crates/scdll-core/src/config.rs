//! Precompile configuration: capacity, traversal ceiling and gas schedule

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_HOPS, MAX_SIZE, MUTATION_BASE_GAS, PER_HOP_GAS, QUERY_BASE_GAS};
use crate::{Error, Result};

/// Bounds that protect the host from unbounded work inside one call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum number of nodes in a single list; inserts beyond it return false
    pub max_size: u64,
    /// Maximum number of hops a single call may walk before halting
    pub max_hops: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_size: MAX_SIZE,
            max_hops: MAX_HOPS,
        }
    }
}

/// Gas tariffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GasSchedule {
    /// Flat base cost of insert, remove and shrink
    pub mutation_base: u64,
    /// Flat base cost of read-only functions
    pub query_base: u64,
    /// Metered cost of every traversal hop
    pub per_hop: u64,
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            mutation_base: MUTATION_BASE_GAS,
            query_base: QUERY_BASE_GAS,
            per_hop: PER_HOP_GAS,
        }
    }
}

/// Full precompile configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrecompileConfig {
    pub limits: Limits,
    pub gas: GasSchedule,
}

impl PrecompileConfig {
    /// Config with a custom traversal ceiling, everything else default
    pub fn with_max_hops(max_hops: u64) -> Self {
        Self {
            limits: Limits {
                max_hops,
                ..Limits::default()
            },
            ..Self::default()
        }
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations under which no list could ever be used
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_size == 0 {
            return Err(Error::InvalidConfig("max_size must be > 0".into()));
        }
        if self.limits.max_hops == 0 {
            return Err(Error::InvalidConfig("max_hops must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_matches_constants() {
        let config = PrecompileConfig::default();
        assert_eq!(config.limits.max_size, 5_000_000);
        assert_eq!(config.gas.mutation_base, 5_000);
        assert_eq!(config.gas.query_base, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: PrecompileConfig =
            serde_json::from_str(r#"{"limits":{"max_hops":16}}"#).unwrap();
        assert_eq!(config.limits.max_hops, 16);
        assert_eq!(config.limits.max_size, MAX_SIZE);
        assert_eq!(config.gas, GasSchedule::default());
    }

    #[test]
    fn test_load_rejects_zero_limits() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"limits":{{"max_size":0}}}}"#).unwrap();

        let err = PrecompileConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_load_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"gas":{{"per_hop":7}}}}"#).unwrap();

        let config = PrecompileConfig::load(file.path()).unwrap();
        assert_eq!(config.gas.per_hop, 7);
        assert_eq!(config.limits, Limits::default());
    }
}
