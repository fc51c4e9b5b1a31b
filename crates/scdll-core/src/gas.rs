//! Gas metering during execution

use crate::{Error, Result};

/// Tracks gas consumed by one call against the caller-supplied limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasMeter {
    limit: u64,
    used: u64,
}

impl GasMeter {
    pub fn new(limit: u64) -> Self {
        Self { limit, used: 0 }
    }

    /// Meter that never runs out, for direct engine use outside a call
    pub fn unlimited() -> Self {
        Self::new(u64::MAX)
    }

    /// Charge `amount`, failing with [`Error::OutOfGas`] once the limit is crossed.
    ///
    /// A failed charge still records the overflow so `used()` reports what
    /// the call would have needed.
    pub fn charge(&mut self, amount: u64) -> Result<()> {
        self.used = self.used.saturating_add(amount);
        if self.used > self.limit {
            return Err(Error::OutOfGas {
                required: self.used,
                limit: self.limit,
            });
        }
        Ok(())
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.used)
    }
}
