//! Ledger unit: the ordering key under which operations are sequenced.
//!
//! A unit plays the role of a block number: every operation is stamped with
//! the unit it executed in, and historical queries are answered per unit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A monotonically non-decreasing sequence number.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LedgerUnit(u64);

impl LedgerUnit {
    pub fn new(unit: u64) -> Self {
        Self(unit)
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// The unit `n` steps after this one, saturating at `u64::MAX`.
    pub fn advanced_by(&self, n: u64) -> Self {
        Self(self.0.saturating_add(n))
    }
}

impl From<u64> for LedgerUnit {
    fn from(unit: u64) -> Self {
        Self(unit)
    }
}

impl fmt::Display for LedgerUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
