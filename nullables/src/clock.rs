//! Nullable clock: deterministic ledger units for testing.

use mgt_types::{Clock, LedgerUnit};
use std::cell::Cell;

/// A deterministic clock for testing.
///
/// The unit only advances when you tell it to. `set` may move the clock
/// backwards, which lets tests exercise the ledger's regression guard.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_unit: u64) -> Self {
        Self {
            current: Cell::new(initial_unit),
        }
    }

    /// Get the current unit.
    pub fn now(&self) -> LedgerUnit {
        LedgerUnit::new(self.current.get())
    }

    /// Advance by a number of units.
    pub fn advance(&self, units: u64) {
        self.current.set(self.current.get() + units);
    }

    /// Set the unit to a specific value.
    pub fn set(&self, unit: u64) {
        self.current.set(unit);
    }
}

impl Default for NullClock {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Clock for NullClock {
    fn current_unit(&self) -> LedgerUnit {
        self.now()
    }
}
