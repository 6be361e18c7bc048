//! Block clock: the unit source used when a host sequences operations itself.

use mgt_types::{Clock, LedgerUnit};
use std::sync::atomic::{AtomicU64, Ordering};

/// A clock that only moves when its owner mines a unit.
///
/// The host keeps a shared handle (for instance an `Arc<BlockClock>`) and
/// calls [`mine`](Self::mine) after each operation it submits, the way an
/// auto-mining chain seals one block per transaction.
#[derive(Debug)]
pub struct BlockClock {
    current: AtomicU64,
}

impl BlockClock {
    pub fn new(start: LedgerUnit) -> Self {
        Self {
            current: AtomicU64::new(start.get()),
        }
    }

    /// Seal the current unit and return the new current one.
    pub fn mine(&self) -> LedgerUnit {
        self.mine_many(1)
    }

    /// Seal `n` units at once.
    pub fn mine_many(&self, n: u64) -> LedgerUnit {
        let previous = self
            .current
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |u| Some(u.saturating_add(n)))
            .unwrap_or_else(|u| u);
        LedgerUnit::new(previous).advanced_by(n)
    }
}

impl Default for BlockClock {
    fn default() -> Self {
        Self::new(LedgerUnit::new(1))
    }
}

impl Clock for BlockClock {
    fn current_unit(&self) -> LedgerUnit {
        LedgerUnit::new(self.current.load(Ordering::SeqCst))
    }
}
