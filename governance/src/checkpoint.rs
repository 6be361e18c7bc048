//! Per-delegate checkpoint history.
//!
//! Each delegate owns an append-only sequence of `(unit, votes)` pairs with
//! strictly increasing units. A write in the unit of the last entry
//! overwrites that entry instead of appending, so a ledger grows by at most
//! one entry per distinct unit.

use crate::error::GovernanceError;
use mgt_types::{AccountId, LedgerUnit};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A delegate's voting power from `unit` onwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub unit: LedgerUnit,
    pub votes: u128,
}

/// Ordered checkpoint history of a single delegate.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CheckpointLedger {
    entries: Vec<Checkpoint>,
}

impl CheckpointLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Checkpoint> {
        self.entries.get(index)
    }

    pub fn first(&self) -> Option<&Checkpoint> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&Checkpoint> {
        self.entries.last()
    }

    pub fn as_slice(&self) -> &[Checkpoint] {
        &self.entries
    }

    /// Fails if writing at `unit` would place an entry before the last one.
    pub fn ensure_writable(&self, unit: LedgerUnit) -> Result<(), GovernanceError> {
        match self.entries.last() {
            Some(last) if unit < last.unit => Err(GovernanceError::ClockRegression {
                last: last.unit,
                current: unit,
            }),
            _ => Ok(()),
        }
    }

    /// Record `votes` at `unit`, coalescing with the last entry if it shares the unit.
    ///
    /// Callers must have checked [`ensure_writable`](Self::ensure_writable) first.
    pub fn write(&mut self, unit: LedgerUnit, votes: u128) {
        match self.entries.last_mut() {
            Some(last) if last.unit == unit => {
                tracing::trace!(unit = %unit, votes, "coalescing checkpoint");
                last.votes = votes;
            }
            _ => self.entries.push(Checkpoint { unit, votes }),
        }
    }
}

/// All delegates' ledgers, created lazily on first write.
#[derive(Clone, Debug, Default)]
pub struct CheckpointBook {
    ledgers: HashMap<AccountId, CheckpointLedger>,
}

impl CheckpointBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self, delegate: &AccountId) -> Option<&CheckpointLedger> {
        self.ledgers.get(delegate)
    }

    /// Latest votes of `delegate`, or 0 if it has never been written.
    pub fn latest_votes(&self, delegate: &AccountId) -> u128 {
        self.ledgers
            .get(delegate)
            .and_then(|l| l.last())
            .map_or(0, |c| c.votes)
    }

    pub fn ensure_writable(
        &self,
        delegate: &AccountId,
        unit: LedgerUnit,
    ) -> Result<(), GovernanceError> {
        match self.ledgers.get(delegate) {
            Some(ledger) => ledger.ensure_writable(unit),
            None => Ok(()),
        }
    }

    pub fn write(&mut self, delegate: &AccountId, unit: LedgerUnit, votes: u128) {
        tracing::debug!(delegate = %delegate, unit = %unit, votes, "writing checkpoint");
        self.ledgers.entry(*delegate).or_default().write(unit, votes);
    }

    /// Iterate over every delegate that has a ledger.
    pub fn delegates(&self) -> impl Iterator<Item = &AccountId> {
        self.ledgers.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(n: u64) -> LedgerUnit {
        LedgerUnit::new(n)
    }

    #[test]
    fn test_append_in_distinct_units() {
        let mut ledger = CheckpointLedger::new();
        ledger.write(unit(1), 10);
        ledger.write(unit(2), 20);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.first().unwrap().votes, 10);
        assert_eq!(ledger.last().unwrap(), &Checkpoint { unit: unit(2), votes: 20 });
    }

    #[test]
    fn test_same_unit_overwrites_last() {
        let mut ledger = CheckpointLedger::new();
        ledger.write(unit(3), 10);
        ledger.write(unit(3), 25);
        ledger.write(unit(3), 5);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.last().unwrap().votes, 5);
    }

    #[test]
    fn test_coalescing_only_touches_last_entry() {
        let mut ledger = CheckpointLedger::new();
        ledger.write(unit(1), 10);
        ledger.write(unit(2), 20);
        ledger.write(unit(2), 30);
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(0).unwrap().votes, 10);
        assert_eq!(ledger.get(1).unwrap().votes, 30);
    }

    #[test]
    fn test_regression_rejected() {
        let mut ledger = CheckpointLedger::new();
        ledger.write(unit(5), 1);
        assert!(ledger.ensure_writable(unit(5)).is_ok());
        assert!(ledger.ensure_writable(unit(6)).is_ok());
        assert_eq!(
            ledger.ensure_writable(unit(4)),
            Err(GovernanceError::ClockRegression { last: unit(5), current: unit(4) })
        );
    }

    #[test]
    fn test_empty_ledger_is_always_writable() {
        assert!(CheckpointLedger::new().ensure_writable(unit(0)).is_ok());
    }

    #[test]
    fn test_book_creates_ledgers_lazily() {
        let mut book = CheckpointBook::new();
        let d = AccountId::new([7; 20]);
        assert!(book.ledger(&d).is_none());
        assert_eq!(book.latest_votes(&d), 0);
        assert!(book.ensure_writable(&d, unit(0)).is_ok());

        book.write(&d, unit(1), 40);
        assert_eq!(book.ledger(&d).unwrap().len(), 1);
        assert_eq!(book.latest_votes(&d), 40);
        assert_eq!(book.delegates().count(), 1);
    }
}
