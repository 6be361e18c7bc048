//! Read path over checkpoint ledgers.
//!
//! Queries never mutate state and never fail on a well-formed ledger. The
//! only error is asking about a unit whose tally is not yet settled.

use crate::checkpoint::CheckpointLedger;
use crate::error::GovernanceError;
use mgt_types::LedgerUnit;

/// Votes of the latest checkpoint, or 0 when there is none.
pub fn current_votes(ledger: Option<&CheckpointLedger>) -> u128 {
    ledger.and_then(|l| l.last()).map_or(0, |c| c.votes)
}

/// Votes held as of the end of `query_unit`.
///
/// Only strictly past units may be queried: operations in the current unit
/// can still change the final tally.
pub fn prior_votes(
    ledger: Option<&CheckpointLedger>,
    query_unit: LedgerUnit,
    now: LedgerUnit,
) -> Result<u128, GovernanceError> {
    if query_unit >= now {
        return Err(GovernanceError::BlockNotYetDetermined {
            requested: query_unit,
            current: now,
        });
    }
    let Some(ledger) = ledger else {
        return Ok(0);
    };
    let entries = ledger.as_slice();
    let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
        return Ok(0);
    };
    if last.unit <= query_unit {
        return Ok(last.votes);
    }
    if first.unit > query_unit {
        return Ok(0);
    }
    // Entries before `idx` all have unit <= query_unit; idx >= 1 because first.unit <= query_unit.
    let idx = entries.partition_point(|c| c.unit <= query_unit);
    Ok(entries[idx - 1].votes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(n: u64) -> LedgerUnit {
        LedgerUnit::new(n)
    }

    fn ledger(points: &[(u64, u128)]) -> CheckpointLedger {
        let mut l = CheckpointLedger::new();
        for &(u, v) in points {
            l.write(unit(u), v);
        }
        l
    }

    #[test]
    fn test_current_votes_empty_is_zero() {
        assert_eq!(current_votes(None), 0);
        assert_eq!(current_votes(Some(&CheckpointLedger::new())), 0);
    }

    #[test]
    fn test_current_votes_is_last_entry() {
        let l = ledger(&[(1, 10), (4, 3)]);
        assert_eq!(current_votes(Some(&l)), 3);
    }

    #[test]
    fn test_prior_rejects_current_and_future_units() {
        let l = ledger(&[(1, 10)]);
        assert_eq!(
            prior_votes(Some(&l), unit(5), unit(5)),
            Err(GovernanceError::BlockNotYetDetermined { requested: unit(5), current: unit(5) })
        );
        assert!(prior_votes(Some(&l), unit(9), unit(5)).is_err());
        assert!(prior_votes(None, unit(5), unit(5)).is_err());
    }

    #[test]
    fn test_prior_before_first_checkpoint_is_zero() {
        let l = ledger(&[(3, 10), (6, 20)]);
        assert_eq!(prior_votes(Some(&l), unit(2), unit(10)).unwrap(), 0);
        assert_eq!(prior_votes(None, unit(2), unit(10)).unwrap(), 0);
    }

    #[test]
    fn test_prior_fast_path_after_last() {
        let l = ledger(&[(3, 10), (6, 20)]);
        assert_eq!(prior_votes(Some(&l), unit(6), unit(10)).unwrap(), 20);
        assert_eq!(prior_votes(Some(&l), unit(9), unit(10)).unwrap(), 20);
    }

    #[test]
    fn test_prior_binary_search_exact_and_between() {
        let l = ledger(&[(2, 5), (4, 15), (7, 0), (9, 30), (12, 8)]);
        let now = unit(20);
        assert_eq!(prior_votes(Some(&l), unit(2), now).unwrap(), 5);
        assert_eq!(prior_votes(Some(&l), unit(3), now).unwrap(), 5);
        assert_eq!(prior_votes(Some(&l), unit(4), now).unwrap(), 15);
        assert_eq!(prior_votes(Some(&l), unit(8), now).unwrap(), 0);
        assert_eq!(prior_votes(Some(&l), unit(9), now).unwrap(), 30);
        assert_eq!(prior_votes(Some(&l), unit(11), now).unwrap(), 30);
    }
}
