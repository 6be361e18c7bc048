//! Vote delegation: entrust an account's whole balance as voting weight.
//!
//! Each account points at zero or one delegate. Delegation is one hop: the
//! weight an account receives is not forwarded when it delegates itself,
//! because delegating moves only the delegator's own balance.
//!
//! Vote movement is split into a fallible [`plan_vote_move`] that validates
//! every write up front and an infallible [`VoteMove::apply`], so an
//! operation that fails leaves no partial checkpoint behind.

use crate::checkpoint::CheckpointBook;
use crate::error::GovernanceError;
use crate::event::TokenEvent;
use mgt_types::{AccountId, LedgerUnit};
use std::collections::HashMap;

/// Manages each account's current delegate.
#[derive(Clone, Debug, Default)]
pub struct DelegationRegistry {
    /// delegator → delegate.
    delegations: HashMap<AccountId, AccountId>,
}

impl DelegationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current delegate for an account (None if not delegated).
    pub fn delegate_of(&self, delegator: &AccountId) -> Option<AccountId> {
        self.delegations.get(delegator).copied()
    }

    /// Point `delegator` at `to` (or at nothing), returning the previous delegate.
    pub fn set(&mut self, delegator: &AccountId, to: Option<AccountId>) -> Option<AccountId> {
        match to {
            Some(to) => self.delegations.insert(*delegator, to),
            None => self.delegations.remove(delegator),
        }
    }
}

/// A validated set of checkpoint writes, all at one unit.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct VoteMove {
    unit: LedgerUnit,
    /// (delegate, previous votes, new votes), source before destination.
    changes: Vec<(AccountId, u128, u128)>,
}

impl VoteMove {
    /// Write every planned checkpoint, returning one votes-changed event per delegate.
    pub fn apply(self, book: &mut CheckpointBook) -> Vec<TokenEvent> {
        let unit = self.unit;
        self.changes
            .into_iter()
            .map(|(delegate, previous_votes, new_votes)| {
                book.write(&delegate, unit, new_votes);
                TokenEvent::DelegateVotesChanged {
                    delegate,
                    previous_votes,
                    new_votes,
                }
            })
            .collect()
    }
}

/// Plan moving `amount` votes from `src` to `dst` at `unit`.
///
/// Nothing moves when `src == dst` or `amount == 0`. A `None` side stands for
/// weight entering (mint) or leaving (burn) the delegated pool.
pub fn plan_vote_move(
    book: &CheckpointBook,
    src: Option<AccountId>,
    dst: Option<AccountId>,
    amount: u128,
    unit: LedgerUnit,
) -> Result<VoteMove, GovernanceError> {
    let mut plan = VoteMove {
        unit,
        changes: Vec::new(),
    };
    if src == dst || amount == 0 {
        return Ok(plan);
    }
    if let Some(src) = src {
        book.ensure_writable(&src, unit)?;
        let old = book.latest_votes(&src);
        let new = old.checked_sub(amount).ok_or(GovernanceError::Overflow)?;
        plan.changes.push((src, old, new));
    }
    if let Some(dst) = dst {
        book.ensure_writable(&dst, unit)?;
        let old = book.latest_votes(&dst);
        let new = old.checked_add(amount).ok_or(GovernanceError::Overflow)?;
        plan.changes.push((dst, old, new));
    }
    Ok(plan)
}
