//! The governance token: the single store object every operation goes through.
//!
//! Balances, delegation pointers and checkpoint ledgers are only ever
//! changed together here. Each mutating operation validates everything it
//! needs (authorization, balances, clock ordering, arithmetic) before its
//! first write, so an `Err` means nothing changed and no event was emitted.

use crate::access::Ownership;
use crate::balance::BalanceStore;
use crate::checkpoint::{Checkpoint, CheckpointBook};
use crate::delegation::{plan_vote_move, DelegationRegistry};
use crate::error::GovernanceError;
use crate::event::{EventBus, Receipt, TokenEvent};
use crate::params::TokenMetadata;
use crate::query;
use crate::spans;
use mgt_types::{AccountId, Clock, LedgerUnit};

pub struct GovToken<C: Clock> {
    metadata: TokenMetadata,
    ownership: Ownership,
    balances: BalanceStore,
    delegations: DelegationRegistry,
    checkpoints: CheckpointBook,
    clock: C,
    bus: EventBus,
}

impl<C: Clock> GovToken<C> {
    pub fn new(owner: AccountId, metadata: TokenMetadata, clock: C) -> Self {
        Self {
            metadata,
            ownership: Ownership::new(owner),
            balances: BalanceStore::new(),
            delegations: DelegationRegistry::new(),
            checkpoints: CheckpointBook::new(),
            clock,
            bus: EventBus::new(),
        }
    }

    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }

    pub fn owner(&self) -> AccountId {
        self.ownership.owner()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Register a listener that sees every event of every applied operation.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&TokenEvent) + Send + Sync>) {
        self.bus.subscribe(listener);
    }

    // ── Mutations ──────────────────────────────────────────────────────

    /// Create `amount` new tokens for `to`. Owner only.
    pub fn mint(
        &mut self,
        caller: &AccountId,
        to: &AccountId,
        amount: u128,
    ) -> Result<Receipt, GovernanceError> {
        let unit = self.clock.current_unit();
        let _span = spans::supply_span("mint", to, unit).entered();
        self.ownership.ensure_owner(caller)?;

        let delegate = self.delegations.delegate_of(to);
        let votes = plan_vote_move(&self.checkpoints, None, delegate, amount, unit)?;
        self.balances.credit(to, amount)?;

        let mut events = vec![TokenEvent::Transfer {
            from: None,
            to: Some(*to),
            amount,
        }];
        events.extend(votes.apply(&mut self.checkpoints));
        tracing::debug!(amount, supply = self.balances.total_supply(), "minted");
        Ok(self.finish(unit, events))
    }

    /// Destroy `amount` of `from`'s tokens. Owner only.
    pub fn burn(
        &mut self,
        caller: &AccountId,
        from: &AccountId,
        amount: u128,
    ) -> Result<Receipt, GovernanceError> {
        let unit = self.clock.current_unit();
        let _span = spans::supply_span("burn", from, unit).entered();
        self.ownership.ensure_owner(caller)?;
        self.balances.ensure_covers(from, amount)?;

        let delegate = self.delegations.delegate_of(from);
        let votes = plan_vote_move(&self.checkpoints, delegate, None, amount, unit)?;
        self.balances.debit(from, amount)?;

        let mut events = vec![TokenEvent::Transfer {
            from: Some(*from),
            to: None,
            amount,
        }];
        events.extend(votes.apply(&mut self.checkpoints));
        tracing::debug!(amount, supply = self.balances.total_supply(), "burned");
        Ok(self.finish(unit, events))
    }

    /// Delegate `caller`'s entire balance to `to`.
    pub fn delegate(
        &mut self,
        caller: &AccountId,
        to: &AccountId,
    ) -> Result<Receipt, GovernanceError> {
        self.redelegate(caller, Some(*to))
    }

    /// Withdraw `caller`'s delegation; its balance stops counting as votes.
    pub fn undelegate(&mut self, caller: &AccountId) -> Result<Receipt, GovernanceError> {
        self.redelegate(caller, None)
    }

    /// Hand the owner role to `new_owner`. Owner only.
    pub fn transfer_ownership(
        &mut self,
        caller: &AccountId,
        new_owner: &AccountId,
    ) -> Result<Receipt, GovernanceError> {
        let unit = self.clock.current_unit();
        let previous_owner = self.ownership.transfer(caller, *new_owner)?;
        tracing::debug!(from = %previous_owner, to = %new_owner, "ownership transferred");
        let events = vec![TokenEvent::OwnershipTransferred {
            previous_owner,
            new_owner: *new_owner,
        }];
        Ok(self.finish(unit, events))
    }

    fn redelegate(
        &mut self,
        caller: &AccountId,
        to: Option<AccountId>,
    ) -> Result<Receipt, GovernanceError> {
        let unit = self.clock.current_unit();
        let _span = spans::delegate_span(caller, unit).entered();
        let from = self.delegations.delegate_of(caller);
        let balance = self.balances.balance_of(caller);
        let votes = plan_vote_move(&self.checkpoints, from, to, balance, unit)?;

        self.delegations.set(caller, to);
        let mut events = vec![TokenEvent::DelegateChanged {
            delegator: *caller,
            from_delegate: from,
            to_delegate: to,
        }];
        events.extend(votes.apply(&mut self.checkpoints));
        tracing::debug!(?from, ?to, balance, "delegate changed");
        Ok(self.finish(unit, events))
    }

    fn finish(&self, unit: LedgerUnit, events: Vec<TokenEvent>) -> Receipt {
        for event in &events {
            self.bus.emit(event);
        }
        Receipt { unit, events }
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances.balance_of(account)
    }

    pub fn total_supply(&self) -> u128 {
        self.balances.total_supply()
    }

    pub fn delegates(&self, account: &AccountId) -> Option<AccountId> {
        self.delegations.delegate_of(account)
    }

    pub fn get_current_votes(&self, account: &AccountId) -> u128 {
        query::current_votes(self.checkpoints.ledger(account))
    }

    /// Votes `account` held at the end of `unit`, which must be strictly in the past.
    pub fn get_prior_votes(
        &self,
        account: &AccountId,
        unit: LedgerUnit,
    ) -> Result<u128, GovernanceError> {
        query::prior_votes(
            self.checkpoints.ledger(account),
            unit,
            self.clock.current_unit(),
        )
    }

    pub fn num_checkpoints(&self, account: &AccountId) -> usize {
        self.checkpoints.ledger(account).map_or(0, |l| l.len())
    }

    pub fn checkpoint(&self, account: &AccountId, index: usize) -> Option<Checkpoint> {
        self.checkpoints
            .ledger(account)
            .and_then(|l| l.get(index))
            .copied()
    }

    /// Sum of the latest votes of every delegate.
    pub fn total_delegated_votes(&self) -> u128 {
        self.checkpoints
            .delegates()
            .map(|d| self.checkpoints.latest_votes(d))
            .sum()
    }

    /// Total balance held by accounts with no delegate.
    pub fn undelegated_supply(&self) -> u128 {
        self.balances
            .holders()
            .filter(|(account, _)| self.delegations.delegate_of(account).is_none())
            .map(|(_, balance)| *balance)
            .sum()
    }
}
