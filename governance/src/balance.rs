//! Raw balances and total supply.
//!
//! The store only does arithmetic. Authorization lives in
//! [`Ownership`](crate::access::Ownership) and vote accounting in
//! [`delegation`](crate::delegation); the token sequences the three.

use crate::error::GovernanceError;
use mgt_types::AccountId;
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct BalanceStore {
    balances: HashMap<AccountId, u128>,
    total_supply: u128,
}

impl BalanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: &AccountId) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Increase `account`'s balance and the total supply by `amount`.
    ///
    /// Both sums are checked before either is stored.
    pub fn credit(&mut self, account: &AccountId, amount: u128) -> Result<(), GovernanceError> {
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(GovernanceError::Overflow)?;
        let balance = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(GovernanceError::Overflow)?;
        self.total_supply = supply;
        if balance != 0 {
            self.balances.insert(*account, balance);
        }
        Ok(())
    }

    /// Check that `account` holds at least `amount`.
    pub fn ensure_covers(&self, account: &AccountId, amount: u128) -> Result<(), GovernanceError> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(GovernanceError::InsufficientBalance {
                account: *account,
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    /// Decrease `account`'s balance and the total supply by `amount`.
    pub fn debit(&mut self, account: &AccountId, amount: u128) -> Result<(), GovernanceError> {
        self.ensure_covers(account, amount)?;
        let balance = self.balance_of(account) - amount;
        // Supply is the sum of all balances, so it covers any single balance.
        self.total_supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(GovernanceError::Overflow)?;
        if balance == 0 {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, balance);
        }
        Ok(())
    }

    pub fn holders(&self) -> impl Iterator<Item = (&AccountId, &u128)> {
        self.balances.iter()
    }
}
