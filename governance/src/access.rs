//! Owner gating for privileged operations.

use crate::error::GovernanceError;
use mgt_types::AccountId;

#[derive(Clone, Debug)]
pub struct Ownership {
    owner: AccountId,
}

impl Ownership {
    pub fn new(owner: AccountId) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    pub fn ensure_owner(&self, caller: &AccountId) -> Result<(), GovernanceError> {
        if *caller != self.owner {
            tracing::warn!(caller = %caller, "privileged call rejected");
            return Err(GovernanceError::NotOwner { caller: *caller });
        }
        Ok(())
    }

    /// Hand ownership to `new_owner`, returning the previous owner.
    pub fn transfer(
        &mut self,
        caller: &AccountId,
        new_owner: AccountId,
    ) -> Result<AccountId, GovernanceError> {
        self.ensure_owner(caller)?;
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }
}
