use mgt_types::{AccountId, LedgerUnit};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("caller {caller} is not the owner")]
    NotOwner { caller: AccountId },

    #[error("insufficient balance for {account}: need {needed}, have {available}")]
    InsufficientBalance {
        account: AccountId,
        needed: u128,
        available: u128,
    },

    #[error("votes at {requested} not yet determined (current unit {current})")]
    BlockNotYetDetermined {
        requested: LedgerUnit,
        current: LedgerUnit,
    },

    #[error("clock regressed: last checkpoint at {last}, clock reports {current}")]
    ClockRegression {
        last: LedgerUnit,
        current: LedgerUnit,
    },

    #[error("arithmetic overflow in vote or supply accounting")]
    Overflow,
}
