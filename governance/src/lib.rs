//! Delegated voting power for the MGT governance token.
//!
//! Every holder may delegate its whole balance to one account. Each delegate
//! keeps an append-only checkpoint history so that "how many votes did D
//! hold at unit T?" is answered by binary search, deterministically, for any
//! past unit.
//!
//! Key principle: votes follow balances. Minting, burning and re-delegating
//! all move weight through one validated checkpoint write path.

pub mod access;
pub mod balance;
pub mod checkpoint;
pub mod clock;
pub mod delegation;
pub mod error;
pub mod event;
pub mod params;
pub mod query;
pub mod spans;
pub mod token;

pub use access::Ownership;
pub use balance::BalanceStore;
pub use checkpoint::{Checkpoint, CheckpointBook, CheckpointLedger};
pub use clock::BlockClock;
pub use delegation::{plan_vote_move, DelegationRegistry, VoteMove};
pub use error::GovernanceError;
pub use event::{EventBus, Receipt, TokenEvent};
pub use params::TokenMetadata;
pub use token::GovToken;
