//! Fundamental types for the MGT voting-power ledger.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! account identifiers, ledger units, and the clock capability that orders operations.

pub mod address;
pub mod clock;
pub mod error;
pub mod unit;

pub use address::AccountId;
pub use clock::Clock;
pub use error::TypesError;
pub use unit::LedgerUnit;
