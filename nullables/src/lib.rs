//! Nullable infrastructure for deterministic testing.
//!
//! The ledger's only external dependency is its clock. This crate provides a
//! test-friendly implementation that:
//! - Returns deterministic units
//! - Can be controlled programmatically
//!
//! Usage: swap the production clock for a [`NullClock`] in tests.

pub mod clock;

pub use clock::NullClock;
