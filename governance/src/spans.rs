//! Pre-built [`tracing::Span`] constructors for token operations.
//!
//! Consistent span names and field sets make it easy to filter and
//! correlate operations in any tracing backend.

use mgt_types::{AccountId, LedgerUnit};
use tracing::{info_span, Span};

/// Span covering a mint or burn.
pub fn supply_span(op: &'static str, account: &AccountId, unit: LedgerUnit) -> Span {
    info_span!("supply", op, account = %account, unit = %unit)
}

/// Span covering a delegation change.
pub fn delegate_span(delegator: &AccountId, unit: LedgerUnit) -> Span {
    info_span!("delegate", delegator = %delegator, unit = %unit)
}
