//! The clock capability.
//!
//! The ledger never reads time on its own. Whoever sequences operations
//! decides which unit is current and hands the ledger a [`Clock`].

use crate::unit::LedgerUnit;
use std::rc::Rc;
use std::sync::Arc;

/// Source of the current ledger unit.
///
/// Implementations must never return a unit lower than one previously
/// returned.
pub trait Clock {
    fn current_unit(&self) -> LedgerUnit;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn current_unit(&self) -> LedgerUnit {
        (**self).current_unit()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn current_unit(&self) -> LedgerUnit {
        (**self).current_unit()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn current_unit(&self) -> LedgerUnit {
        (**self).current_unit()
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn current_unit(&self) -> LedgerUnit {
        (**self).current_unit()
    }
}
