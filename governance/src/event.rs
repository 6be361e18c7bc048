//! Events emitted by token operations.

use mgt_types::{AccountId, LedgerUnit};
use serde::Serialize;

/// Observable side effects of a successful operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TokenEvent {
    /// An account changed its delegate. `None` is the "no delegate" sentinel.
    DelegateChanged {
        delegator: AccountId,
        from_delegate: Option<AccountId>,
        to_delegate: Option<AccountId>,
    },
    /// A delegate's vote tally changed.
    DelegateVotesChanged {
        delegate: AccountId,
        previous_votes: u128,
        new_votes: u128,
    },
    /// Balance moved. Mint has no `from`, burn has no `to`.
    Transfer {
        from: Option<AccountId>,
        to: Option<AccountId>,
        amount: u128,
    },
    OwnershipTransferred {
        previous_owner: AccountId,
        new_owner: AccountId,
    },
}

/// The outcome of one applied operation: the unit it ran in and its events, in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub unit: LedgerUnit,
    pub events: Vec<TokenEvent>,
}

impl Receipt {
    /// Votes-changed events only.
    pub fn vote_changes(&self) -> impl Iterator<Item = &TokenEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, TokenEvent::DelegateVotesChanged { .. }))
    }
}

/// Synchronous fan-out event bus for token events.
///
/// Listeners are invoked inline after an operation has been fully applied.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&TokenEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&TokenEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &TokenEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn transfer(amount: u128) -> TokenEvent {
        TokenEvent::Transfer {
            from: None,
            to: Some(AccountId::new([1; 20])),
            amount,
        }
    }

    #[test]
    fn emit_reaches_every_listener() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut bus = EventBus::new();
        for tag in 0..2u8 {
            let seen = Arc::clone(&seen);
            bus.subscribe(Box::new(move |e| seen.lock().unwrap().push((tag, e.clone()))));
        }
        bus.emit(&transfer(5));
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], (0, transfer(5)));
        assert_eq!(seen[1], (1, transfer(5)));
    }

    #[test]
    fn receipt_filters_vote_changes() {
        let receipt = Receipt {
            unit: LedgerUnit::new(1),
            events: vec![
                transfer(5),
                TokenEvent::DelegateVotesChanged {
                    delegate: AccountId::new([2; 20]),
                    previous_votes: 0,
                    new_votes: 5,
                },
            ],
        };
        assert_eq!(receipt.vote_changes().count(), 1);
    }

    #[test]
    fn events_serialize_with_tag() {
        let json = serde_json::to_value(transfer(3)).unwrap();
        assert_eq!(json["event"], "transfer");
        assert_eq!(json["amount"], 3);
        assert!(json["from"].is_null());
    }
}
