//! Per-connection subscription manager.
//!
//! Tracks which account ids a WebSocket client is subscribed to and
//! provides server-side event filtering.

use std::collections::HashSet;

use crate::domain::AccountId;

/// Manages the set of account subscriptions for a single WebSocket
/// connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed account ids. If `subscribe_all` is true, this set is ignored.
    account_ids: HashSet<AccountId>,
    /// Whether the client subscribes to all accounts (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds account ids to the subscription set. `wildcard` enables the
    /// match-everything mode.
    pub fn subscribe(&mut self, ids: &[AccountId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        for id in ids {
            self.account_ids.insert(*id);
        }
    }

    /// Removes account ids from the subscription set.
    pub fn unsubscribe(&mut self, ids: &[AccountId]) {
        for id in ids {
            self.account_ids.remove(id);
        }
    }

    /// Returns `true` if the given account id matches the subscription filter.
    #[must_use]
    pub fn matches(&self, account_id: AccountId) -> bool {
        self.subscribe_all || self.account_ids.contains(&account_id)
    }

    /// Returns the number of explicitly subscribed account ids.
    #[must_use]
    pub fn count(&self) -> usize {
        self.account_ids.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}
