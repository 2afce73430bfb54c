//! Concurrent account storage with per-account fine-grained locking.
//!
//! [`Ledger`] stores all open accounts in a `HashMap` where each entry is
//! individually protected by a [`tokio::sync::RwLock`]. This allows
//! concurrent reads on the same account and concurrent writes on different
//! accounts, while mutations on one account serialize.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::AccountId;
use super::account::Account;
use crate::error::GatewayError;

/// Central store for all open accounts.
///
/// Uses a `RwLock<HashMap<...>>` for the outer map and per-entry
/// `Arc<RwLock<Account>>` for fine-grained per-account locking. Accounts
/// are only ever created through [`Ledger::open`]; no operation creates
/// one implicitly.
///
/// # Concurrency
///
/// - Multiple tasks may read the same account concurrently.
/// - Writes to different accounts are concurrent.
/// - Writes to the same account are serialized, so a balance check and the
///   withdrawal that depends on it can run under one continuously held
///   guard.
#[derive(Debug)]
pub struct Ledger {
    accounts: RwLock<HashMap<AccountId, Arc<RwLock<Account>>>>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Opens a zero-balance account under the given id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if an account with the same
    /// id is already open.
    pub async fn open(&self, account_id: AccountId) -> Result<AccountId, GatewayError> {
        let mut map = self.accounts.write().await;
        if map.contains_key(&account_id) {
            return Err(GatewayError::InvalidRequest(format!(
                "account {account_id} already exists"
            )));
        }
        map.insert(account_id, Arc::new(RwLock::new(Account::open(account_id))));
        Ok(account_id)
    }

    /// Returns a shared handle to the account behind its per-account lock.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::AccountNotFound`] if the account was never
    /// opened.
    pub async fn get(&self, account_id: AccountId) -> Result<Arc<RwLock<Account>>, GatewayError> {
        let map = self.accounts.read().await;
        map.get(&account_id)
            .cloned()
            .ok_or(GatewayError::AccountNotFound(account_id))
    }

    /// Returns `true` if an account with the given id is open.
    pub async fn contains(&self, account_id: AccountId) -> bool {
        self.accounts.read().await.contains_key(&account_id)
    }

    /// Returns the number of open accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Returns `true` if no account is open.
    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
