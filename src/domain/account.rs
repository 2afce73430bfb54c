//! Ledger account entity and its append-only transaction log.
//!
//! [`Account`] owns a balance and the full history of mutations applied to
//! it. Every successful `deposit`/`withdraw` appends exactly one
//! [`TxRecord`] carrying the balance observed immediately after the
//! mutation, so replaying the log from zero always reproduces the current
//! balance. Records carry no timestamp: their position in the log *is*
//! their chronological order.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AccountId;
use crate::error::GatewayError;

/// Direction of a ledger mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Funds added to the account.
    Deposit,
    /// Funds removed from the account.
    Withdraw,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Deposit => write!(f, "deposit"),
            Self::Withdraw => write!(f, "withdraw"),
        }
    }
}

/// Immutable record of one applied ledger mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRecord {
    /// Whether funds were added or removed.
    pub kind: TransactionKind,
    /// Mutation amount, always positive.
    pub amount: Decimal,
    /// Human-readable description of the mutation.
    pub description: String,
    /// Balance observed immediately after this mutation was applied.
    pub balance_after: Decimal,
}

/// A monetary account: current balance plus append-only history.
///
/// All methods mutate through `&mut self`, so balance update and record
/// append are a single atomic unit to any observer holding the account
/// lock. Validation happens before any state is touched; a failed
/// operation leaves the account exactly as it was.
#[derive(Debug)]
pub struct Account {
    /// Identifier chosen by the account-creation collaborator.
    pub account_id: AccountId,

    /// Current balance. Never negative.
    pub balance: Decimal,

    /// Applied mutations in chronological order.
    pub transactions: Vec<TxRecord>,

    /// When the account was opened (immutable after creation).
    pub created_at: DateTime<Utc>,

    /// When the account last changed.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Opens an account with a zero balance and empty history.
    #[must_use]
    pub fn open(account_id: AccountId) -> Self {
        let now = Utc::now();
        Self {
            account_id,
            balance: Decimal::ZERO,
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Adds `amount` to the balance and appends the matching record.
    /// Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidAmount`] if `amount <= 0` and
    /// [`GatewayError::Internal`] on arithmetic overflow; the account is
    /// untouched in both cases.
    pub fn deposit(
        &mut self,
        amount: Decimal,
        description: String,
    ) -> Result<Decimal, GatewayError> {
        if amount <= Decimal::ZERO {
            return Err(GatewayError::InvalidAmount(format!(
                "deposit amount must be positive, got {amount}"
            )));
        }
        let new_balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| GatewayError::Internal("balance overflow on deposit".to_string()))?;
        self.apply(TransactionKind::Deposit, amount, description, new_balance);
        Ok(new_balance)
    }

    /// Removes `amount` from the balance and appends the matching record.
    /// Returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidAmount`] if `amount <= 0`,
    /// [`GatewayError::InsufficientFunds`] if `amount > balance`, and
    /// [`GatewayError::Internal`] on arithmetic overflow; the account is
    /// untouched in all cases.
    pub fn withdraw(
        &mut self,
        amount: Decimal,
        description: String,
    ) -> Result<Decimal, GatewayError> {
        if amount <= Decimal::ZERO {
            return Err(GatewayError::InvalidAmount(format!(
                "withdrawal amount must be positive, got {amount}"
            )));
        }
        if amount > self.balance {
            return Err(GatewayError::InsufficientFunds {
                available: self.balance,
                required: amount,
            });
        }
        let new_balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| GatewayError::Internal("balance underflow on withdrawal".to_string()))?;
        self.apply(TransactionKind::Withdraw, amount, description, new_balance);
        Ok(new_balance)
    }

    /// Recomputes the balance by folding the transaction log from zero.
    ///
    /// Always equal to [`Account::balance`]; exposed as a consistency
    /// check.
    #[must_use]
    pub fn replayed_balance(&self) -> Decimal {
        self.transactions
            .iter()
            .fold(Decimal::ZERO, |acc, record| match record.kind {
                TransactionKind::Deposit => acc.saturating_add(record.amount),
                TransactionKind::Withdraw => acc.saturating_sub(record.amount),
            })
    }

    fn apply(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        description: String,
        new_balance: Decimal,
    ) {
        self.balance = new_balance;
        self.transactions.push(TxRecord {
            kind,
            amount,
            description,
            balance_after: new_balance,
        });
        self.updated_at = Utc::now();
    }
}
