//! Wallet DTOs: deposits, withdrawals, balances and statement lines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{AccountId, TransactionKind, TxRecord};

/// Request body for `POST /wallet/:id/deposit` and `/withdraw`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct WalletOperationRequest {
    /// Amount to move, strictly positive. Accepts JSON numbers or
    /// strings; decimal strings keep full precision.
    pub amount: Decimal,
    /// Statement line recorded with the transaction. Defaults per
    /// operation when absent.
    #[serde(default)]
    pub description: Option<String>,
}

/// Balance view returned by wallet reads and mutations.
#[derive(Debug, Serialize, ToSchema)]
pub struct WalletResponse {
    /// Account identifier.
    pub account_id: AccountId,
    /// Current balance (string-encoded decimal).
    pub balance: Decimal,
}

/// One statement line of the transaction log.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionDto {
    /// Transaction kind.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Amount moved, always positive.
    pub amount: Decimal,
    /// Statement line.
    pub description: String,
    /// Balance immediately after this transaction.
    pub balance_after: Decimal,
}

impl From<TxRecord> for TransactionDto {
    fn from(record: TxRecord) -> Self {
        Self {
            kind: record.kind,
            amount: record.amount,
            description: record.description,
            balance_after: record.balance_after,
        }
    }
}
