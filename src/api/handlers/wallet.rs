//! Wallet endpoint handlers: balance, deposit, withdraw, transactions.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{TransactionDto, WalletOperationRequest, WalletResponse};
use crate::app_state::AppState;
use crate::domain::AccountId;
use crate::error::{ErrorResponse, GatewayError};

/// `GET /wallet/:account_id` — Current balance.
///
/// # Errors
///
/// Returns [`GatewayError::AccountNotFound`] if the account was never
/// opened.
#[utoipa::path(
    get,
    path = "/api/v1/wallet/{account_id}",
    tag = "Wallet",
    summary = "Get wallet balance",
    description = "Returns the current balance of the account. Amounts are string-encoded decimals.",
    params(
        ("account_id" = u64, Path, description = "Account id"),
    ),
    responses(
        (status = 200, description = "Current balance", body = WalletResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn get_wallet(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, GatewayError> {
    let account_id = AccountId::new(id);
    let balance = state.wallet_service.balance(account_id).await?;
    Ok(Json(WalletResponse {
        account_id,
        balance,
    }))
}

/// `POST /wallet/:account_id/deposit` — Credit the account.
///
/// # Errors
///
/// Returns [`GatewayError::AccountNotFound`] for unknown accounts and
/// [`GatewayError::InvalidAmount`] for non-positive amounts.
#[utoipa::path(
    post,
    path = "/api/v1/wallet/{account_id}/deposit",
    tag = "Wallet",
    summary = "Deposit funds",
    description = "Credits the account and appends a deposit transaction. The amount must be strictly positive.",
    params(
        ("account_id" = u64, Path, description = "Account id"),
    ),
    request_body = WalletOperationRequest,
    responses(
        (status = 200, description = "New balance", body = WalletResponse),
        (status = 400, description = "Invalid amount", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn deposit(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<WalletOperationRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let account_id = AccountId::new(id);
    let balance = state
        .wallet_service
        .deposit(account_id, req.amount, req.description)
        .await?;
    Ok(Json(WalletResponse {
        account_id,
        balance,
    }))
}

/// `POST /wallet/:account_id/withdraw` — Debit the account.
///
/// # Errors
///
/// Returns [`GatewayError::AccountNotFound`] for unknown accounts,
/// [`GatewayError::InvalidAmount`] for non-positive amounts, and
/// [`GatewayError::InsufficientFunds`] when the balance cannot cover the
/// amount.
#[utoipa::path(
    post,
    path = "/api/v1/wallet/{account_id}/withdraw",
    tag = "Wallet",
    summary = "Withdraw funds",
    description = "Debits the account and appends a withdraw transaction. Fails without mutating anything when the balance is insufficient.",
    params(
        ("account_id" = u64, Path, description = "Account id"),
    ),
    request_body = WalletOperationRequest,
    responses(
        (status = 200, description = "New balance", body = WalletResponse),
        (status = 400, description = "Invalid amount or insufficient funds", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn withdraw(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<WalletOperationRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let account_id = AccountId::new(id);
    let balance = state
        .wallet_service
        .withdraw(account_id, req.amount, req.description)
        .await?;
    Ok(Json(WalletResponse {
        account_id,
        balance,
    }))
}

/// `GET /wallet/:account_id/transactions` — Full transaction log.
///
/// # Errors
///
/// Returns [`GatewayError::AccountNotFound`] if the account was never
/// opened.
#[utoipa::path(
    get,
    path = "/api/v1/wallet/{account_id}/transactions",
    tag = "Wallet",
    summary = "List transactions",
    description = "Returns every transaction of the account in chronological order.",
    params(
        ("account_id" = u64, Path, description = "Account id"),
    ),
    responses(
        (status = 200, description = "Transaction log", body = Vec<TransactionDto>),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, GatewayError> {
    let records = state.wallet_service.transactions(AccountId::new(id)).await?;
    let transactions: Vec<TransactionDto> = records.into_iter().map(TransactionDto::from).collect();
    Ok(Json(transactions))
}

/// Wallet routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/wallet/{account_id}", get(get_wallet))
        .route("/wallet/{account_id}/deposit", post(deposit))
        .route("/wallet/{account_id}/withdraw", post(withdraw))
        .route("/wallet/{account_id}/transactions", get(list_transactions))
}
