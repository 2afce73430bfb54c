//! Wallet service: orchestrates ledger operations and emits events.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::{AccountId, DomainEvent, EventBus, Ledger, TxRecord};
use crate::error::GatewayError;

/// Description recorded when a deposit arrives without one.
const DEFAULT_DEPOSIT_DESCRIPTION: &str = "Dépôt BerylPay";

/// Description recorded when a withdrawal arrives without one.
const DEFAULT_WITHDRAWAL_DESCRIPTION: &str = "Retrait BerylPay";

/// Orchestration layer for all wallet operations.
///
/// Stateless coordinator: owns references to the [`Ledger`] for state and
/// the [`EventBus`] for event emission. Every mutation method follows the
/// pattern: acquire the per-account lock → mutate → release → emit event
/// → return result.
#[derive(Debug, Clone)]
pub struct WalletService {
    ledger: Arc<Ledger>,
    event_bus: EventBus,
}

impl WalletService {
    /// Creates a new `WalletService`.
    #[must_use]
    pub fn new(ledger: Arc<Ledger>, event_bus: EventBus) -> Self {
        Self { ledger, event_bus }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`Ledger`].
    #[must_use]
    pub fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// Opens a zero-balance account under the given id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if the id is already in
    /// use.
    pub async fn open_account(&self, account_id: AccountId) -> Result<AccountId, GatewayError> {
        self.ledger.open(account_id).await?;

        let _ = self.event_bus.publish(DomainEvent::AccountOpened {
            account_id,
            timestamp: Utc::now(),
        });

        tracing::info!(%account_id, "account opened");
        Ok(account_id)
    }

    /// Deposits `amount` into the account and returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::AccountNotFound`] if the account was never
    /// opened and [`GatewayError::InvalidAmount`] if `amount <= 0`.
    pub async fn deposit(
        &self,
        account_id: AccountId,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Decimal, GatewayError> {
        let description =
            description.unwrap_or_else(|| DEFAULT_DEPOSIT_DESCRIPTION.to_string());

        let account_lock = self.ledger.get(account_id).await?;
        let mut account = account_lock.write().await;
        let balance_after = account.deposit(amount, description.clone())?;
        drop(account);

        let _ = self.event_bus.publish(DomainEvent::FundsDeposited {
            account_id,
            amount,
            balance_after,
            description,
            timestamp: Utc::now(),
        });

        tracing::info!(%account_id, %amount, %balance_after, "deposit applied");
        Ok(balance_after)
    }

    /// Withdraws `amount` from the account and returns the new balance.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::AccountNotFound`] if the account was never
    /// opened, [`GatewayError::InvalidAmount`] if `amount <= 0`, and
    /// [`GatewayError::InsufficientFunds`] if `amount > balance`.
    pub async fn withdraw(
        &self,
        account_id: AccountId,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Decimal, GatewayError> {
        let description =
            description.unwrap_or_else(|| DEFAULT_WITHDRAWAL_DESCRIPTION.to_string());

        let account_lock = self.ledger.get(account_id).await?;
        let mut account = account_lock.write().await;
        let balance_after = account.withdraw(amount, description.clone())?;
        drop(account);

        let _ = self.event_bus.publish(DomainEvent::FundsWithdrawn {
            account_id,
            amount,
            balance_after,
            description,
            timestamp: Utc::now(),
        });

        tracing::info!(%account_id, %amount, %balance_after, "withdrawal applied");
        Ok(balance_after)
    }

    /// Returns the current balance of the account.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::AccountNotFound`] if the account was never
    /// opened.
    pub async fn balance(&self, account_id: AccountId) -> Result<Decimal, GatewayError> {
        let account_lock = self.ledger.get(account_id).await?;
        let account = account_lock.read().await;
        Ok(account.balance)
    }

    /// Returns the full transaction history of the account in
    /// chronological order.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::AccountNotFound`] if the account was never
    /// opened.
    pub async fn transactions(&self, account_id: AccountId) -> Result<Vec<TxRecord>, GatewayError> {
        let account_lock = self.ledger.get(account_id).await?;
        let account = account_lock.read().await;
        Ok(account.transactions.clone())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::TransactionKind;
    use rust_decimal_macros::dec;

    fn make_service() -> WalletService {
        WalletService::new(Arc::new(Ledger::new()), EventBus::new(1000))
    }

    #[tokio::test]
    async fn open_account_emits_event() {
        let service = make_service();
        let mut rx = service.event_bus().subscribe();

        let result = service.open_account(AccountId::new(1)).await;
        assert!(result.is_ok());

        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "account_opened");
        assert_eq!(event.account_id(), AccountId::new(1));
    }

    #[tokio::test]
    async fn deposit_defaults_description_and_emits_event() {
        let service = make_service();
        let id = AccountId::new(1);
        let _ = service.open_account(id).await;
        let mut rx = service.event_bus().subscribe();

        let balance = service.deposit(id, dec!(100), None).await;
        assert_eq!(balance.ok(), Some(dec!(100)));

        let Ok(DomainEvent::FundsDeposited {
            amount,
            balance_after,
            description,
            ..
        }) = rx.recv().await
        else {
            panic!("expected FundsDeposited");
        };
        assert_eq!(amount, dec!(100));
        assert_eq!(balance_after, dec!(100));
        assert_eq!(description, "Dépôt BerylPay");

        let Ok(records) = service.transactions(id).await else {
            panic!("transactions lookup failed");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(
            records.first().map(|r| r.description.as_str()),
            Some("Dépôt BerylPay")
        );
    }

    #[tokio::test]
    async fn rejected_deposit_emits_nothing() {
        let service = make_service();
        let id = AccountId::new(1);
        let _ = service.open_account(id).await;
        let mut rx = service.event_bus().subscribe();

        let result = service.deposit(id, Decimal::ZERO, None).await;
        assert!(matches!(result, Err(GatewayError::InvalidAmount(_))));
        assert!(rx.try_recv().is_err());

        // History untouched.
        let Ok(records) = service.transactions(id).await else {
            panic!("transactions lookup failed");
        };
        assert!(records.is_empty());
        assert_eq!(service.balance(id).await.ok(), Some(Decimal::ZERO));
    }

    #[tokio::test]
    async fn withdraw_uses_custom_description() {
        let service = make_service();
        let id = AccountId::new(1);
        let _ = service.open_account(id).await;
        let _ = service.deposit(id, dec!(50), None).await;

        let balance = service
            .withdraw(id, dec!(20), Some("Recharge scooter".to_string()))
            .await;
        assert_eq!(balance.ok(), Some(dec!(30)));

        let Ok(records) = service.transactions(id).await else {
            panic!("transactions lookup failed");
        };
        let Some(last) = records.last() else {
            panic!("expected a record");
        };
        assert_eq!(last.kind, TransactionKind::Withdraw);
        assert_eq!(last.description, "Recharge scooter");
        assert_eq!(last.balance_after, dec!(30));
    }

    #[tokio::test]
    async fn withdraw_insufficient_leaves_no_trace() {
        let service = make_service();
        let id = AccountId::new(1);
        let _ = service.open_account(id).await;
        let _ = service.deposit(id, dec!(10), None).await;
        let mut rx = service.event_bus().subscribe();

        let result = service.withdraw(id, dec!(11), None).await;
        assert!(matches!(
            result,
            Err(GatewayError::InsufficientFunds { .. })
        ));
        assert!(rx.try_recv().is_err());
        assert_eq!(service.balance(id).await.ok(), Some(dec!(10)));
    }

    #[tokio::test]
    async fn operations_on_unopened_account_fail() {
        let service = make_service();
        let ghost = AccountId::new(99);

        assert!(matches!(
            service.deposit(ghost, dec!(1), None).await,
            Err(GatewayError::AccountNotFound(_))
        ));
        assert!(matches!(
            service.withdraw(ghost, dec!(1), None).await,
            Err(GatewayError::AccountNotFound(_))
        ));
        assert!(matches!(
            service.balance(ghost).await,
            Err(GatewayError::AccountNotFound(_))
        ));
        assert!(matches!(
            service.transactions(ghost).await,
            Err(GatewayError::AccountNotFound(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_open_is_rejected() {
        let service = make_service();
        let _ = service.open_account(AccountId::new(1)).await;
        let second = service.open_account(AccountId::new(1)).await;
        assert!(matches!(second, Err(GatewayError::InvalidRequest(_))));
    }
}
