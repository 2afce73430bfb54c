//! Mobility service: ride lifecycle orchestration and fare settlement.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::domain::{
    AccountId, DomainEvent, DriverId, EventBus, Ledger, RideFilter, RideId, RideRegistry,
    RideSnapshot,
};
use crate::error::GatewayError;
use crate::service::payment::{PaymentCoordinator, Settlement};

/// Orchestration layer for the ride lifecycle.
///
/// Owns the [`RideRegistry`] for ride state and delegates settlement to
/// the [`PaymentCoordinator`], which shares the ledger with the wallet
/// service. Mutations follow the same pattern as the wallet service:
/// acquire the per-ride lock → transition → release → emit event.
#[derive(Debug, Clone)]
pub struct MobilityService {
    rides: Arc<RideRegistry>,
    ledger: Arc<Ledger>,
    payments: PaymentCoordinator,
    event_bus: EventBus,
}

impl MobilityService {
    /// Creates a new `MobilityService` over shared ride and ledger state.
    #[must_use]
    pub fn new(rides: Arc<RideRegistry>, ledger: Arc<Ledger>, event_bus: EventBus) -> Self {
        let payments = PaymentCoordinator::new(Arc::clone(&ledger));
        Self {
            rides,
            ledger,
            payments,
            event_bus,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns a reference to the inner [`RideRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<RideRegistry> {
        &self.rides
    }

    /// Requests a ride for the given account.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::AccountNotFound`] if the account was never
    /// opened and [`GatewayError::InvalidFare`] if `estimated_fare <= 0`.
    pub async fn request_ride(
        &self,
        account_id: AccountId,
        pickup: &str,
        destination: &str,
        estimated_fare: Decimal,
    ) -> Result<RideSnapshot, GatewayError> {
        if !self.ledger.contains(account_id).await {
            return Err(GatewayError::AccountNotFound(account_id));
        }

        let ride_id = self
            .rides
            .create(
                account_id,
                pickup.trim().to_string(),
                destination.trim().to_string(),
                estimated_fare,
            )
            .await?;
        let snapshot = self.snapshot(ride_id).await?;

        let _ = self.event_bus.publish(DomainEvent::RideRequested {
            ride_id,
            account_id,
            estimated_fare,
            pickup: snapshot.pickup.clone(),
            destination: snapshot.destination.clone(),
            timestamp: Utc::now(),
        });

        tracing::info!(%ride_id, %account_id, %estimated_fare, "ride requested");
        Ok(snapshot)
    }

    /// Assigns a driver to the ride.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RideNotFound`] if the ride does not exist
    /// and [`GatewayError::InvalidTransition`] if its status does not
    /// allow assignment.
    pub async fn assign_driver(
        &self,
        ride_id: RideId,
        driver_id: DriverId,
    ) -> Result<RideSnapshot, GatewayError> {
        let ride_lock = self.rides.get(ride_id).await?;
        let mut ride = ride_lock.write().await;
        ride.assign(driver_id)?;
        let snapshot = RideSnapshot::from(&*ride);
        drop(ride);

        let _ = self.event_bus.publish(DomainEvent::DriverAssigned {
            ride_id,
            account_id: snapshot.account_id,
            driver_id,
            timestamp: Utc::now(),
        });

        tracing::info!(%ride_id, %driver_id, "driver assigned");
        Ok(snapshot)
    }

    /// Starts the trip.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RideNotFound`] if the ride does not exist
    /// and [`GatewayError::InvalidTransition`] unless it is `assigned`.
    pub async fn start_ride(&self, ride_id: RideId) -> Result<RideSnapshot, GatewayError> {
        let ride_lock = self.rides.get(ride_id).await?;
        let mut ride = ride_lock.write().await;
        ride.start()?;
        let snapshot = RideSnapshot::from(&*ride);
        drop(ride);

        let _ = self.event_bus.publish(DomainEvent::RideStarted {
            ride_id,
            account_id: snapshot.account_id,
            timestamp: Utc::now(),
        });

        tracing::info!(%ride_id, "ride started");
        Ok(snapshot)
    }

    /// Cancels the ride.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RideNotFound`] if the ride does not exist
    /// and [`GatewayError::InvalidTransition`] if it is already
    /// `completed` or `canceled`.
    pub async fn cancel_ride(&self, ride_id: RideId) -> Result<RideSnapshot, GatewayError> {
        let ride_lock = self.rides.get(ride_id).await?;
        let mut ride = ride_lock.write().await;
        ride.cancel()?;
        let snapshot = RideSnapshot::from(&*ride);
        drop(ride);

        let _ = self.event_bus.publish(DomainEvent::RideCanceled {
            ride_id,
            account_id: snapshot.account_id,
            timestamp: Utc::now(),
        });

        tracing::info!(%ride_id, "ride canceled");
        Ok(snapshot)
    }

    /// Completes the trip and settles the fare.
    ///
    /// On success the fare has been debited and the ride is `completed`.
    /// When the balance cannot cover the fare the ride moves to
    /// `payment_failed`, the trip record is kept for the retry, and
    /// [`GatewayError::PaymentFailed`] is returned.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RideNotFound`] if the ride does not exist,
    /// [`GatewayError::InvalidTransition`] unless it is `in_progress`,
    /// [`GatewayError::InvalidFare`] for out-of-range trip values, and
    /// [`GatewayError::PaymentFailed`] when the settlement is declined.
    pub async fn complete_ride(
        &self,
        ride_id: RideId,
        actual_fare: Decimal,
        distance_km: Decimal,
        duration_min: i64,
    ) -> Result<RideSnapshot, GatewayError> {
        let ride_lock = self.rides.get(ride_id).await?;
        let mut ride = ride_lock.write().await;
        let account_id = ride.account_id;
        let outcome = self
            .payments
            .settle(&mut ride, actual_fare, distance_km, duration_min)
            .await?;
        let snapshot = RideSnapshot::from(&*ride);
        drop(ride);

        match outcome {
            Settlement::Settled {
                fare,
                balance_after,
                description,
            } => {
                let _ = self.event_bus.publish(DomainEvent::FundsWithdrawn {
                    account_id,
                    amount: fare,
                    balance_after,
                    description,
                    timestamp: Utc::now(),
                });
                let _ = self.event_bus.publish(DomainEvent::RideCompleted {
                    ride_id,
                    account_id,
                    fare,
                    balance_after,
                    timestamp: Utc::now(),
                });
                tracing::info!(%ride_id, %account_id, %fare, %balance_after, "ride completed");
                Ok(snapshot)
            }
            Settlement::Declined {
                required,
                available,
            } => {
                let _ = self.event_bus.publish(DomainEvent::RidePaymentFailed {
                    ride_id,
                    account_id,
                    required,
                    available,
                    timestamp: Utc::now(),
                });
                tracing::warn!(
                    %ride_id, %account_id, %required, %available,
                    "ride payment declined"
                );
                Err(GatewayError::PaymentFailed {
                    ride_id,
                    required,
                    available,
                })
            }
        }
    }

    /// Returns a snapshot of the ride.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RideNotFound`] if the ride does not exist.
    pub async fn ride(&self, ride_id: RideId) -> Result<RideSnapshot, GatewayError> {
        self.snapshot(ride_id).await
    }

    /// Returns one page of ride snapshots plus the total matching the
    /// filter, most recently updated first.
    pub async fn list_rides(&self, filter: RideFilter) -> (Vec<RideSnapshot>, usize) {
        self.rides.list(filter).await
    }

    async fn snapshot(&self, ride_id: RideId) -> Result<RideSnapshot, GatewayError> {
        let ride_lock = self.rides.get(ride_id).await?;
        let ride = ride_lock.read().await;
        Ok(RideSnapshot::from(&*ride))
    }
}
