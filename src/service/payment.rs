//! Payment coordination between the ride machine and the ledger.
//!
//! Settlement is the one place where both subsystems mutate together:
//! the rider's account is debited and the ride leaves `in_progress` in
//! the same critical section. The coordinator is called with the ride
//! write guard already held and acquires the account lock inside it,
//! so the lock order is always ride first, account second.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::{Ledger, Ride, RideStatus, TripRecord};
use crate::error::GatewayError;

/// Outcome of a settlement attempt.
///
/// Both outcomes are terminal for the attempt: the ride has already
/// transitioned (`completed` or `payment_failed`) and the trip record
/// is stored by the time the caller sees this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The fare was charged and the ride is `completed`.
    Settled {
        /// Amount actually debited.
        fare: Decimal,
        /// Rider balance after the debit.
        balance_after: Decimal,
        /// Description written to the ledger record.
        description: String,
    },

    /// The balance could not cover the fare; the ride is
    /// `payment_failed` and the ledger is untouched.
    Declined {
        /// Fare that could not be charged.
        required: Decimal,
        /// Rider balance at the time of the attempt.
        available: Decimal,
    },
}

/// Coordinates fare settlement between rides and accounts.
#[derive(Debug, Clone)]
pub struct PaymentCoordinator {
    ledger: Arc<Ledger>,
}

impl PaymentCoordinator {
    /// Creates a new `PaymentCoordinator` over the given ledger.
    #[must_use]
    pub fn new(ledger: Arc<Ledger>) -> Self {
        Self { ledger }
    }

    /// Settles the fare for a ride, transitioning it to `completed` or
    /// `payment_failed`.
    ///
    /// The caller must hold the ride write guard for the whole call.
    /// A ride that already carries a trip record (an earlier declined
    /// attempt) is charged that record's fare; the values supplied to
    /// the retry are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidTransition`] unless the ride is
    /// `in_progress`, [`GatewayError::InvalidFare`] if the reported trip
    /// values are out of range, and [`GatewayError::AccountNotFound`] if
    /// the rider's account disappeared from the ledger.
    pub async fn settle(
        &self,
        ride: &mut Ride,
        actual_fare: Decimal,
        distance_km: Decimal,
        duration_min: i64,
    ) -> Result<Settlement, GatewayError> {
        // Status first: a stale completion on a finished ride is a
        // transition conflict, not a validation failure.
        if ride.status != RideStatus::InProgress {
            return Err(GatewayError::InvalidTransition {
                from: ride.status,
                action: "complete",
            });
        }

        if actual_fare <= Decimal::ZERO {
            return Err(GatewayError::InvalidFare(format!(
                "actual_fare must be positive, got {actual_fare}"
            )));
        }
        if distance_km < Decimal::ZERO {
            return Err(GatewayError::InvalidFare(format!(
                "distance_km must be >= 0, got {distance_km}"
            )));
        }
        if duration_min < 0 {
            return Err(GatewayError::InvalidFare(format!(
                "duration_min must be >= 0, got {duration_min}"
            )));
        }

        let reported = TripRecord {
            actual_fare,
            distance_km,
            duration_min,
        };
        // An earlier declined attempt already fixed the fare.
        let fare = ride.trip.map_or(actual_fare, |t| t.actual_fare);

        let account_lock = self.ledger.get(ride.account_id).await?;
        let mut account = account_lock.write().await;

        if account.balance < fare {
            let available = account.balance;
            drop(account);
            let trip = ride.fail_payment(reported)?;
            return Ok(Settlement::Declined {
                required: trip.actual_fare,
                available,
            });
        }

        let description = format!("Paiement trajet #{}", ride.ride_id);
        let balance_after = account.withdraw(fare, description.clone())?;
        drop(account);
        let trip = ride.complete(reported)?;

        Ok(Settlement::Settled {
            fare: trip.actual_fare,
            balance_after,
            description,
        })
    }
}
