//! Domain events reflecting ledger and ride state mutations.
//!
//! Every state change emits a [`DomainEvent`] through the
//! [`super::EventBus`]. Events are broadcast to WebSocket subscribers,
//! which filter them by the account they concern.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{AccountId, DriverId, RideId};

/// Domain event emitted after every state mutation.
///
/// Every event names the account it concerns (ride events carry the
/// rider's account), which is the WebSocket subscription key. Monetary
/// amounts are [`Decimal`] and serialize as JSON strings, preserving
/// exact values on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum DomainEvent {
    /// Emitted when an account is opened.
    AccountOpened {
        /// Account identifier.
        account_id: AccountId,
        /// Opening timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a successful deposit.
    FundsDeposited {
        /// Account identifier.
        account_id: AccountId,
        /// Amount added.
        amount: Decimal,
        /// Balance immediately after the deposit.
        balance_after: Decimal,
        /// Description recorded with the transaction.
        description: String,
        /// Mutation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted after a successful withdrawal.
    FundsWithdrawn {
        /// Account identifier.
        account_id: AccountId,
        /// Amount removed.
        amount: Decimal,
        /// Balance immediately after the withdrawal.
        balance_after: Decimal,
        /// Description recorded with the transaction.
        description: String,
        /// Mutation timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a rider requests a ride.
    RideRequested {
        /// Ride identifier.
        ride_id: RideId,
        /// Rider's account.
        account_id: AccountId,
        /// Fare estimated at request time.
        estimated_fare: Decimal,
        /// Pickup location label.
        pickup: String,
        /// Destination location label.
        destination: String,
        /// Request timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a driver is assigned to a ride.
    DriverAssigned {
        /// Ride identifier.
        ride_id: RideId,
        /// Rider's account.
        account_id: AccountId,
        /// Assigned driver.
        driver_id: DriverId,
        /// Assignment timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a trip starts.
    RideStarted {
        /// Ride identifier.
        ride_id: RideId,
        /// Rider's account.
        account_id: AccountId,
        /// Start timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a trip completes and the fare is charged.
    RideCompleted {
        /// Ride identifier.
        ride_id: RideId,
        /// Rider's account.
        account_id: AccountId,
        /// Fare charged.
        fare: Decimal,
        /// Rider balance after the charge.
        balance_after: Decimal,
        /// Completion timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a trip ends but the rider cannot cover the fare.
    RidePaymentFailed {
        /// Ride identifier.
        ride_id: RideId,
        /// Rider's account.
        account_id: AccountId,
        /// Fare that could not be charged.
        required: Decimal,
        /// Rider balance at the time of the attempt.
        available: Decimal,
        /// Attempt timestamp.
        timestamp: DateTime<Utc>,
    },

    /// Emitted when a ride is canceled.
    RideCanceled {
        /// Ride identifier.
        ride_id: RideId,
        /// Rider's account.
        account_id: AccountId,
        /// Cancellation timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl DomainEvent {
    /// Returns the account this event concerns.
    #[must_use]
    pub fn account_id(&self) -> AccountId {
        match self {
            Self::AccountOpened { account_id, .. }
            | Self::FundsDeposited { account_id, .. }
            | Self::FundsWithdrawn { account_id, .. }
            | Self::RideRequested { account_id, .. }
            | Self::DriverAssigned { account_id, .. }
            | Self::RideStarted { account_id, .. }
            | Self::RideCompleted { account_id, .. }
            | Self::RidePaymentFailed { account_id, .. }
            | Self::RideCanceled { account_id, .. } => *account_id,
        }
    }

    /// Returns the ride this event concerns, if it is a ride event.
    #[must_use]
    pub fn ride_id(&self) -> Option<RideId> {
        match self {
            Self::RideRequested { ride_id, .. }
            | Self::DriverAssigned { ride_id, .. }
            | Self::RideStarted { ride_id, .. }
            | Self::RideCompleted { ride_id, .. }
            | Self::RidePaymentFailed { ride_id, .. }
            | Self::RideCanceled { ride_id, .. } => Some(*ride_id),
            Self::AccountOpened { .. }
            | Self::FundsDeposited { .. }
            | Self::FundsWithdrawn { .. } => None,
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::AccountOpened { .. } => "account_opened",
            Self::FundsDeposited { .. } => "funds_deposited",
            Self::FundsWithdrawn { .. } => "funds_withdrawn",
            Self::RideRequested { .. } => "ride_requested",
            Self::DriverAssigned { .. } => "driver_assigned",
            Self::RideStarted { .. } => "ride_started",
            Self::RideCompleted { .. } => "ride_completed",
            Self::RidePaymentFailed { .. } => "ride_payment_failed",
            Self::RideCanceled { .. } => "ride_canceled",
        }
    }
}
