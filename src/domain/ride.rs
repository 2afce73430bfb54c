//! Ride entity and its lifecycle state machine.
//!
//! A [`Ride`] moves through a closed set of [`RideStatus`] values. All
//! transitions are entity methods that either succeed or return
//! [`GatewayError::InvalidTransition`] naming the current status and the
//! rejected action; no other status changes are possible. The trip
//! outcome ([`TripRecord`]) is written exactly once, on the first
//! settlement attempt, and never overwritten afterwards.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AccountId, DriverId, RideId};
use crate::error::GatewayError;

/// Lifecycle status of a ride.
///
/// `canceled` and `payment_failed` are recoverable: a new driver may be
/// assigned and the ride retried. `completed` is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    /// Created by a rider, waiting for a driver.
    Requested,
    /// A driver has been assigned.
    Assigned,
    /// The trip is underway.
    InProgress,
    /// The trip ended and the fare was charged.
    Completed,
    /// The ride was called off before completion.
    Canceled,
    /// The trip ended but the rider could not cover the fare.
    PaymentFailed,
}

impl RideStatus {
    /// All statuses, in lifecycle order. Used by the status catalog
    /// endpoint.
    pub const ALL: [Self; 6] = [
        Self::Requested,
        Self::Assigned,
        Self::InProgress,
        Self::Completed,
        Self::Canceled,
        Self::PaymentFailed,
    ];

    /// Returns the wire name of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Assigned => "assigned",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::PaymentFailed => "payment_failed",
        }
    }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RideStatus {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(Self::Requested),
            "assigned" => Ok(Self::Assigned),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "canceled" => Ok(Self::Canceled),
            "payment_failed" => Ok(Self::PaymentFailed),
            other => Err(GatewayError::InvalidRequest(format!(
                "unknown ride status: {other}"
            ))),
        }
    }
}

/// Trip outcome, written once on the first settlement attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripRecord {
    /// Fare actually charged (or attempted) for the trip.
    pub actual_fare: Decimal,
    /// Distance covered, in kilometres.
    pub distance_km: Decimal,
    /// Trip duration, in whole minutes.
    pub duration_min: i64,
}

/// A ride through its whole lifecycle.
///
/// Transition methods enforce the state machine; callers never set
/// `status` directly. `updated_at` is refreshed on every transition and
/// drives the reverse-chronological ride listing.
#[derive(Debug)]
pub struct Ride {
    /// Unique ride identifier (immutable after creation).
    pub ride_id: RideId,

    /// Account of the rider paying for the trip.
    pub account_id: AccountId,

    /// Assigned driver, if any. Survives cancellation and reassignment.
    pub driver_id: Option<DriverId>,

    /// Pickup location label.
    pub pickup: String,

    /// Destination location label.
    pub destination: String,

    /// Current lifecycle status.
    pub status: RideStatus,

    /// Fare estimated at request time, always positive.
    pub estimated_fare: Decimal,

    /// Trip outcome. `None` until the first settlement attempt; never
    /// overwritten once set.
    pub trip: Option<TripRecord>,

    /// Creation timestamp (immutable).
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last transition.
    pub updated_at: DateTime<Utc>,
}

impl Ride {
    /// Creates a ride in `requested` status with no driver and no trip
    /// record. Fare positivity is validated by the registry before
    /// construction.
    #[must_use]
    pub fn new(
        ride_id: RideId,
        account_id: AccountId,
        pickup: String,
        destination: String,
        estimated_fare: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            ride_id,
            account_id,
            driver_id: None,
            pickup,
            destination,
            status: RideStatus::Requested,
            estimated_fare,
            trip: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Assigns a driver, moving the ride to `assigned`.
    ///
    /// Valid from `requested`, `canceled` and `payment_failed` (the two
    /// recoverable statuses allow a fresh attempt with a new driver).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidTransition`] from any other status.
    pub fn assign(&mut self, driver_id: DriverId) -> Result<(), GatewayError> {
        match self.status {
            RideStatus::Requested | RideStatus::Canceled | RideStatus::PaymentFailed => {
                self.driver_id = Some(driver_id);
                self.status = RideStatus::Assigned;
                self.touch();
                Ok(())
            }
            from => Err(GatewayError::InvalidTransition {
                from,
                action: "assign",
            }),
        }
    }

    /// Starts the trip, moving the ride to `in_progress`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidTransition`] unless the ride is
    /// `assigned`.
    pub fn start(&mut self) -> Result<(), GatewayError> {
        match self.status {
            RideStatus::Assigned => {
                self.status = RideStatus::InProgress;
                self.touch();
                Ok(())
            }
            from => Err(GatewayError::InvalidTransition {
                from,
                action: "start",
            }),
        }
    }

    /// Cancels the ride.
    ///
    /// Valid from any status except `completed` (the trip already
    /// happened and was paid) and `canceled` itself.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidTransition`] from `completed` or
    /// `canceled`.
    pub fn cancel(&mut self) -> Result<(), GatewayError> {
        match self.status {
            RideStatus::Requested
            | RideStatus::Assigned
            | RideStatus::InProgress
            | RideStatus::PaymentFailed => {
                self.status = RideStatus::Canceled;
                self.touch();
                Ok(())
            }
            from => Err(GatewayError::InvalidTransition {
                from,
                action: "cancel",
            }),
        }
    }

    /// Finishes the trip with the fare charged, moving the ride to
    /// `completed`. Stores `trip` if this is the first settlement attempt;
    /// an earlier record (from a failed payment) is kept untouched.
    /// Returns the authoritative trip record.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidTransition`] unless the ride is
    /// `in_progress`.
    pub fn complete(&mut self, trip: TripRecord) -> Result<TripRecord, GatewayError> {
        match self.status {
            RideStatus::InProgress => {
                let record = *self.trip.get_or_insert(trip);
                self.status = RideStatus::Completed;
                self.touch();
                Ok(record)
            }
            from => Err(GatewayError::InvalidTransition {
                from,
                action: "complete",
            }),
        }
    }

    /// Finishes the trip with the fare declined, moving the ride to
    /// `payment_failed`. Trip-record handling is identical to
    /// [`Ride::complete`].
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidTransition`] unless the ride is
    /// `in_progress`.
    pub fn fail_payment(&mut self, trip: TripRecord) -> Result<TripRecord, GatewayError> {
        match self.status {
            RideStatus::InProgress => {
                let record = *self.trip.get_or_insert(trip);
                self.status = RideStatus::PaymentFailed;
                self.touch();
                Ok(record)
            }
            from => Err(GatewayError::InvalidTransition {
                from,
                action: "complete",
            }),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
