//! Ride DTOs covering the whole mobility lifecycle.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::{PageMeta, PageParams};
use crate::domain::{AccountId, DriverId, RideId, RideSnapshot, RideStatus};

/// Request body for `POST /mobility/rides`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RideCreateRequest {
    /// Account that will pay for the trip.
    pub account_id: AccountId,
    /// Pickup location label.
    pub pickup: String,
    /// Destination location label.
    pub destination: String,
    /// Fare estimate, strictly positive.
    pub estimated_fare: Decimal,
}

/// Query parameters for `POST /mobility/rides/:id/assign`.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AssignParams {
    /// Driver to put on the ride.
    pub driver_id: DriverId,
}

/// Request body for `POST /mobility/rides/:id/complete`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RideCompleteRequest {
    /// Fare actually charged, strictly positive.
    pub actual_fare: Decimal,
    /// Distance driven in kilometres, non-negative.
    pub distance_km: Decimal,
    /// Trip duration in minutes, non-negative.
    pub duration_min: i64,
}

/// Full ride representation returned by every mobility endpoint.
///
/// Trip outcome fields are `null` until the first settlement attempt and
/// frozen afterwards.
#[derive(Debug, Serialize, ToSchema)]
pub struct RideDto {
    /// Ride identifier.
    pub ride_id: RideId,
    /// Rider's account.
    pub account_id: AccountId,
    /// Assigned driver, if any.
    pub driver_id: Option<DriverId>,
    /// Pickup location label.
    pub pickup: String,
    /// Destination location label.
    pub destination: String,
    /// Current lifecycle status.
    pub status: RideStatus,
    /// Fare estimated at request time.
    pub estimated_fare: Decimal,
    /// Fare recorded at settlement.
    pub actual_fare: Option<Decimal>,
    /// Distance recorded at settlement.
    pub distance_km: Option<Decimal>,
    /// Duration recorded at settlement.
    pub duration_min: Option<i64>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last transition timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<RideSnapshot> for RideDto {
    fn from(snapshot: RideSnapshot) -> Self {
        Self {
            ride_id: snapshot.ride_id,
            account_id: snapshot.account_id,
            driver_id: snapshot.driver_id,
            pickup: snapshot.pickup,
            destination: snapshot.destination,
            status: snapshot.status,
            estimated_fare: snapshot.estimated_fare,
            actual_fare: snapshot.trip.map(|t| t.actual_fare),
            distance_km: snapshot.trip.map(|t| t.distance_km),
            duration_min: snapshot.trip.map(|t| t.duration_min),
            created_at: snapshot.created_at,
            updated_at: snapshot.updated_at,
        }
    }
}

/// Query parameters for `GET /mobility/rides`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RideListParams {
    /// Only rides belonging to this account.
    #[serde(default)]
    pub account_id: Option<AccountId>,
    /// Only rides currently in this status. Unknown values are rejected.
    #[serde(default)]
    pub status: Option<String>,
    /// Page size (max 100). Defaults to 50.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Number of rides skipped before the page starts. Defaults to 0.
    #[serde(default)]
    pub offset: u32,
}

impl RideListParams {
    /// Resolves `(limit, offset)` with the ride-list default page size.
    #[must_use]
    pub fn page(&self) -> (usize, usize) {
        let params = PageParams {
            limit: self.limit,
            offset: self.offset,
        };
        params.resolve(50)
    }
}

/// Paginated list response for `GET /mobility/rides`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RideListResponse {
    /// One page of rides, most recently updated first.
    pub data: Vec<RideDto>,
    /// Pagination metadata.
    pub pagination: PageMeta,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{Ride, TripRecord};
    use rust_decimal_macros::dec;

    #[test]
    fn dto_flattens_the_trip_record() {
        let mut ride = Ride::new(
            RideId::new(9),
            AccountId::new(2),
            "Gare".to_string(),
            "Campus".to_string(),
            dec!(500),
        );
        let _ = ride.assign(DriverId::new(4));
        let _ = ride.start();
        let _ = ride.complete(TripRecord {
            actual_fare: dec!(450),
            distance_km: dec!(3.7),
            duration_min: 14,
        });

        let dto = RideDto::from(RideSnapshot::from(&ride));
        assert_eq!(dto.status, RideStatus::Completed);
        assert_eq!(dto.actual_fare, Some(dec!(450)));
        assert_eq!(dto.distance_km, Some(dec!(3.7)));
        assert_eq!(dto.duration_min, Some(14));
    }

    #[test]
    fn fresh_ride_serializes_null_trip_fields() {
        let ride = Ride::new(
            RideId::new(1),
            AccountId::new(1),
            "A".to_string(),
            "B".to_string(),
            dec!(100),
        );
        let dto = RideDto::from(RideSnapshot::from(&ride));
        let Ok(json) = serde_json::to_string(&dto) else {
            panic!("serialization failed");
        };
        assert!(json.contains("\"status\":\"requested\""));
        assert!(json.contains("\"actual_fare\":null"));
        assert!(json.contains("\"driver_id\":null"));
        assert!(json.contains("\"estimated_fare\":\"100\""));
    }
}
