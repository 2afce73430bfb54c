//! Concurrent ride storage with per-ride fine-grained locking.
//!
//! [`RideRegistry`] mirrors the ledger's locking layout: an outer map
//! behind a [`tokio::sync::RwLock`] and one lock per ride, so two
//! concurrent transitions on the same ride serialize while different
//! rides proceed independently. The registry also owns the monotonic ride
//! id sequence.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use super::ids::IdSequence;
use super::ride::{Ride, RideStatus, TripRecord};
use super::{AccountId, DriverId, RideId};
use crate::error::GatewayError;

/// Point-in-time copy of one ride, taken under its read lock.
///
/// Used by the detail and list read surfaces so no lock is held while
/// responses are serialized.
#[derive(Debug, Clone)]
pub struct RideSnapshot {
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
    /// Lifecycle status at snapshot time.
    pub status: RideStatus,
    /// Fare estimated at request time.
    pub estimated_fare: Decimal,
    /// Trip outcome, once a settlement has been attempted.
    pub trip: Option<TripRecord>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last transition timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Ride> for RideSnapshot {
    fn from(ride: &Ride) -> Self {
        Self {
            ride_id: ride.ride_id,
            account_id: ride.account_id,
            driver_id: ride.driver_id,
            pickup: ride.pickup.clone(),
            destination: ride.destination.clone(),
            status: ride.status,
            estimated_fare: ride.estimated_fare,
            trip: ride.trip,
            created_at: ride.created_at,
            updated_at: ride.updated_at,
        }
    }
}

/// Filter and pagination parameters for [`RideRegistry::list`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RideFilter {
    /// Only rides belonging to this account.
    pub account_id: Option<AccountId>,
    /// Only rides currently in this status.
    pub status: Option<RideStatus>,
    /// Maximum number of rides returned.
    pub limit: usize,
    /// Number of matching rides skipped before the page starts.
    pub offset: usize,
}

/// Central store for all rides.
#[derive(Debug)]
pub struct RideRegistry {
    rides: RwLock<HashMap<RideId, Arc<RwLock<Ride>>>>,
    sequence: IdSequence,
}

impl RideRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rides: RwLock::new(HashMap::new()),
            sequence: IdSequence::new(),
        }
    }

    /// Creates a ride in `requested` status and returns its freshly
    /// allocated id.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidFare`] if `estimated_fare <= 0`.
    /// Rider account existence is the caller's responsibility.
    pub async fn create(
        &self,
        account_id: AccountId,
        pickup: String,
        destination: String,
        estimated_fare: Decimal,
    ) -> Result<RideId, GatewayError> {
        if estimated_fare <= Decimal::ZERO {
            return Err(GatewayError::InvalidFare(format!(
                "estimated fare must be positive, got {estimated_fare}"
            )));
        }
        let ride_id = RideId::new(self.sequence.next_value());
        let ride = Ride::new(ride_id, account_id, pickup, destination, estimated_fare);
        let mut map = self.rides.write().await;
        map.insert(ride_id, Arc::new(RwLock::new(ride)));
        Ok(ride_id)
    }

    /// Returns a shared handle to the ride behind its per-ride lock.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::RideNotFound`] if no ride with the given id
    /// exists.
    pub async fn get(&self, ride_id: RideId) -> Result<Arc<RwLock<Ride>>, GatewayError> {
        let map = self.rides.read().await;
        map.get(&ride_id)
            .cloned()
            .ok_or(GatewayError::RideNotFound(ride_id))
    }

    /// Returns one page of ride snapshots plus the total number of rides
    /// matching the filter.
    ///
    /// Ordering is reverse-chronological by last transition time; ties
    /// break by id, newest first, so pagination is deterministic.
    pub async fn list(&self, filter: RideFilter) -> (Vec<RideSnapshot>, usize) {
        let map = self.rides.read().await;
        let mut snapshots = Vec::with_capacity(map.len());
        for ride_lock in map.values() {
            let ride = ride_lock.read().await;
            if let Some(account_id) = filter.account_id
                && ride.account_id != account_id
            {
                continue;
            }
            if let Some(status) = filter.status
                && ride.status != status
            {
                continue;
            }
            snapshots.push(RideSnapshot::from(&*ride));
        }
        drop(map);

        snapshots.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| b.ride_id.cmp(&a.ride_id))
        });
        let total = snapshots.len();
        let page = snapshots
            .into_iter()
            .skip(filter.offset)
            .take(filter.limit)
            .collect();
        (page, total)
    }

    /// Returns the number of rides in the registry.
    pub async fn len(&self) -> usize {
        self.rides.read().await.len()
    }

    /// Returns `true` if the registry contains no rides.
    pub async fn is_empty(&self) -> bool {
        self.rides.read().await.is_empty()
    }
}

impl Default for RideRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    async fn create_ride(registry: &RideRegistry, account: u64) -> RideId {
        let Ok(id) = registry
            .create(
                AccountId::new(account),
                "A".to_string(),
                "B".to_string(),
                dec!(10),
            )
            .await
        else {
            panic!("ride creation failed");
        };
        id
    }

    #[tokio::test]
    async fn create_allocates_sequential_ids() {
        let registry = RideRegistry::new();
        let a = create_ride(&registry, 1).await;
        let b = create_ride(&registry, 1).await;
        let c = create_ride(&registry, 2).await;
        assert_eq!((a.value(), b.value(), c.value()), (1, 2, 3));
        assert_eq!(registry.len().await, 3);
    }

    #[tokio::test]
    async fn create_rejects_non_positive_fare() {
        let registry = RideRegistry::new();
        for fare in [Decimal::ZERO, dec!(-3)] {
            let result = registry
                .create(AccountId::new(1), "A".to_string(), "B".to_string(), fare)
                .await;
            assert!(matches!(result, Err(GatewayError::InvalidFare(_))));
        }
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn get_missing_returns_not_found() {
        let registry = RideRegistry::new();
        let result = registry.get(RideId::new(404)).await;
        assert!(matches!(result, Err(GatewayError::RideNotFound(_))));
    }

    #[tokio::test]
    async fn list_orders_by_most_recent_transition() {
        let registry = RideRegistry::new();
        let first = create_ride(&registry, 1).await;
        let _second = create_ride(&registry, 1).await;
        let third = create_ride(&registry, 1).await;

        // Freshly created, listing falls back to the id tie-break where
        // timestamps collide: newest first.
        let (page, total) = registry
            .list(RideFilter {
                limit: 10,
                ..RideFilter::default()
            })
            .await;
        assert_eq!(total, 3);
        let ids: Vec<u64> = page.iter().map(|s| s.ride_id.value()).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        // Touch the oldest ride; it must move to the front. The short
        // sleep guarantees a strictly later transition timestamp.
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let Ok(handle) = registry.get(first).await else {
            panic!("ride should exist");
        };
        {
            let mut ride = handle.write().await;
            let _ = ride.assign(DriverId::new(5));
        }
        let (page, _) = registry
            .list(RideFilter {
                limit: 10,
                ..RideFilter::default()
            })
            .await;
        let ids: Vec<u64> = page.iter().map(|s| s.ride_id.value()).collect();
        assert_eq!(ids.first(), Some(&first.value()));
        assert_eq!(ids.get(1), Some(&third.value()));
    }

    #[tokio::test]
    async fn list_filters_by_account_and_status() {
        let registry = RideRegistry::new();
        let mine = create_ride(&registry, 1).await;
        let _theirs = create_ride(&registry, 2).await;

        let (page, total) = registry
            .list(RideFilter {
                account_id: Some(AccountId::new(1)),
                limit: 10,
                ..RideFilter::default()
            })
            .await;
        assert_eq!(total, 1);
        assert_eq!(page.first().map(|s| s.ride_id), Some(mine));

        // Move "mine" to assigned and filter on status.
        let Ok(handle) = registry.get(mine).await else {
            panic!("ride should exist");
        };
        {
            let mut ride = handle.write().await;
            let _ = ride.assign(DriverId::new(7));
        }
        let (page, total) = registry
            .list(RideFilter {
                status: Some(RideStatus::Assigned),
                limit: 10,
                ..RideFilter::default()
            })
            .await;
        assert_eq!(total, 1);
        assert_eq!(page.first().map(|s| s.status), Some(RideStatus::Assigned));

        // Combined filter with no match.
        let (page, total) = registry
            .list(RideFilter {
                account_id: Some(AccountId::new(2)),
                status: Some(RideStatus::Assigned),
                limit: 10,
                ..RideFilter::default()
            })
            .await;
        assert_eq!(total, 0);
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn list_paginates_with_stable_total() {
        let registry = RideRegistry::new();
        for _ in 0..5 {
            let _ = create_ride(&registry, 1).await;
        }

        let (page, total) = registry
            .list(RideFilter {
                limit: 2,
                offset: 0,
                ..RideFilter::default()
            })
            .await;
        assert_eq!(total, 5);
        let ids: Vec<u64> = page.iter().map(|s| s.ride_id.value()).collect();
        assert_eq!(ids, vec![5, 4]);

        let (page, total) = registry
            .list(RideFilter {
                limit: 2,
                offset: 4,
                ..RideFilter::default()
            })
            .await;
        assert_eq!(total, 5);
        let ids: Vec<u64> = page.iter().map(|s| s.ride_id.value()).collect();
        assert_eq!(ids, vec![1]);

        // Offset past the end yields an empty page, not an error.
        let (page, total) = registry
            .list(RideFilter {
                limit: 2,
                offset: 10,
                ..RideFilter::default()
            })
            .await;
        assert_eq!(total, 5);
        assert!(page.is_empty());
    }
}
