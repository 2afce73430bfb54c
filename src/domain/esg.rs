//! ESG activity tracker: low-carbon activities and avoided-CO2 accounting.
//!
//! Each recorded activity stores the CO2 it avoided compared to a
//! combustion-engine trip over the same distance, computed at record time
//! and rounded to 4 decimal places. Summaries re-aggregate per user and
//! round to 3 decimal places.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::sync::RwLock;

use super::ids::IdSequence;
use super::{ActivityId, UserId};
use crate::error::GatewayError;

/// Avoidance factor for replacing a combustion trip, in kg CO2 per km.
pub const CO2_FACTOR_KG_PER_KM: Decimal = dec!(0.192);

/// Category of a low-carbon activity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    /// Trip made on foot.
    Walk,
    /// Trip made on an electric vehicle of the fleet.
    ERide,
    /// Battery charge session contributed.
    Charge,
    /// Trip made by bicycle.
    Bike,
    /// Anything else worth tracking.
    Other,
}

impl ActivityKind {
    /// Returns the wire name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::ERide => "e_ride",
            Self::Charge => "charge",
            Self::Bike => "bike",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "walk" => Ok(Self::Walk),
            "e_ride" => Ok(Self::ERide),
            "charge" => Ok(Self::Charge),
            "bike" => Ok(Self::Bike),
            "other" => Ok(Self::Other),
            other => Err(GatewayError::InvalidRequest(format!(
                "unknown activity type: {other}"
            ))),
        }
    }
}

/// One recorded low-carbon activity.
#[derive(Debug, Clone)]
pub struct Activity {
    /// Unique activity identifier.
    pub activity_id: ActivityId,
    /// User who performed the activity.
    pub user_id: UserId,
    /// Activity category.
    pub kind: ActivityKind,
    /// Distance covered, in kilometres.
    pub distance_km: Decimal,
    /// CO2 avoided, in kilograms, rounded to 4 decimal places.
    pub co2_saved_kg: Decimal,
    /// Optional free-text note.
    pub note: Option<String>,
    /// Record timestamp.
    pub timestamp: DateTime<Utc>,
}

/// Per-user aggregate of recorded activities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EsgSummary {
    /// Total distance, rounded to 3 decimal places.
    pub total_distance_km: Decimal,
    /// Total CO2 avoided, rounded to 3 decimal places.
    pub total_co2_saved_kg: Decimal,
    /// Number of recorded activities.
    pub activities_count: usize,
}

/// Store of recorded activities, grouped per user.
#[derive(Debug, Default)]
pub struct ActivityLog {
    activities: RwLock<HashMap<UserId, Vec<Activity>>>,
    sequence: IdSequence,
}

impl ActivityLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an activity and returns it with its computed CO2 savings.
    ///
    /// The saving is `distance * factor` rounded to 4 decimal places,
    /// where `factor` defaults to [`CO2_FACTOR_KG_PER_KM`] and negative
    /// overrides count as zero.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if `distance_km < 0`.
    pub async fn record(
        &self,
        user_id: UserId,
        kind: ActivityKind,
        distance_km: Decimal,
        co2_factor_override: Option<Decimal>,
        note: Option<&str>,
    ) -> Result<Activity, GatewayError> {
        if distance_km < Decimal::ZERO {
            return Err(GatewayError::InvalidRequest(
                "distance_km must be >= 0".to_string(),
            ));
        }
        let activity = Activity {
            activity_id: ActivityId::new(self.sequence.next_value()),
            user_id,
            kind,
            distance_km,
            co2_saved_kg: co2_saved(distance_km, co2_factor_override),
            note: note.map(str::trim).filter(|n| !n.is_empty()).map(String::from),
            timestamp: Utc::now(),
        };
        let mut map = self.activities.write().await;
        map.entry(user_id).or_default().push(activity.clone());
        Ok(activity)
    }

    /// Returns one page of a user's activities, newest first.
    pub async fn history(&self, user_id: UserId, limit: usize, offset: usize) -> Vec<Activity> {
        let map = self.activities.read().await;
        map.get(&user_id)
            .map(|activities| {
                activities
                    .iter()
                    .rev()
                    .skip(offset)
                    .take(limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Aggregates a user's activities. A user with no records gets an
    /// all-zero summary.
    pub async fn summary(&self, user_id: UserId) -> EsgSummary {
        let map = self.activities.read().await;
        let activities = map.get(&user_id).map(Vec::as_slice).unwrap_or_default();
        let total_distance = activities
            .iter()
            .fold(Decimal::ZERO, |acc, a| acc.saturating_add(a.distance_km));
        let total_co2 = activities
            .iter()
            .fold(Decimal::ZERO, |acc, a| acc.saturating_add(a.co2_saved_kg));
        EsgSummary {
            total_distance_km: total_distance.round_dp(3),
            total_co2_saved_kg: total_co2.round_dp(3),
            activities_count: activities.len(),
        }
    }
}

fn co2_saved(distance_km: Decimal, factor_override: Option<Decimal>) -> Decimal {
    let factor = factor_override.unwrap_or(CO2_FACTOR_KG_PER_KM);
    distance_km
        .max(Decimal::ZERO)
        .saturating_mul(factor.max(Decimal::ZERO))
        .round_dp(4)
}
