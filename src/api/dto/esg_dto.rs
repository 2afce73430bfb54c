//! ESG DTOs: activity recording and per-user impact summaries.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Activity, ActivityId, ActivityKind, EsgSummary, UserId};

/// Request body for `POST /esg/activity`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ActivityCreateRequest {
    /// User who performed the activity; must be registered.
    pub user_id: UserId,
    /// Activity category (`walk`, `e_ride`, `charge`, `bike`, `other`).
    pub activity_type: String,
    /// Distance covered in kilometres. Defaults to 0.
    #[serde(default)]
    pub distance_km: Decimal,
    /// Custom avoidance factor in kg CO2 per km, replacing the default.
    #[serde(default)]
    pub co2_factor_override: Option<Decimal>,
    /// Optional free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

/// One recorded activity as returned by the ESG endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityDto {
    /// Activity identifier.
    pub activity_id: ActivityId,
    /// User who performed the activity.
    pub user_id: UserId,
    /// Activity category.
    pub activity_type: ActivityKind,
    /// Distance covered in kilometres.
    pub distance_km: Decimal,
    /// CO2 avoided in kilograms, rounded to 4 decimal places.
    pub co2_saved_kg: Decimal,
    /// Optional free-text note.
    pub note: Option<String>,
    /// Record timestamp.
    pub timestamp: DateTime<Utc>,
}

impl From<Activity> for ActivityDto {
    fn from(activity: Activity) -> Self {
        Self {
            activity_id: activity.activity_id,
            user_id: activity.user_id,
            activity_type: activity.kind,
            distance_km: activity.distance_km,
            co2_saved_kg: activity.co2_saved_kg,
            note: activity.note,
            timestamp: activity.timestamp,
        }
    }
}

/// Per-user impact summary for `GET /esg/summary/:user_id`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EsgSummaryResponse {
    /// User the summary belongs to.
    pub user_id: UserId,
    /// Total distance in kilometres, rounded to 3 decimal places.
    pub total_distance_km: Decimal,
    /// Total CO2 avoided in kilograms, rounded to 3 decimal places.
    pub total_co2_saved_kg: Decimal,
    /// Number of recorded activities.
    pub activities_count: usize,
}

impl EsgSummaryResponse {
    /// Builds the response from a per-user aggregate.
    #[must_use]
    pub fn new(user_id: UserId, summary: EsgSummary) -> Self {
        Self {
            user_id,
            total_distance_km: summary.total_distance_km,
            total_co2_saved_kg: summary.total_co2_saved_kg,
            activities_count: summary.activities_count,
        }
    }
}
