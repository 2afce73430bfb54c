//! System endpoints: health check and the ride-status catalog.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Ride lifecycle status info.
#[derive(Debug, Serialize, ToSchema)]
struct RideStatusInfo {
    status: &'static str,
    description: &'static str,
    assignable: bool,
    terminal: bool,
}

/// `GET /config/ride-statuses` — List ride lifecycle statuses.
#[utoipa::path(
    get,
    path = "/config/ride-statuses",
    tag = "System",
    summary = "List ride statuses",
    description = "Returns metadata for every status a ride can be in, including which ones accept a driver assignment.",
    responses(
        (status = 200, description = "Ride status catalog", body = Vec<RideStatusInfo>),
    )
)]
pub async fn ride_statuses_handler() -> impl IntoResponse {
    let statuses = vec![
        RideStatusInfo {
            status: "requested",
            description: "Created by the rider, waiting for a driver",
            assignable: true,
            terminal: false,
        },
        RideStatusInfo {
            status: "assigned",
            description: "A driver accepted, trip not yet started",
            assignable: false,
            terminal: false,
        },
        RideStatusInfo {
            status: "in_progress",
            description: "Trip under way",
            assignable: false,
            terminal: false,
        },
        RideStatusInfo {
            status: "completed",
            description: "Trip ended and fare charged",
            assignable: false,
            terminal: true,
        },
        RideStatusInfo {
            status: "canceled",
            description: "Abandoned before completion, no money moved",
            assignable: true,
            terminal: false,
        },
        RideStatusInfo {
            status: "payment_failed",
            description: "Trip ended but the fare could not be charged",
            assignable: true,
            terminal: false,
        },
    ];
    (StatusCode::OK, Json(statuses))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/ride-statuses", get(ride_statuses_handler))
}
