//! Mobility endpoint handlers: ride creation, lifecycle transitions,
//! settlement and listing.

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    AssignParams, PageMeta, RideCompleteRequest, RideCreateRequest, RideDto, RideListParams,
    RideListResponse,
};
use crate::app_state::AppState;
use crate::domain::{RideFilter, RideId, RideStatus};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /mobility/rides` — Request a new ride.
///
/// # Errors
///
/// Returns [`GatewayError::AccountNotFound`] when the paying account was
/// never opened and [`GatewayError::InvalidFare`] for a non-positive
/// estimate.
#[utoipa::path(
    post,
    path = "/api/v1/mobility/rides",
    tag = "Mobility",
    summary = "Request a ride",
    description = "Creates a ride in `requested` status for an open wallet account.",
    request_body = RideCreateRequest,
    responses(
        (status = 201, description = "Ride created", body = RideDto),
        (status = 400, description = "Invalid estimate", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
    )
)]
pub async fn create_ride(
    State(state): State<AppState>,
    Json(req): Json<RideCreateRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let snapshot = state
        .mobility_service
        .request_ride(
            req.account_id,
            &req.pickup,
            &req.destination,
            req.estimated_fare,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(RideDto::from(snapshot))))
}

/// `GET /mobility/rides/:ride_id` — Fetch one ride.
///
/// # Errors
///
/// Returns [`GatewayError::RideNotFound`] for unknown ids.
#[utoipa::path(
    get,
    path = "/api/v1/mobility/rides/{ride_id}",
    tag = "Mobility",
    summary = "Get ride details",
    description = "Returns the full ride including trip outcome fields once a settlement was attempted.",
    params(
        ("ride_id" = u64, Path, description = "Ride id"),
    ),
    responses(
        (status = 200, description = "Ride details", body = RideDto),
        (status = 404, description = "Ride not found", body = ErrorResponse),
    )
)]
pub async fn get_ride(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, GatewayError> {
    let snapshot = state.mobility_service.ride(RideId::new(id)).await?;
    Ok(Json(RideDto::from(snapshot)))
}

/// `GET /mobility/rides` — List rides, newest first.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] when the `status` filter is
/// not a known ride status.
#[utoipa::path(
    get,
    path = "/api/v1/mobility/rides",
    tag = "Mobility",
    summary = "List rides",
    description = "Returns a page of rides ordered by most recent update, optionally filtered by account and status.",
    params(RideListParams),
    responses(
        (status = 200, description = "Page of rides", body = RideListResponse),
        (status = 400, description = "Unknown status filter", body = ErrorResponse),
    )
)]
pub async fn list_rides(
    State(state): State<AppState>,
    Query(params): Query<RideListParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let status = params
        .status
        .as_deref()
        .map(RideStatus::from_str)
        .transpose()?;
    let (limit, offset) = params.page();
    let filter = RideFilter {
        account_id: params.account_id,
        status,
        limit,
        offset,
    };
    let (snapshots, total) = state.mobility_service.list_rides(filter).await;
    let data: Vec<RideDto> = snapshots.into_iter().map(RideDto::from).collect();
    Ok(Json(RideListResponse {
        data,
        pagination: PageMeta {
            limit: limit as u32,
            offset: offset as u32,
            total: total as u32,
        },
    }))
}

/// `POST /mobility/rides/:ride_id/assign` — Put a driver on the ride.
///
/// # Errors
///
/// Returns [`GatewayError::RideNotFound`] for unknown ids and
/// [`GatewayError::InvalidTransition`] when the ride is not assignable.
#[utoipa::path(
    post,
    path = "/api/v1/mobility/rides/{ride_id}/assign",
    tag = "Mobility",
    summary = "Assign a driver",
    description = "Moves a `requested`, `canceled` or `payment_failed` ride to `assigned`.",
    params(
        ("ride_id" = u64, Path, description = "Ride id"),
        AssignParams,
    ),
    responses(
        (status = 200, description = "Driver assigned", body = RideDto),
        (status = 404, description = "Ride not found", body = ErrorResponse),
        (status = 409, description = "Ride not assignable", body = ErrorResponse),
    )
)]
pub async fn assign_ride(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(params): Query<AssignParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let snapshot = state
        .mobility_service
        .assign_driver(RideId::new(id), params.driver_id)
        .await?;
    Ok(Json(RideDto::from(snapshot)))
}

/// `POST /mobility/rides/:ride_id/start` — Begin the trip.
///
/// # Errors
///
/// Returns [`GatewayError::RideNotFound`] for unknown ids and
/// [`GatewayError::InvalidTransition`] unless the ride is `assigned`.
#[utoipa::path(
    post,
    path = "/api/v1/mobility/rides/{ride_id}/start",
    tag = "Mobility",
    summary = "Start a ride",
    description = "Moves an `assigned` ride to `in_progress`.",
    params(
        ("ride_id" = u64, Path, description = "Ride id"),
    ),
    responses(
        (status = 200, description = "Ride started", body = RideDto),
        (status = 404, description = "Ride not found", body = ErrorResponse),
        (status = 409, description = "Ride not assigned", body = ErrorResponse),
    )
)]
pub async fn start_ride(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, GatewayError> {
    let snapshot = state.mobility_service.start_ride(RideId::new(id)).await?;
    Ok(Json(RideDto::from(snapshot)))
}

/// `POST /mobility/rides/:ride_id/complete` — End the trip and charge the
/// fare.
///
/// On a declined settlement the ride moves to `payment_failed`, the trip
/// outcome is recorded and the endpoint answers `402`. A later retry
/// (re-assign, start, complete) charges the fare recorded here regardless
/// of the values submitted with the retry.
///
/// # Errors
///
/// Returns [`GatewayError::RideNotFound`] for unknown ids,
/// [`GatewayError::InvalidTransition`] unless the ride is `in_progress`,
/// [`GatewayError::InvalidFare`] for out-of-range trip values and
/// [`GatewayError::PaymentFailed`] when the balance cannot cover the fare.
#[utoipa::path(
    post,
    path = "/api/v1/mobility/rides/{ride_id}/complete",
    tag = "Mobility",
    summary = "Complete a ride",
    description = "Settles the fare against the rider's wallet. Answers 402 and moves the ride to `payment_failed` when the balance is insufficient.",
    params(
        ("ride_id" = u64, Path, description = "Ride id"),
    ),
    request_body = RideCompleteRequest,
    responses(
        (status = 200, description = "Ride completed and fare charged", body = RideDto),
        (status = 400, description = "Invalid trip values", body = ErrorResponse),
        (status = 402, description = "Settlement declined", body = ErrorResponse),
        (status = 404, description = "Ride not found", body = ErrorResponse),
        (status = 409, description = "Ride not in progress", body = ErrorResponse),
    )
)]
pub async fn complete_ride(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<RideCompleteRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let snapshot = state
        .mobility_service
        .complete_ride(
            RideId::new(id),
            req.actual_fare,
            req.distance_km,
            req.duration_min,
        )
        .await?;
    Ok(Json(RideDto::from(snapshot)))
}

/// `POST /mobility/rides/:ride_id/cancel` — Cancel the ride.
///
/// # Errors
///
/// Returns [`GatewayError::RideNotFound`] for unknown ids and
/// [`GatewayError::InvalidTransition`] when the ride already completed.
#[utoipa::path(
    post,
    path = "/api/v1/mobility/rides/{ride_id}/cancel",
    tag = "Mobility",
    summary = "Cancel a ride",
    description = "Cancels a ride that has not completed. No money moves.",
    params(
        ("ride_id" = u64, Path, description = "Ride id"),
    ),
    responses(
        (status = 200, description = "Ride canceled", body = RideDto),
        (status = 404, description = "Ride not found", body = ErrorResponse),
        (status = 409, description = "Ride already completed", body = ErrorResponse),
    )
)]
pub async fn cancel_ride(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, GatewayError> {
    let snapshot = state.mobility_service.cancel_ride(RideId::new(id)).await?;
    Ok(Json(RideDto::from(snapshot)))
}

/// Mobility routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/mobility/rides", post(create_ride).get(list_rides))
        .route("/mobility/rides/{ride_id}", get(get_ride))
        .route("/mobility/rides/{ride_id}/assign", post(assign_ride))
        .route("/mobility/rides/{ride_id}/start", post(start_ride))
        .route("/mobility/rides/{ride_id}/complete", post(complete_ride))
        .route("/mobility/rides/{ride_id}/cancel", post(cancel_ride))
}
