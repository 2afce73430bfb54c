//! ESG endpoint handlers: activity recording, history and summary.

use std::str::FromStr;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ActivityCreateRequest, ActivityDto, EsgSummaryResponse, PageParams};
use crate::app_state::AppState;
use crate::domain::{ActivityKind, UserId};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /esg/activity` — Record a low-carbon activity.
///
/// # Errors
///
/// Returns [`GatewayError::UserNotFound`] for unregistered users and
/// [`GatewayError::InvalidRequest`] for an unknown activity type or a
/// negative distance.
#[utoipa::path(
    post,
    path = "/api/v1/esg/activity",
    tag = "ESG",
    summary = "Record an activity",
    description = "Records a low-carbon activity and computes the CO2 it avoided.",
    request_body = ActivityCreateRequest,
    responses(
        (status = 201, description = "Activity recorded", body = ActivityDto),
        (status = 400, description = "Unknown activity type or negative distance", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn add_activity(
    State(state): State<AppState>,
    Json(req): Json<ActivityCreateRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    if !state.users.contains(req.user_id).await {
        return Err(GatewayError::UserNotFound(req.user_id));
    }
    let kind = ActivityKind::from_str(&req.activity_type)?;
    let activity = state
        .esg
        .record(
            req.user_id,
            kind,
            req.distance_km,
            req.co2_factor_override,
            req.note.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ActivityDto::from(activity))))
}

/// `GET /esg/history/:user_id` — Activity history, newest first.
///
/// # Errors
///
/// Returns [`GatewayError::UserNotFound`] for unregistered users.
#[utoipa::path(
    get,
    path = "/api/v1/esg/history/{user_id}",
    tag = "ESG",
    summary = "Get activity history",
    description = "Returns a user's recorded activities in reverse chronological order. Defaults to a page of 50.",
    params(
        ("user_id" = u64, Path, description = "User id"),
        PageParams,
    ),
    responses(
        (status = 200, description = "Page of activities", body = Vec<ActivityDto>),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let user_id = UserId::new(id);
    if !state.users.contains(user_id).await {
        return Err(GatewayError::UserNotFound(user_id));
    }
    let (limit, offset) = params.resolve(50);
    let activities: Vec<ActivityDto> = state
        .esg
        .history(user_id, limit, offset)
        .await
        .into_iter()
        .map(ActivityDto::from)
        .collect();
    Ok(Json(activities))
}

/// `GET /esg/summary/:user_id` — Aggregated impact of a user.
///
/// # Errors
///
/// Returns [`GatewayError::UserNotFound`] for unregistered users.
#[utoipa::path(
    get,
    path = "/api/v1/esg/summary/{user_id}",
    tag = "ESG",
    summary = "Get impact summary",
    description = "Returns total distance, total CO2 avoided and the activity count. All zeros for a user with no records.",
    params(
        ("user_id" = u64, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "Impact summary", body = EsgSummaryResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn summary(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, GatewayError> {
    let user_id = UserId::new(id);
    if !state.users.contains(user_id).await {
        return Err(GatewayError::UserNotFound(user_id));
    }
    let summary = state.esg.summary(user_id).await;
    Ok(Json(EsgSummaryResponse::new(user_id, summary)))
}

/// ESG routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/esg/activity", post(add_activity))
        .route("/esg/history/{user_id}", get(history))
        .route("/esg/summary/{user_id}", get(summary))
}
