//! User endpoint handlers: registration, login and profile management.
//!
//! Registration opens a wallet account carrying the same numeric id as the
//! user, so clients can derive one from the other.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{
    AvatarParams, LoginRequest, LoginResponse, ProfileResponse, ProfileUpdateRequest,
    RegisterRequest, RegisterResponse,
};
use crate::app_state::AppState;
use crate::domain::{AccountId, UserId};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /users/register` — Register a user and open their wallet.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for a malformed email, an
/// empty password or an email that is already taken.
#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    tag = "Users",
    summary = "Register a user",
    description = "Creates a user and opens a wallet account with the same numeric id.",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Invalid email, empty password or email taken", body = ErrorResponse),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let user_id = state.users.register(&req.email, &req.password).await?;
    let account_id = AccountId::new(user_id.value());
    state.wallet_service.open_account(account_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            status: "success".to_string(),
            user_id,
            account_id,
        }),
    ))
}

/// `POST /users/login` — Verify credentials.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidCredentials`] for an unknown email or a
/// wrong password, without saying which.
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    tag = "Users",
    summary = "Log a user in",
    description = "Verifies email and password and hands back a session token.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = LoginResponse),
        (status = 401, description = "Unknown email or wrong password", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let user_id = state
        .users
        .verify_credentials(&req.email, &req.password)
        .await?;
    Ok(Json(LoginResponse {
        status: "success".to_string(),
        user_id,
        token: uuid::Uuid::new_v4().to_string(),
    }))
}

/// `GET /users/:user_id/profile` — Fetch a profile.
///
/// # Errors
///
/// Returns [`GatewayError::UserNotFound`] for unknown ids.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/profile",
    tag = "Users",
    summary = "Get a user profile",
    description = "Returns the public profile of a registered user.",
    params(
        ("user_id" = u64, Path, description = "User id"),
    ),
    responses(
        (status = 200, description = "User profile", body = ProfileResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse, GatewayError> {
    let profile = state.users.profile(UserId::new(id)).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

/// `PATCH /users/:user_id/profile` — Update profile fields.
///
/// Fields absent from the body are untouched; fields present with an empty
/// string are cleared.
///
/// # Errors
///
/// Returns [`GatewayError::UserNotFound`] for unknown ids and
/// [`GatewayError::InvalidRequest`] for a non-empty phone shorter than 6
/// characters.
#[utoipa::path(
    patch,
    path = "/api/v1/users/{user_id}/profile",
    tag = "Users",
    summary = "Update a user profile",
    description = "Partially updates display name, phone and avatar. Empty strings clear the field.",
    params(
        ("user_id" = u64, Path, description = "User id"),
    ),
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "Phone too short", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<ProfileUpdateRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let profile = state
        .users
        .update_profile(UserId::new(id), req.into())
        .await?;
    Ok(Json(ProfileResponse::from(profile)))
}

/// `POST /users/:user_id/avatar` — Set or clear the avatar URL.
///
/// # Errors
///
/// Returns [`GatewayError::UserNotFound`] for unknown ids.
#[utoipa::path(
    post,
    path = "/api/v1/users/{user_id}/avatar",
    tag = "Users",
    summary = "Set a user avatar",
    description = "Stores the avatar URL passed as a query parameter. An empty value clears it.",
    params(
        ("user_id" = u64, Path, description = "User id"),
        AvatarParams,
    ),
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
pub async fn set_avatar(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(params): Query<AvatarParams>,
) -> Result<impl IntoResponse, GatewayError> {
    let profile = state.users.set_avatar(UserId::new(id), &params.url).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

/// User routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route(
            "/users/{user_id}/profile",
            get(get_profile).patch(update_profile),
        )
        .route("/users/{user_id}/avatar", post(set_avatar))
}
