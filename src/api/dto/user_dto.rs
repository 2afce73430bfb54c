//! User DTOs: registration, login, profile.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AccountId, ProfileUpdate, UserId, UserProfile};

/// Request body for `POST /users/register`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Registration email, unique across the platform.
    pub email: String,
    /// Password, hashed before storage.
    pub password: String,
}

/// Response body for `POST /users/register`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// Always `"success"`.
    pub status: String,
    /// Freshly allocated user id.
    pub user_id: UserId,
    /// Wallet account opened alongside the user.
    pub account_id: AccountId,
}

/// Request body for `POST /users/login`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Registration email.
    pub email: String,
    /// Password to verify.
    pub password: String,
}

/// Response body for `POST /users/login`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Always `"success"`.
    pub status: String,
    /// Authenticated user.
    pub user_id: UserId,
    /// Opaque session token. Nothing consumes it yet.
    pub token: String,
}

/// Profile view returned by all profile endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    /// User identifier.
    pub user_id: UserId,
    /// Registration email.
    pub email: String,
    /// Public display name, if set.
    pub display_name: Option<String>,
    /// Phone number, if set.
    pub phone: Option<String>,
    /// Avatar URL, if set.
    pub avatar_url: Option<String>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            user_id: profile.user_id,
            email: profile.email,
            display_name: profile.display_name,
            phone: profile.phone,
            avatar_url: profile.avatar_url,
        }
    }
}

/// Request body for `PATCH /users/:id/profile`.
///
/// Absent fields are untouched; present-but-empty strings clear.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProfileUpdateRequest {
    /// New display name.
    #[serde(default)]
    pub display_name: Option<String>,
    /// New phone number (at least 6 characters when non-empty).
    #[serde(default)]
    pub phone: Option<String>,
    /// New avatar URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl From<ProfileUpdateRequest> for ProfileUpdate {
    fn from(req: ProfileUpdateRequest) -> Self {
        Self {
            display_name: req.display_name,
            phone: req.phone,
            avatar_url: req.avatar_url,
        }
    }
}

/// Query parameters for `POST /users/:id/avatar`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AvatarParams {
    /// New avatar URL; empty clears the field.
    pub url: String,
}
