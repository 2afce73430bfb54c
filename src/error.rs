//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::{AccountId, PostId, RideId, RideStatus, UserId};
use rust_decimal::Decimal;

/// Structured JSON error response body.
///
/// All error responses follow this shape (`details` is omitted when
/// empty):
/// ```json
/// {
///   "error": {
///     "code": 4001,
///     "message": "insufficient funds: available 1000, required 1200"
///   }
/// }
/// ```
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see the code ranges on [`GatewayError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status                  |
/// |-----------|-------------------|------------------------------|
/// | 1000–1999 | Validation        | 400 Bad Request / 401        |
/// | 2000–2999 | State / Not Found | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server            | 500 Internal Server Error    |
/// | 4000–4999 | Payment           | 400 Bad Request / 402        |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Account with the given id was never opened.
    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    /// Ride with the given id was not found.
    #[error("ride not found: {0}")]
    RideNotFound(RideId),

    /// User with the given id is not registered.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// Community post with the given id was not found.
    #[error("post not found: {0}")]
    PostNotFound(PostId),

    /// A monetary amount failed validation (zero or negative).
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A fare or trip measurement failed validation.
    #[error("invalid fare: {0}")]
    InvalidFare(String),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Login with an unknown email or a wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The ride is not in a status that allows the requested action.
    #[error("invalid transition: cannot {action} a ride in status {from}")]
    InvalidTransition {
        /// Status the ride was in when the action was rejected.
        from: RideStatus,
        /// Action that was attempted.
        action: &'static str,
    },

    /// The account balance does not cover the requested withdrawal.
    #[error("insufficient funds: available {available}, required {required}")]
    InsufficientFunds {
        /// Balance at the time of the attempt.
        available: Decimal,
        /// Amount that was requested.
        required: Decimal,
    },

    /// A trip ended but the fare could not be charged; the ride has been
    /// moved to `payment_failed`.
    #[error("payment failed for ride {ride_id}: required {required}, available {available}")]
    PaymentFailed {
        /// Ride whose settlement was declined.
        ride_id: RideId,
        /// Fare that could not be charged.
        required: Decimal,
        /// Rider balance at the time of the attempt.
        available: Decimal,
    },

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidAmount(_) => 1001,
            Self::InvalidFare(_) => 1002,
            Self::InvalidRequest(_) => 1003,
            Self::InvalidCredentials => 1004,
            Self::AccountNotFound(_) => 2001,
            Self::RideNotFound(_) => 2002,
            Self::UserNotFound(_) => 2003,
            Self::PostNotFound(_) => 2004,
            Self::InvalidTransition { .. } => 2005,
            Self::Internal(_) => 3000,
            Self::InsufficientFunds { .. } => 4001,
            Self::PaymentFailed { .. } => 4002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidAmount(_)
            | Self::InvalidFare(_)
            | Self::InvalidRequest(_)
            | Self::InsufficientFunds { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::AccountNotFound(_)
            | Self::RideNotFound(_)
            | Self::UserNotFound(_)
            | Self::PostNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidTransition { .. } => StatusCode::CONFLICT,
            Self::PaymentFailed { .. } => StatusCode::PAYMENT_REQUIRED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
