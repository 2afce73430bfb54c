//! Data Transfer Objects for REST request/response serialization.
//!
//! All monetary and distance amounts are [`rust_decimal::Decimal`] and
//! serialize as JSON strings to prevent precision loss.

pub mod common_dto;
pub mod community_dto;
pub mod esg_dto;
pub mod ride_dto;
pub mod user_dto;
pub mod wallet_dto;

pub use common_dto::*;
pub use community_dto::*;
pub use esg_dto::*;
pub use ride_dto::*;
pub use user_dto::*;
pub use wallet_dto::*;
