//! REST endpoint handlers organized by resource.

pub mod community;
pub mod esg;
pub mod mobility;
pub mod system;
pub mod users;
pub mod wallet;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(users::routes())
        .merge(wallet::routes())
        .merge(mobility::routes())
        .merge(community::routes())
        .merge(esg::routes())
}
