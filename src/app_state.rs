//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::{ActivityLog, CommunityBoard, EventBus, UserDirectory};
use crate::service::{MobilityService, WalletService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// The wallet and mobility services share one [`crate::domain::Ledger`]
/// so ride settlement debits the same accounts the wallet endpoints
/// operate on.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Wallet service for all ledger operations.
    pub wallet_service: Arc<WalletService>,
    /// Mobility service for the ride lifecycle.
    pub mobility_service: Arc<MobilityService>,
    /// Registered users and their profiles.
    pub users: Arc<UserDirectory>,
    /// Community posts and comments.
    pub community: Arc<CommunityBoard>,
    /// ESG activity log.
    pub esg: Arc<ActivityLog>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}
