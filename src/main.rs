//! beryl-gateway server entry point.
//!
//! Starts the Axum HTTP server with REST and WebSocket endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use beryl_gateway::api;
use beryl_gateway::app_state::AppState;
use beryl_gateway::config::GatewayConfig;
use beryl_gateway::domain::{
    ActivityLog, CommunityBoard, EventBus, Ledger, RideRegistry, UserDirectory,
};
use beryl_gateway::service::{MobilityService, WalletService};
use beryl_gateway::ws::handler::ws_handler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = GatewayConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting beryl-gateway");

    // Build domain layer
    let event_bus = EventBus::new(config.event_bus_capacity);
    let ledger = Arc::new(Ledger::new());
    let rides = Arc::new(RideRegistry::new());

    // Build service layer; wallet and mobility settle against the same ledger
    let wallet_service = Arc::new(WalletService::new(Arc::clone(&ledger), event_bus.clone()));
    let mobility_service = Arc::new(MobilityService::new(rides, ledger, event_bus.clone()));

    // Build application state
    let app_state = AppState {
        wallet_service,
        mobility_service,
        users: Arc::new(UserDirectory::new()),
        community: Arc::new(CommunityBoard::new()),
        esg: Arc::new(ActivityLog::new()),
        event_bus,
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
