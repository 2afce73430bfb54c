//! # beryl-gateway
//!
//! REST API and WebSocket gateway for the Beryl e-mobility platform:
//! prepaid wallets, ride lifecycle and settlement, community feed and
//! ESG impact tracking.
//!
//! All state lives in memory behind async locks; money is [`rust_decimal::Decimal`]
//! end to end and every mutation broadcasts a [`domain::DomainEvent`] to
//! WebSocket subscribers.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── WalletService / MobilityService (service/)
//!     ├── PaymentCoordinator (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── Ledger / RideRegistry (domain/)
//!     └── UserDirectory / CommunityBoard / ActivityLog (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
