//! Service layer: business logic orchestration.
//!
//! [`WalletService`] coordinates ledger operations, [`MobilityService`]
//! drives the ride lifecycle, and [`PaymentCoordinator`] joins the two
//! at settlement time. All of them emit events through the
//! [`super::domain::EventBus`].

pub mod mobility_service;
pub mod payment;
pub mod wallet_service;

pub use mobility_service::MobilityService;
pub use payment::{PaymentCoordinator, Settlement};
pub use wallet_service::WalletService;
