//! Domain layer: entities, registries and the event system.
//!
//! This module contains the server-side domain model: typed identifiers,
//! the account ledger and ride registry with their per-entity locking,
//! the collaborator stores (users, community, ESG), and the event bus for
//! broadcasting state changes.

pub mod account;
pub mod community;
pub mod esg;
pub mod event;
pub mod event_bus;
pub mod ids;
pub mod ledger;
pub mod ride;
pub mod ride_registry;
pub mod user;

pub use account::{Account, TransactionKind, TxRecord};
pub use community::{Comment, CommunityBoard, PostSnapshot};
pub use esg::{Activity, ActivityKind, ActivityLog, EsgSummary};
pub use event::DomainEvent;
pub use event_bus::EventBus;
pub use ids::{AccountId, ActivityId, CommentId, DriverId, IdSequence, PostId, RideId, UserId};
pub use ledger::Ledger;
pub use ride::{Ride, RideStatus, TripRecord};
pub use ride_registry::{RideFilter, RideRegistry, RideSnapshot};
pub use user::{ProfileUpdate, User, UserDirectory, UserProfile};
