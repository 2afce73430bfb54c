//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams domain events to clients that
//! subscribed to the accounts they concern.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
