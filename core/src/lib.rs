//! Tessera Core Types
//!
//! This crate provides the foundational types used throughout Tessera:
//! - Identity types (EntityId, SubscriptionId)
//! - Payload and urgency types (Cookie, Priority)
//! - Deferred work (Hook, Command)

mod command;
mod cookie;
mod id;

pub use command::*;
pub use cookie::*;
pub use id::*;
