//! Tessera Notify
//!
//! Publish/subscribe primitive that lets a stateful entity tell interested
//! parties that it changed.

mod callback;
mod notifier;

pub use callback::Callback;
pub use notifier::{Notifier, Subscription};
