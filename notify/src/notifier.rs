//! Subscriber registry and fan-out.

use std::convert::Infallible;

use tessera_core::{Cookie, SubscriptionId};
use tracing::trace;

use crate::Callback;

/// One registered `(listener, cookie)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription<L> {
    pub id: SubscriptionId,
    pub listener: L,
    pub cookie: Cookie,
}

/// Broadcasts "something changed" to registered listeners.
///
/// Subscribing is idempotent per `(listener, cookie)` pair and unsubscribing
/// something absent is not an error. Listeners are delivered in the order
/// they subscribed.
#[derive(Debug, Clone)]
pub struct Notifier<L = Callback> {
    subscriptions: Vec<Subscription<L>>,
    next_id: u64,
}

impl<L> Default for Notifier<L> {
    fn default() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 1,
        }
    }
}

impl<L: Clone + PartialEq> Notifier<L> {
    /// Create a notifier with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` to receive `cookie` on every publish.
    ///
    /// Registering a pair that is already present returns its existing id.
    pub fn subscribe(&mut self, listener: L, cookie: Cookie) -> SubscriptionId {
        if let Some(existing) = self.find(&listener, cookie) {
            return existing.id;
        }

        let id = SubscriptionId::new(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            listener,
            cookie,
        });
        id
    }

    /// Remove a subscription by handle. Returns false if it was not present.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Remove the subscription for a `(listener, cookie)` pair, if any.
    pub fn unsubscribe_listener(&mut self, listener: &L, cookie: Cookie) -> bool {
        match self.find(listener, cookie).map(|s| s.id) {
            Some(id) => self.unsubscribe(id),
            None => false,
        }
    }

    /// Returns true if the pair is registered.
    pub fn is_subscribed(&self, listener: &L, cookie: Cookie) -> bool {
        self.find(listener, cookie).is_some()
    }

    /// Number of subscriptions.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Copy of the current subscriptions.
    pub fn snapshot(&self) -> Vec<Subscription<L>> {
        self.subscriptions.clone()
    }

    /// Deliver to every subscriber registered when the call starts.
    ///
    /// Subscriptions added or removed by `deliver` do not change who is
    /// reached by this call. The first error stops the fan-out.
    pub fn publish_with<E>(&self, mut deliver: impl FnMut(&L, Cookie) -> Result<(), E>) -> Result<(), E> {
        let snapshot = self.snapshot();
        trace!(subscribers = snapshot.len(), "publishing");
        for subscription in &snapshot {
            deliver(&subscription.listener, subscription.cookie)?;
        }
        Ok(())
    }

    fn find(&self, listener: &L, cookie: Cookie) -> Option<&Subscription<L>> {
        self.subscriptions
            .iter()
            .find(|s| s.cookie == cookie && &s.listener == listener)
    }
}

impl Notifier<Callback> {
    /// Invoke `callback(cookie)` for every subscriber.
    pub fn publish(&self) {
        let _ = self.publish_with(|callback, cookie| {
            callback.call(cookie);
            Ok::<(), Infallible>(())
        });
    }
}
