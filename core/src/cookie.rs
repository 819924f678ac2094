//! Opaque payloads carried by subscriptions and commands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque value handed back unchanged when a callback or command runs.
///
/// Listeners typically use it to tell which neighbour, row or direction a
/// notification came from. The empty cookie is what an entity receives for
/// its initial evaluation after starting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cookie(Option<u64>);

impl Cookie {
    /// The cookie that carries nothing.
    pub const EMPTY: Cookie = Cookie(None);

    /// Create a cookie carrying a value.
    pub const fn new(value: u64) -> Self {
        Self(Some(value))
    }

    /// The carried value, if any.
    pub fn value(&self) -> Option<u64> {
        self.0
    }

    /// Returns true if this is the empty cookie.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl From<u64> for Cookie {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<Option<u64>> for Cookie {
    fn from(value: Option<u64>) -> Self {
        Self(value)
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "-"),
        }
    }
}
