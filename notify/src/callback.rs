//! Closure listeners.

use std::fmt;
use std::rc::Rc;

use tessera_core::Cookie;

/// A listener closure invoked as `callback(cookie)`.
///
/// Two callbacks are equal only if they share the same allocation, so
/// subscribing a clone of a callback is recognised as the same listener.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn(Cookie)>);

impl Callback {
    pub fn new(f: impl Fn(Cookie) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, cookie: Cookie) {
        (self.0)(cookie)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Callback {}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0))
    }
}
