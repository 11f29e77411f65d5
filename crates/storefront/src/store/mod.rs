//! Persisted state with change notification.
//!
//! Each store owns one storage key. Mutations write through to storage and
//! then hand the new state to every subscriber, so views subscribe once and
//! never need to be re-invoked by hand.

pub mod cart;
pub mod locale;

use std::cell::RefCell;

pub use cart::CartStore;
pub use locale::LocaleStore;

type Listener<T> = Box<dyn Fn(&T)>;

/// Subscriber list for a store.
///
/// Listeners run in subscription order. A listener must not subscribe to
/// the store it is being notified by.
pub struct Listeners<T> {
    inner: RefCell<Vec<Listener<T>>>,
}

impl<T> Listeners<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: RefCell::new(Vec::new()),
        }
    }

    /// Register `listener` for every later notification.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) {
        self.inner.borrow_mut().push(Box::new(listener));
    }

    /// Hand `value` to every listener.
    pub fn notify(&self, value: &T) {
        for listener in self.inner.borrow().iter() {
            listener(value);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Listeners<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.len())
            .finish()
    }
}
