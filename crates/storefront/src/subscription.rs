//! Change notification for stores.
//!
//! Views register a callback with [`Subscribers::subscribe`] and keep the
//! returned [`Subscription`] for as long as they are mounted. Dropping the
//! handle unregisters the callback.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

struct Registry<T: ?Sized> {
    next_id: u64,
    callbacks: Vec<(u64, Rc<dyn Fn(&T)>)>,
}

/// Registry of callbacks interested in values of type `T`.
pub struct Subscribers<T: ?Sized> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T: ?Sized + 'static> Subscribers<T> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                callbacks: Vec::new(),
            })),
        }
    }

    /// Register `callback`; it runs on every [`notify`](Self::notify) until
    /// the returned handle is dropped.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let callback: Rc<dyn Fn(&T)> = Rc::new(callback);
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.callbacks.push((id, callback));
            id
        };

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.registry);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry
                        .borrow_mut()
                        .callbacks
                        .retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    /// Invoke every registered callback with `value`, in registration order.
    ///
    /// The callback list is copied before the first call, so callbacks may
    /// subscribe or unsubscribe while being notified. Changes take effect
    /// from the next notification.
    pub fn notify(&self, value: &T) {
        let callbacks: Vec<Rc<dyn Fn(&T)>> = self
            .registry
            .borrow()
            .callbacks
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();

        for callback in callbacks {
            callback(value);
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.borrow().callbacks.len()
    }

    /// True when nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: ?Sized + 'static> Default for Subscribers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Subscribers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.registry.borrow().callbacks.len())
            .finish()
    }
}

/// Handle for a registered callback. Unsubscribes on drop.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Keep the callback registered for the lifetime of the store.
    pub fn detach(mut self) {
        self.release = None;
    }

    /// Unregister now. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
