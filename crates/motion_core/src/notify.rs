//! Property change notification
//!
//! A minimal observer list for view-models: subscribers receive the name of
//! every property whose value actually changed.

use smallvec::SmallVec;
use std::cell::{Cell, RefCell};

/// Identifier returned by [`PropertyNotifier::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Change notification payload
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertyChanged {
    pub property: &'static str,
}

/// Property change handler function type
pub type PropertyHandler = Box<dyn Fn(&PropertyChanged)>;

/// Dispatches property change notifications to registered handlers, in
/// subscription order
#[derive(Default)]
pub struct PropertyNotifier {
    handlers: RefCell<SmallVec<[(u64, PropertyHandler); 4]>>,
    next_id: Cell<u64>,
}

impl PropertyNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for all property changes
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&PropertyChanged) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.handlers.borrow_mut().push((id, Box::new(handler)));
        SubscriptionId(id)
    }

    /// Remove a handler. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        match handlers.iter().position(|(handler_id, _)| *handler_id == id.0) {
            Some(index) => {
                handlers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Notify every handler that `property` changed
    pub fn notify(&self, property: &'static str) {
        let event = PropertyChanged { property };
        // Handlers must not subscribe or unsubscribe while being notified.
        for (_, handler) in self.handlers.borrow().iter() {
            handler(&event);
        }
    }

    /// Assign `value` to `storage` and notify, only when the value differs.
    ///
    /// Returns whether the value changed.
    pub fn set<T: PartialEq>(&self, storage: &mut T, value: T, property: &'static str) -> bool {
        if *storage == value {
            return false;
        }
        *storage = value;
        self.notify(property);
        true
    }
}
