//! Observable values.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::notifier::{Notifier, Subscription};

/// An observable value.
///
/// `Signal` is a cheap handle: clones share the same value and subscriber
/// list. [`set`](Self::set) only notifies when the new value differs from the
/// current one, so subscribers observe changes, not writes.
pub struct Signal<T> {
    name: &'static str,
    value: Rc<RefCell<T>>,
    changed: Notifier<T>,
}

impl<T> Signal<T>
where
    T: Clone + PartialEq + fmt::Debug + 'static,
{
    /// Creates an anonymous signal holding `value`.
    pub fn new(value: T) -> Self {
        Self::named("signal", value)
    }

    /// Creates a signal with a name used in trace output.
    pub fn named(name: &'static str, value: T) -> Self {
        Self {
            name,
            value: Rc::new(RefCell::new(value)),
            changed: Notifier::new(),
        }
    }

    /// Returns the signal's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Runs `f` with a reference to the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Stores `value`, notifying subscribers if it differs from the current one.
    ///
    /// Returns `true` when the value changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.value.borrow_mut();
            if *current == value {
                return false;
            }
            tracing::trace!(signal = self.name, from = ?*current, to = ?value, "signal changed");
            *current = value.clone();
        }
        self.changed.notify(&value);
        true
    }

    /// Registers `f` to run with the new value after every change.
    #[must_use = "dropping the subscription removes the listener immediately"]
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        self.changed.listen(f)
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.changed.listener_count()
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            value: Rc::clone(&self.value),
            changed: self.changed.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("name", &self.name)
            .field("value", &*self.value.borrow())
            .finish()
    }
}
