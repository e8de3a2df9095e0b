//! Listener lists and subscription handles.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<A: ?Sized> = Rc<dyn Fn(&A)>;

struct NotifierInner<A: ?Sized> {
    listeners: RefCell<Vec<(u64, Listener<A>)>>,
    next_id: Cell<u64>,
}

/// A list of listeners notified with a shared reference to a value.
///
/// Cloning a `Notifier` yields another handle to the same listener list.
/// Listeners are invoked in registration order. A listener may add or remove
/// listeners while being notified; such changes take effect on the next
/// notification.
pub struct Notifier<A: ?Sized> {
    inner: Rc<NotifierInner<A>>,
}

impl<A: ?Sized + 'static> Notifier<A> {
    /// Creates a notifier with no listeners.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(NotifierInner {
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Registers a listener.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or cancelled.
    #[must_use = "dropping the subscription removes the listener immediately"]
    pub fn listen(&self, listener: impl Fn(&A) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let listener: Listener<A> = Rc::new(listener);
        self.inner.listeners.borrow_mut().push((id, listener));

        let weak: Weak<NotifierInner<A>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
            }
        })
    }

    /// Invokes every registered listener with `value`.
    pub fn notify(&self, value: &A) {
        // Snapshot so listeners can (un)subscribe without a borrow conflict.
        let snapshot: Vec<Listener<A>> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in snapshot {
            listener(value);
        }
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl<A: ?Sized + 'static> Default for Notifier<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> Clone for Notifier<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A: ?Sized> fmt::Debug for Notifier<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

/// Handle for a registered listener.
///
/// Dropping the handle unregisters the listener. Handles do not keep the
/// notifier alive: if the notifier is gone, dropping is a no-op.
#[must_use = "dropping the subscription removes the listener immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Creates a subscription that runs `release` exactly once when cancelled
    /// or dropped.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription that releases nothing.
    pub fn empty() -> Self {
        Self { release: None }
    }

    /// Unregisters the listener now.
    pub fn cancel(mut self) {
        self.release_now();
    }

    /// Whether the listener is still registered through this handle.
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifies_in_registration_order() {
        let notifier = Notifier::<str>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = log.clone();
        let _a = notifier.listen(move |v| l1.borrow_mut().push(format!("a:{v}")));
        let l2 = log.clone();
        let _b = notifier.listen(move |v| l2.borrow_mut().push(format!("b:{v}")));

        notifier.notify("x");
        assert_eq!(*log.borrow(), vec!["a:x", "b:x"]);
    }

    #[test]
    fn dropping_subscription_removes_listener() {
        let notifier = Notifier::<u32>::new();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let sub = notifier.listen(move |_| h.set(h.get() + 1));

        notifier.notify(&1);
        drop(sub);
        notifier.notify(&2);

        assert_eq!(hits.get(), 1);
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn cancel_is_equivalent_to_drop() {
        let notifier = Notifier::<()>::new();
        let sub = notifier.listen(|_| {});
        assert_eq!(notifier.listener_count(), 1);
        sub.cancel();
        assert_eq!(notifier.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_notifier_is_harmless() {
        let notifier = Notifier::<()>::new();
        let sub = notifier.listen(|_| {});
        drop(notifier);
        drop(sub);
    }

    #[test]
    fn listener_may_unsubscribe_itself_while_notified() {
        let notifier = Notifier::<()>::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));

        let s = slot.clone();
        let h = hits.clone();
        let sub = notifier.listen(move |_| {
            h.set(h.get() + 1);
            s.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(sub);

        notifier.notify(&());
        notifier.notify(&());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn empty_subscription_is_inactive() {
        assert!(!Subscription::empty().is_active());
    }
}
