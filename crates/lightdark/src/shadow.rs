//! The toggle's presentational surface.
//!
//! The component does not render anything itself. It drives a [`ShadowUi`]:
//! one checkbox-like control whose `checked` and `indeterminate` flags mirror
//! the resolved mode, and whose change notification reports user interaction.
//!
//! Programmatic writes to the flags never fire the change notification, only
//! interaction does, same as a DOM checkbox.

use std::cell::Cell;
use std::fmt;

use lightdark_signal::{Notifier, Subscription};

/// A checkbox-like control the toggle reads from and writes to.
pub trait ShadowUi {
    fn checked(&self) -> bool;

    fn set_checked(&self, checked: bool);

    fn indeterminate(&self) -> bool;

    fn set_indeterminate(&self, indeterminate: bool);

    /// Registers `listener` to run after user interaction, with the control's
    /// new `checked` state.
    fn on_change(&self, listener: Box<dyn Fn(bool)>) -> Subscription;
}

/// In-memory model of the toggle's hidden checkbox.
#[derive(Default)]
pub struct CheckboxUi {
    checked: Cell<bool>,
    indeterminate: Cell<bool>,
    changed: Notifier<bool>,
}

impl CheckboxUi {
    /// An unchecked, determinate checkbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates a click: clears `indeterminate`, flips `checked`, and fires
    /// the change notification.
    pub fn click(&self) {
        self.indeterminate.set(false);
        let checked = !self.checked.get();
        self.checked.set(checked);
        self.changed.notify(&checked);
    }

    /// Simulates the user putting the control into a specific state.
    ///
    /// Fires the change notification even if `checked` is unchanged, which
    /// is what happens when an indeterminate control is committed.
    pub fn input(&self, checked: bool) {
        self.indeterminate.set(false);
        self.checked.set(checked);
        self.changed.notify(&checked);
    }

    /// Number of registered change listeners.
    pub fn listener_count(&self) -> usize {
        self.changed.listener_count()
    }
}

impl ShadowUi for CheckboxUi {
    fn checked(&self) -> bool {
        self.checked.get()
    }

    fn set_checked(&self, checked: bool) {
        self.checked.set(checked);
    }

    fn indeterminate(&self) -> bool {
        self.indeterminate.get()
    }

    fn set_indeterminate(&self, indeterminate: bool) {
        self.indeterminate.set(indeterminate);
    }

    fn on_change(&self, listener: Box<dyn Fn(bool)>) -> Subscription {
        self.changed.listen(move |checked| listener(*checked))
    }
}

impl fmt::Debug for CheckboxUi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckboxUi")
            .field("checked", &self.checked.get())
            .field("indeterminate", &self.indeterminate.get())
            .finish()
    }
}
