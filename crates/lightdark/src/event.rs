//! Change events and their listeners.

use std::cell::RefCell;
use std::collections::HashMap;

use lightdark_signal::{Notifier, Subscription};
use serde::Serialize;

use crate::mode::Mode;
use crate::resolve::ResolvedMode;

/// Dispatched when a toggle's resolved mode changes.
///
/// Change events bubble, cross shadow boundaries, and cannot be cancelled.
/// Only `mode` and `auto` carry information; the flags are fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeChangeEvent {
    /// `darkmodechange` or `lightdarkchange`, depending on the variant.
    #[serde(rename = "type")]
    pub event_type: &'static str,
    pub mode: Mode,
    pub auto: bool,
    pub bubbles: bool,
    pub composed: bool,
    pub cancelable: bool,
}

impl ModeChangeEvent {
    /// Creates an event carrying `resolved`.
    pub fn new(event_type: &'static str, resolved: ResolvedMode) -> Self {
        Self {
            event_type,
            mode: resolved.mode,
            auto: resolved.auto,
            bubbles: true,
            composed: true,
            cancelable: false,
        }
    }

    /// The `{mode, auto}` payload.
    pub fn resolved(&self) -> ResolvedMode {
        ResolvedMode::new(self.mode, self.auto)
    }
}

/// Listeners keyed by event type.
#[derive(Debug, Default)]
pub(crate) struct EventListeners {
    by_type: RefCell<HashMap<String, Notifier<ModeChangeEvent>>>,
}

impl EventListeners {
    pub(crate) fn add(
        &self,
        event_type: &str,
        listener: impl Fn(&ModeChangeEvent) + 'static,
    ) -> Subscription {
        self.by_type
            .borrow_mut()
            .entry(event_type.to_string())
            .or_default()
            .listen(listener)
    }

    pub(crate) fn dispatch(&self, event: &ModeChangeEvent) {
        // Clone the handle out so listeners can register more listeners.
        let notifier = self.by_type.borrow().get(event.event_type).cloned();
        if let Some(notifier) = notifier {
            notifier.notify(event);
        }
    }

    pub(crate) fn count(&self, event_type: &str) -> usize {
        self.by_type
            .borrow()
            .get(event_type)
            .map_or(0, Notifier::listener_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn event_flags_are_fixed() {
        let event = ModeChangeEvent::new("darkmodechange", ResolvedMode::new(Mode::Dark, false));
        assert!(event.bubbles);
        assert!(event.composed);
        assert!(!event.cancelable);
        assert_eq!(event.resolved(), ResolvedMode::new(Mode::Dark, false));
    }

    #[test]
    fn dispatch_reaches_only_matching_type() {
        let listeners = EventListeners::default();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let _a = listeners.add("darkmodechange", move |_| h.set(h.get() + 1));
        let _b = listeners.add("other", |_| panic!("wrong type"));

        listeners.dispatch(&ModeChangeEvent::new(
            "darkmodechange",
            ResolvedMode::new(Mode::Light, true),
        ));
        assert_eq!(hits.get(), 1);
        assert_eq!(listeners.count("darkmodechange"), 1);
        assert_eq!(listeners.count("missing"), 0);
    }

    #[test]
    fn serializes_with_type_key() {
        let event = ModeChangeEvent::new("lightdarkchange", ResolvedMode::new(Mode::Dark, true));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "lightdarkchange");
        assert_eq!(json["mode"], "dark");
        assert_eq!(json["auto"], true);
    }
}
