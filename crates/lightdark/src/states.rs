//! Custom states exposed for styling.
//!
//! The toggle publishes its resolved mode as a small set of named states,
//! like `ElementInternals.states`: exactly one of `light`/`dark`, plus `auto`
//! while the mode follows the system preference.

use std::collections::BTreeSet;

use crate::mode::Mode;
use crate::resolve::ResolvedMode;

/// State name set while the mode follows the system preference.
pub const AUTO_STATE: &str = "auto";

/// A set of custom state names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomStateSet {
    states: BTreeSet<String>,
}

impl CustomStateSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a state. Returns `false` if it was already set.
    pub fn add(&mut self, state: impl Into<String>) -> bool {
        self.states.insert(state.into())
    }

    /// Removes a state. Returns `true` if it was set.
    pub fn delete(&mut self, state: &str) -> bool {
        self.states.remove(state)
    }

    /// Whether `state` is set.
    pub fn has(&self, state: &str) -> bool {
        self.states.contains(state)
    }

    /// Number of states set.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether no state is set.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// State names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(String::as_str)
    }

    /// Makes the set reflect `resolved`, leaving unrelated states alone.
    pub(crate) fn sync(&mut self, resolved: ResolvedMode) {
        self.add(resolved.mode.as_str());
        self.delete(resolved.mode.toggled().as_str());
        if resolved.auto {
            self.add(AUTO_STATE);
        } else {
            self.delete(AUTO_STATE);
        }
    }

    /// The mode state currently set, if any.
    pub fn mode(&self) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| self.has(m.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_sets_exclusive_mode_and_auto_flag() {
        let mut states = CustomStateSet::new();

        states.sync(ResolvedMode::new(Mode::Dark, true));
        assert_eq!(states.iter().collect::<Vec<_>>(), vec!["auto", "dark"]);

        states.sync(ResolvedMode::new(Mode::Light, false));
        assert_eq!(states.iter().collect::<Vec<_>>(), vec!["light"]);
        assert_eq!(states.mode(), Some(Mode::Light));
    }

    #[test]
    fn sync_keeps_foreign_states() {
        let mut states = CustomStateSet::new();
        states.add("focused");
        states.sync(ResolvedMode::new(Mode::Light, true));
        assert!(states.has("focused"));
        assert_eq!(states.len(), 3);
    }

    #[test]
    fn empty_set_has_no_mode() {
        let states = CustomStateSet::new();
        assert!(states.is_empty());
        assert_eq!(states.mode(), None);
    }
}
