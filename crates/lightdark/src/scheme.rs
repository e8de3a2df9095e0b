//! Color-scheme preference queries.
//!
//! A toggle in `auto` mode follows a [`ColorSchemeQuery`]: a live boolean
//! "prefers dark" with a change notification, the equivalent of
//! `matchMedia("(prefers-color-scheme: dark)")`.
//!
//! Two implementations ship with the crate:
//!
//! - [`SystemColorScheme`] asks the operating system through the `dark-light`
//!   crate. The OS offers no push notification, so the host calls
//!   [`SystemColorScheme::poll`] when it wants changes picked up.
//! - [`StaticColorScheme`] holds the preference in memory. It is what tests
//!   use, and what embedders inject when the preference comes from somewhere
//!   other than the OS (a browser bridge, a config file, a remote session).
//!
//! ## Overriding detection
//!
//! [`detect_preference`] goes through a process-wide detector that can be
//! replaced with [`set_preference_detector`]:
//!
//! ```rust
//! use lightdark::{detect_preference, set_preference_detector, Mode};
//!
//! set_preference_detector(|| Mode::Dark);
//! assert_eq!(detect_preference(), Mode::Dark);
//! # lightdark::reset_preference_detector();
//! ```

use std::cell::Cell;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use dark_light::Mode as OsMode;
use lightdark_signal::{Notifier, Subscription};
use once_cell::sync::Lazy;

use crate::mode::Mode;

/// A live "prefers dark" query with change notification.
pub trait ColorSchemeQuery {
    /// Whether the environment currently prefers a dark color scheme.
    fn matches(&self) -> bool;

    /// Registers `listener` to run whenever [`matches`](Self::matches) flips.
    fn on_change(&self, listener: Box<dyn Fn()>) -> Subscription;

    /// The current preference as a [`Mode`].
    fn preference(&self) -> Mode {
        Mode::from_dark(self.matches())
    }
}

type PreferenceDetector = fn() -> Mode;

static PREFERENCE_DETECTOR: Lazy<Mutex<PreferenceDetector>> =
    Lazy::new(|| Mutex::new(os_preference_detector));

/// Overrides the detector behind [`detect_preference`].
///
/// Useful in tests and for forcing a mode regardless of the OS setting.
pub fn set_preference_detector(detector: PreferenceDetector) {
    let mut guard = PREFERENCE_DETECTOR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = detector;
}

/// Restores OS detection.
pub fn reset_preference_detector() {
    set_preference_detector(os_preference_detector);
}

/// Asks the configured detector for the current preference.
pub fn detect_preference() -> Mode {
    let detector = *PREFERENCE_DETECTOR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    detector()
}

fn os_preference_detector() -> Mode {
    match dark_light::detect() {
        Ok(OsMode::Dark) => Mode::Dark,
        Ok(OsMode::Light) | Ok(OsMode::Unspecified) => Mode::Light,
        Err(err) => {
            tracing::debug!(error = ?err, "color scheme detection failed, assuming light");
            Mode::Light
        }
    }
}

/// The operating system's color-scheme preference.
///
/// The preference is sampled at construction and on each
/// [`poll`](Self::poll); listeners fire only when a poll observes a change.
pub struct SystemColorScheme {
    dark: Cell<bool>,
    changed: Notifier<()>,
}

impl SystemColorScheme {
    /// Samples the OS preference.
    pub fn new() -> Self {
        Self {
            dark: Cell::new(detect_preference().is_dark()),
            changed: Notifier::new(),
        }
    }

    /// Re-samples the OS preference. Returns `true` and notifies listeners if
    /// it changed since the last sample.
    pub fn poll(&self) -> bool {
        let dark = detect_preference().is_dark();
        if self.dark.replace(dark) == dark {
            return false;
        }
        tracing::debug!(preference = %Mode::from_dark(dark), "system color scheme changed");
        self.changed.notify(&());
        true
    }
}

impl Default for SystemColorScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSchemeQuery for SystemColorScheme {
    fn matches(&self) -> bool {
        self.dark.get()
    }

    fn on_change(&self, listener: Box<dyn Fn()>) -> Subscription {
        self.changed.listen(move |_| listener())
    }
}

impl fmt::Debug for SystemColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemColorScheme")
            .field("dark", &self.dark.get())
            .field("listeners", &self.changed.listener_count())
            .finish()
    }
}

/// An in-memory color-scheme preference.
pub struct StaticColorScheme {
    dark: Cell<bool>,
    changed: Notifier<()>,
}

impl StaticColorScheme {
    /// Starts with `preference`.
    pub fn new(preference: Mode) -> Self {
        Self {
            dark: Cell::new(preference.is_dark()),
            changed: Notifier::new(),
        }
    }

    /// Changes the preference, notifying listeners if it flipped.
    pub fn set(&self, preference: Mode) -> bool {
        let dark = preference.is_dark();
        if self.dark.replace(dark) == dark {
            return false;
        }
        self.changed.notify(&());
        true
    }

    /// Number of registered change listeners.
    pub fn listener_count(&self) -> usize {
        self.changed.listener_count()
    }
}

impl Default for StaticColorScheme {
    fn default() -> Self {
        Self::new(Mode::Light)
    }
}

impl ColorSchemeQuery for StaticColorScheme {
    fn matches(&self) -> bool {
        self.dark.get()
    }

    fn on_change(&self, listener: Box<dyn Fn()>) -> Subscription {
        self.changed.listen(move |_| listener())
    }
}

impl fmt::Debug for StaticColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticColorScheme")
            .field("dark", &self.dark.get())
            .field("listeners", &self.changed.listener_count())
            .finish()
    }
}
