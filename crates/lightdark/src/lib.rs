//! A tri-state light/dark/auto mode toggle.
//!
//! `lightdark` models a theme switcher component: the user picks light, dark
//! or auto, the page author can preset a choice through the `mode` attribute,
//! and auto follows the system color-scheme preference. Whenever the
//! effective mode flips, the toggle dispatches a change event carrying
//! `{mode, auto}`.
//!
//! # Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use lightdark::{Mode, StaticColorScheme, ToggleElement, Variant};
//!
//! let system = Rc::new(StaticColorScheme::new(Mode::Light));
//! let toggle = ToggleElement::builder(Variant::LightDark)
//!     .color_scheme(system.clone())
//!     .build();
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let log = seen.clone();
//! let _sub = toggle.on_change(move |event| log.borrow_mut().push(event.resolved()));
//!
//! // The OS switches to dark; the toggle follows on the next turn.
//! system.set(Mode::Dark);
//! toggle.flush();
//!
//! assert_eq!(toggle.mode(), Mode::Dark);
//! assert!(toggle.auto());
//! assert_eq!(seen.borrow().len(), 1);
//! ```
//!
//! # Resolution
//!
//! Four inputs decide the mode, first match wins:
//!
//! | Rule | Condition                            | Result                  |
//! |------|--------------------------------------|-------------------------|
//! | 1    | user selection is not auto           | user selection, explicit |
//! | 2    | attribute is not auto and not dirty  | attribute, explicit     |
//! | 3    | otherwise                            | system preference, auto |
//!
//! "Dirty" becomes true the first time the user clicks the control or code
//! calls [`ToggleElement::set_mode`], and never resets. After that the
//! attribute no longer matters. See [`resolve`].
//!
//! # Scheduling
//!
//! Input changes are applied synchronously but the visual update and event
//! dispatch are debounced on a [`Scheduler`]: a burst of changes produces one
//! reactor pass and at most one event. Hosts drain the scheduler at the end
//! of each turn with [`Scheduler::run_until_idle`] (or
//! [`ToggleElement::flush`]).
//!
//! # Variants
//!
//! | Variant                | Tag                  | Event             |
//! |------------------------|----------------------|-------------------|
//! | [`Variant::DarkMode`]  | `dark-mode-toggle`   | `darkmodechange`  |
//! | [`Variant::LightDark`] | `light-dark-toggle`  | `lightdarkchange` |

mod config;
mod element;
mod error;
mod event;
mod mode;
mod registry;
mod resolve;
mod scheme;
mod shadow;
mod states;
mod variant;

pub use config::ToggleConfig;
pub use element::{ToggleBuilder, ToggleElement, MODE_ATTRIBUTE};
pub use error::{ConfigError, ModeError, RegistryError};
pub use event::ModeChangeEvent;
pub use mode::{Mode, ModeSelection};
pub use registry::{validate_name, ElementRegistry};
pub use resolve::{resolve, resolve_with_cause, ResolutionCause, ResolvedMode};
pub use scheme::{
    detect_preference, reset_preference_detector, set_preference_detector, ColorSchemeQuery,
    StaticColorScheme, SystemColorScheme,
};
pub use shadow::{CheckboxUi, ShadowUi};
pub use states::{CustomStateSet, AUTO_STATE};
pub use variant::Variant;

// Re-export the reactive primitives hosts need to drive a toggle.
pub use lightdark_signal::{Scheduler, Subscription};
