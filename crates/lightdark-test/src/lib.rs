//! In-process test harness for `lightdark` toggles.
//!
//! [`TestToggle`] bundles a [`ToggleElement`] with the collaborators a test
//! wants to control: an in-memory color scheme, the checkbox the user clicks,
//! and a recorder capturing every change event.
//!
//! ```
//! use lightdark::{Mode, ResolvedMode};
//! use lightdark_test::TestToggle;
//!
//! let t = TestToggle::builder().preference(Mode::Light).attribute("mode", "dark").build();
//! t.assert_resolved(Mode::Dark, false);
//!
//! t.click();
//! t.flush();
//! t.assert_resolved(Mode::Light, false);
//! assert_eq!(t.event_payloads(), vec![ResolvedMode::new(Mode::Light, false)]);
//! ```

use std::cell::RefCell;
use std::ops::Deref;
use std::rc::Rc;

use lightdark::{
    CheckboxUi, Mode, ModeChangeEvent, ResolvedMode, Scheduler, ShadowUi, StaticColorScheme,
    Subscription, ToggleElement, Variant,
};

/// A toggle wired to controllable collaborators.
///
/// Derefs to the underlying [`ToggleElement`], so its whole API is available.
pub struct TestToggle {
    toggle: ToggleElement,
    system: Rc<StaticColorScheme>,
    checkbox: Rc<CheckboxUi>,
    events: Rc<RefCell<Vec<ModeChangeEvent>>>,
    _recorder: Subscription,
}

impl TestToggle {
    /// Starts a builder with default settings.
    pub fn builder() -> TestToggleBuilder {
        TestToggleBuilder::default()
    }

    /// A toggle of `variant` with a light system preference and no attributes.
    pub fn new(variant: Variant) -> Self {
        Self::builder().variant(variant).build()
    }

    /// The wrapped toggle.
    pub fn toggle(&self) -> &ToggleElement {
        &self.toggle
    }

    /// The checkbox the toggle drives.
    pub fn checkbox(&self) -> &CheckboxUi {
        &self.checkbox
    }

    /// The in-memory color scheme the toggle follows.
    pub fn color_scheme(&self) -> &StaticColorScheme {
        &self.system
    }

    /// Ends the turn.
    pub fn flush(&self) -> usize {
        self.toggle.flush()
    }

    /// Changes the system preference. The toggle sees it on the next flush.
    pub fn prefer(&self, mode: Mode) {
        self.system.set(mode);
    }

    /// Clicks the checkbox.
    pub fn click(&self) {
        self.checkbox.click();
    }

    /// Commits the checkbox to a specific state.
    pub fn input(&self, checked: bool) {
        self.checkbox.input(checked);
    }

    /// Events recorded so far.
    pub fn events(&self) -> Vec<ModeChangeEvent> {
        self.events.borrow().clone()
    }

    /// Returns and clears the recorded events.
    pub fn take_events(&self) -> Vec<ModeChangeEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// The most recent recorded event.
    pub fn last_event(&self) -> Option<ModeChangeEvent> {
        self.events.borrow().last().cloned()
    }

    /// The `{mode, auto}` payloads of the recorded events.
    pub fn event_payloads(&self) -> Vec<ResolvedMode> {
        self.events.borrow().iter().map(ModeChangeEvent::resolved).collect()
    }

    /// Asserts the resolved mode.
    #[track_caller]
    pub fn assert_resolved(&self, mode: Mode, auto: bool) {
        let expected = ResolvedMode::new(mode, auto);
        let actual = self.toggle.resolved();
        assert_eq!(actual, expected, "resolved mode of {:?}", self.toggle);
    }

    /// Asserts that the visual surface shows `mode`/`auto`: custom states and
    /// checkbox flags. Only meaningful after a flush.
    #[track_caller]
    pub fn assert_visual(&self, mode: Mode, auto: bool) {
        let states = self.toggle.states();
        assert_eq!(states.mode(), Some(mode), "mode state, states: {states:?}");
        assert_eq!(
            states.has(lightdark::AUTO_STATE),
            auto,
            "auto state, states: {states:?}"
        );
        assert_eq!(self.checkbox.checked(), mode.is_dark(), "checkbox checked");
        assert_eq!(self.checkbox.indeterminate(), auto, "checkbox indeterminate");
    }

    /// Flushes, then asserts both the resolved mode and the visual surface.
    #[track_caller]
    pub fn assert_settled(&self, mode: Mode, auto: bool) {
        self.flush();
        self.assert_resolved(mode, auto);
        self.assert_visual(mode, auto);
    }
}

impl Deref for TestToggle {
    type Target = ToggleElement;

    fn deref(&self) -> &ToggleElement {
        &self.toggle
    }
}

/// Builder for [`TestToggle`].
#[derive(Default)]
pub struct TestToggleBuilder {
    variant: Variant,
    preference: Option<Mode>,
    scheduler: Option<Scheduler>,
    attributes: Vec<(String, String)>,
}

impl TestToggleBuilder {
    /// Sets the toggle variant. Defaults to dark-mode.
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Initial system preference. Defaults to light.
    pub fn preference(mut self, mode: Mode) -> Self {
        self.preference = Some(mode);
        self
    }

    /// Shares a scheduler with other toggles.
    pub fn scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Sets an attribute present before construction.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builds the toggle and starts recording its events.
    pub fn build(self) -> TestToggle {
        let system = Rc::new(StaticColorScheme::new(
            self.preference.unwrap_or(Mode::Light),
        ));
        let checkbox = Rc::new(CheckboxUi::new());

        let mut builder = ToggleElement::builder(self.variant)
            .color_scheme(system.clone())
            .shadow(checkbox.clone());
        if let Some(scheduler) = self.scheduler {
            builder = builder.scheduler(scheduler);
        }
        for (name, value) in self.attributes {
            builder = builder.attribute(name, value);
        }
        let toggle = builder.build();

        let events = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&events);
        let recorder = toggle.on_change(move |event| log.borrow_mut().push(event.clone()));

        TestToggle {
            toggle,
            system,
            checkbox,
            events,
            _recorder: recorder,
        }
    }
}
