//! The toggle component.
//!
//! A [`ToggleElement`] owns four signals and keeps everything else in sync
//! with them:
//!
//! ```text
//!  shadow UI change ──► user, dirty ─┐
//!  color scheme change ─► system ────┼──► reactor (debounced) ──► event, states, shadow UI
//!  attribute "mode" ───► attr ───────┤
//!  set_mode() ─────────► user, dirty ┘
//! ```
//!
//! Signal writes happen synchronously. The reactor runs once at construction
//! and then at most once per scheduler turn, after the host drains the
//! [`Scheduler`]. It dispatches a change event only when the resolved mode
//! differs from the last one it announced.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use lightdark_signal::{Debounced, Scheduler, Signal, Subscription};

use crate::error::ModeError;
use crate::event::{EventListeners, ModeChangeEvent};
use crate::mode::{Mode, ModeSelection};
use crate::resolve::{resolve_with_cause, ResolutionCause, ResolvedMode};
use crate::scheme::{ColorSchemeQuery, SystemColorScheme};
use crate::shadow::{CheckboxUi, ShadowUi};
use crate::states::CustomStateSet;
use crate::variant::Variant;

/// Name of the host attribute holding the mode selection.
pub const MODE_ATTRIBUTE: &str = "mode";

struct Signals {
    /// Set once the user has made a choice other than through the attribute.
    dirty: Signal<bool>,
    /// Mirrors the color-scheme query.
    system: Signal<Mode>,
    /// Parsed from the `mode` attribute.
    attr: Signal<ModeSelection>,
    /// The user's choice via the UI or `set_mode`.
    user: Signal<ModeSelection>,
}

impl Signals {
    fn resolve(&self) -> (ResolvedMode, ResolutionCause) {
        resolve_with_cause(
            self.user.get(),
            self.attr.get(),
            self.system.get(),
            self.dirty.get(),
        )
    }

    fn commit_user(&self, selection: ModeSelection) {
        self.user.set(selection);
        self.dirty.set(true);
    }
}

struct ElementCore {
    variant: Variant,
    tag: String,
    signals: Signals,
    attributes: RefCell<BTreeMap<String, String>>,
    last: Cell<ResolvedMode>,
    states: RefCell<CustomStateSet>,
    shadow: Rc<dyn ShadowUi>,
    color_scheme: Rc<dyn ColorSchemeQuery>,
    listeners: EventListeners,
    passes: Cell<u64>,
}

impl ElementCore {
    fn react(&self) {
        let (resolved, cause) = self.signals.resolve();
        self.passes.set(self.passes.get() + 1);

        let changed = resolved.mode != self.last.get().mode;
        tracing::debug!(
            tag = %self.tag,
            mode = %resolved.mode,
            auto = resolved.auto,
            cause = %cause,
            changed,
            "reactor pass"
        );
        if changed {
            self.last.set(resolved);
            self.listeners
                .dispatch(&ModeChangeEvent::new(self.variant.event_type(), resolved));
        }

        // Listeners may have changed signals and drained the scheduler.
        let current = self.signals.resolve().0;
        self.states.borrow_mut().sync(current);
        self.shadow.set_checked(current.mode.is_dark());
        self.shadow.set_indeterminate(current.auto);
    }
}

/// A tri-state light/dark/auto toggle.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use lightdark::{Mode, StaticColorScheme, ToggleElement, Variant};
///
/// let scheme = Rc::new(StaticColorScheme::new(Mode::Light));
/// let toggle = ToggleElement::builder(Variant::DarkMode)
///     .color_scheme(scheme.clone())
///     .attribute("mode", "dark")
///     .build();
///
/// assert_eq!(toggle.mode(), Mode::Dark);
/// assert!(!toggle.auto());
///
/// toggle.set_mode("auto").unwrap();
/// toggle.flush();
/// assert_eq!(toggle.mode(), Mode::Light);
/// assert!(toggle.auto());
/// ```
pub struct ToggleElement {
    core: Rc<ElementCore>,
    scheduler: Scheduler,
    reactor: Debounced,
    _reactive: Vec<Subscription>,
    connections: RefCell<Vec<Subscription>>,
}

impl ToggleElement {
    /// Starts building a toggle of the given variant.
    pub fn builder(variant: Variant) -> ToggleBuilder {
        ToggleBuilder::new(variant)
    }

    /// A toggle with default collaborators: OS color scheme, in-memory
    /// checkbox and a fresh scheduler.
    pub fn new(variant: Variant) -> Self {
        Self::builder(variant).build()
    }

    /// The toggle flavour.
    pub fn variant(&self) -> Variant {
        self.core.variant
    }

    /// The tag this toggle was created under.
    pub fn tag_name(&self) -> &str {
        &self.core.tag
    }

    /// The scheduler reactor passes are queued on.
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Drains the scheduler, letting any pending reactor pass run.
    pub fn flush(&self) -> usize {
        self.scheduler.run_until_idle()
    }

    // --- properties ---------------------------------------------------------

    /// The resolved mode.
    pub fn mode(&self) -> Mode {
        self.resolved().mode
    }

    /// Sets the user's selection from a string.
    ///
    /// Accepts `light`, `dark` and `auto`, ignoring surrounding whitespace and
    /// ASCII case. Marks the toggle dirty. On error nothing changes.
    pub fn set_mode(&self, value: &str) -> Result<(), ModeError> {
        let selection: ModeSelection = value.parse()?;
        self.set_mode_selection(selection);
        Ok(())
    }

    /// Typed form of [`set_mode`](Self::set_mode).
    pub fn set_mode_selection(&self, selection: ModeSelection) {
        tracing::trace!(tag = %self.core.tag, %selection, "mode property set");
        self.core.signals.commit_user(selection);
    }

    /// Whether the resolved mode follows the system preference.
    pub fn auto(&self) -> bool {
        self.resolved().auto
    }

    /// The resolved `{mode, auto}` pair, computed from current signal values.
    pub fn resolved(&self) -> ResolvedMode {
        self.core.signals.resolve().0
    }

    /// Like [`resolved`](Self::resolved), also reporting which input decided.
    pub fn resolution(&self) -> (ResolvedMode, ResolutionCause) {
        self.core.signals.resolve()
    }

    /// The last `{mode, auto}` announced, or the initial resolution if no
    /// event has fired yet.
    pub fn last_announced(&self) -> ResolvedMode {
        self.core.last.get()
    }

    /// The current user selection signal value.
    pub fn user_selection(&self) -> ModeSelection {
        self.core.signals.user.get()
    }

    /// The selection parsed from the `mode` attribute.
    pub fn attribute_selection(&self) -> ModeSelection {
        self.core.signals.attr.get()
    }

    /// The system preference as last read from the color scheme.
    pub fn system_preference(&self) -> Mode {
        self.core.signals.system.get()
    }

    /// Whether the user has made a choice through the UI or `set_mode`.
    pub fn is_dirty(&self) -> bool {
        self.core.signals.dirty.get()
    }

    // --- attributes ---------------------------------------------------------

    /// Sets a host attribute. Names are ASCII case-insensitive.
    pub fn set_attribute(&self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        self.core
            .attributes
            .borrow_mut()
            .insert(name.clone(), value.clone());
        if name == MODE_ATTRIBUTE {
            self.mode_attribute_changed(Some(&value));
        }
    }

    /// Returns an attribute's raw value.
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.core
            .attributes
            .borrow()
            .get(&name.to_ascii_lowercase())
            .cloned()
    }

    /// Whether an attribute is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.core
            .attributes
            .borrow()
            .contains_key(&name.to_ascii_lowercase())
    }

    /// Removes an attribute. Removing `mode` resets the attribute selection to auto.
    pub fn remove_attribute(&self, name: &str) {
        let name = name.to_ascii_lowercase();
        let removed = self.core.attributes.borrow_mut().remove(&name);
        if removed.is_some() && name == MODE_ATTRIBUTE {
            self.mode_attribute_changed(None);
        }
    }

    fn mode_attribute_changed(&self, value: Option<&str>) {
        tracing::trace!(tag = %self.core.tag, value, "mode attribute changed");
        self.core
            .signals
            .attr
            .set(ModeSelection::from_attribute(value));
    }

    // --- visual state -------------------------------------------------------

    /// A snapshot of the custom states.
    pub fn states(&self) -> CustomStateSet {
        self.core.states.borrow().clone()
    }

    /// Whether a custom state is set.
    pub fn has_state(&self, state: &str) -> bool {
        self.core.states.borrow().has(state)
    }

    /// The control the toggle drives.
    pub fn shadow_ui(&self) -> &dyn ShadowUi {
        self.core.shadow.as_ref()
    }

    // --- events -------------------------------------------------------------

    /// Registers a listener for events of `event_type`.
    #[must_use = "dropping the subscription removes the listener immediately"]
    pub fn add_event_listener(
        &self,
        event_type: &str,
        listener: impl Fn(&ModeChangeEvent) + 'static,
    ) -> Subscription {
        self.core.listeners.add(event_type, listener)
    }

    /// Registers a listener for this toggle's change event.
    #[must_use = "dropping the subscription removes the listener immediately"]
    pub fn on_change(&self, listener: impl Fn(&ModeChangeEvent) + 'static) -> Subscription {
        self.add_event_listener(self.core.variant.event_type(), listener)
    }

    /// Number of listeners registered for `event_type`.
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.core.listeners.count(event_type)
    }

    // --- lifecycle ----------------------------------------------------------

    /// Subscribes to the color scheme and the shadow UI. Called by the
    /// builder; calling it again while connected does nothing.
    ///
    /// Re-reads the color scheme, since it may have changed while the toggle
    /// was disconnected.
    pub fn connect(&self) {
        if self.is_connected() {
            return;
        }

        let weak = Rc::downgrade(&self.core);
        let scheme_sub = self.core.color_scheme.on_change(Box::new(move || {
            if let Some(core) = weak.upgrade() {
                core.signals.system.set(core.color_scheme.preference());
            }
        }));

        let weak: Weak<ElementCore> = Rc::downgrade(&self.core);
        let shadow_sub = self.core.shadow.on_change(Box::new(move |checked: bool| {
            if let Some(core) = weak.upgrade() {
                core.signals.commit_user(Mode::from_dark(checked).into());
            }
        }));

        self.connections
            .borrow_mut()
            .extend([scheme_sub, shadow_sub]);
        self.core
            .signals
            .system
            .set(self.core.color_scheme.preference());
        tracing::debug!(tag = %self.core.tag, "connected");
    }

    /// Releases the color-scheme and shadow UI subscriptions.
    ///
    /// The toggle stays usable through its attribute and property surface.
    pub fn disconnect(&self) {
        let released = std::mem::take(&mut *self.connections.borrow_mut());
        if !released.is_empty() {
            tracing::debug!(tag = %self.core.tag, "disconnected");
        }
    }

    /// Whether the toggle is subscribed to its collaborators.
    pub fn is_connected(&self) -> bool {
        !self.connections.borrow().is_empty()
    }

    /// Number of reactor passes so far, including the initial one.
    pub fn reactor_passes(&self) -> u64 {
        self.core.passes.get()
    }

    /// Whether a reactor pass is queued.
    pub fn is_update_pending(&self) -> bool {
        self.reactor.is_pending()
    }
}

impl fmt::Debug for ToggleElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleElement")
            .field("tag", &self.core.tag)
            .field("user", &self.core.signals.user.get())
            .field("attr", &self.core.signals.attr.get())
            .field("system", &self.core.signals.system.get())
            .field("dirty", &self.core.signals.dirty.get())
            .field("resolved", &self.resolved())
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// Builder for [`ToggleElement`].
pub struct ToggleBuilder {
    variant: Variant,
    tag: Option<String>,
    scheduler: Option<Scheduler>,
    color_scheme: Option<Rc<dyn ColorSchemeQuery>>,
    shadow: Option<Rc<dyn ShadowUi>>,
    attributes: Vec<(String, String)>,
}

impl ToggleBuilder {
    /// Starts a builder for `variant` with every collaborator defaulted.
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            tag: None,
            scheduler: None,
            color_scheme: None,
            shadow: None,
            attributes: Vec::new(),
        }
    }

    /// Overrides the tag name. Defaults to the variant's.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Shares an existing scheduler, so several toggles settle in one turn.
    pub fn scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Injects the color-scheme query. Defaults to [`SystemColorScheme`].
    pub fn color_scheme(mut self, query: Rc<dyn ColorSchemeQuery>) -> Self {
        self.color_scheme = Some(query);
        self
    }

    /// Injects the shadow UI. Defaults to a fresh [`CheckboxUi`].
    pub fn shadow(mut self, shadow: Rc<dyn ShadowUi>) -> Self {
        self.shadow = Some(shadow);
        self
    }

    /// Sets an attribute present before construction.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Creates the toggle, connects it and runs the initial reactor pass.
    pub fn build(self) -> ToggleElement {
        let attributes: BTreeMap<String, String> = self
            .attributes
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        let color_scheme = self
            .color_scheme
            .unwrap_or_else(|| Rc::new(SystemColorScheme::new()));
        let shadow = self.shadow.unwrap_or_else(|| Rc::new(CheckboxUi::new()));
        let scheduler = self.scheduler.unwrap_or_default();
        let tag = self
            .tag
            .unwrap_or_else(|| self.variant.tag_name().to_string());

        let signals = Signals {
            dirty: Signal::named("dirty", false),
            system: Signal::named("system", color_scheme.preference()),
            attr: Signal::named(
                "attr",
                ModeSelection::from_attribute(attributes.get(MODE_ATTRIBUTE).map(String::as_str)),
            ),
            user: Signal::named("user", ModeSelection::Auto),
        };
        let (initial, _) = signals.resolve();

        let core = Rc::new(ElementCore {
            variant: self.variant,
            tag,
            signals,
            attributes: RefCell::new(attributes),
            last: Cell::new(initial),
            states: RefCell::new(CustomStateSet::new()),
            shadow,
            color_scheme,
            listeners: EventListeners::default(),
            passes: Cell::new(0),
        });

        let weak = Rc::downgrade(&core);
        let reactor = scheduler.debounce(move || {
            if let Some(core) = weak.upgrade() {
                core.react();
            }
        });

        let s = &core.signals;
        let reactive = vec![
            s.dirty.subscribe(trigger::<bool>(&reactor)),
            s.system.subscribe(trigger::<Mode>(&reactor)),
            s.attr.subscribe(trigger::<ModeSelection>(&reactor)),
            s.user.subscribe(trigger::<ModeSelection>(&reactor)),
        ];

        let element = ToggleElement {
            core,
            scheduler,
            reactor,
            _reactive: reactive,
            connections: RefCell::new(Vec::new()),
        };
        element.connect();
        element.core.react();
        element
    }
}

fn trigger<T: 'static>(reactor: &Debounced) -> impl Fn(&T) + 'static {
    let reactor = reactor.clone();
    move |_| {
        reactor.trigger();
    }
}

impl fmt::Debug for ToggleBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToggleBuilder")
            .field("variant", &self.variant)
            .field("tag", &self.tag)
            .field("attributes", &self.attributes)
            .finish()
    }
}
