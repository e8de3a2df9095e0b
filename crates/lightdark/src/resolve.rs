//! Mode resolution.
//!
//! [`resolve`] combines the toggle's four inputs into the mode it displays.
//! Precedence is fixed, first match wins:
//!
//! 1. the user's selection, unless it is `auto`
//! 2. the host attribute, unless it is `auto` or the user has interacted
//! 3. the system preference
//!
//! Only the third rule produces `auto == true`.

use std::fmt;

use serde::Serialize;

use crate::mode::{Mode, ModeSelection};

/// The mode a toggle displays, and whether it came from the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ResolvedMode {
    pub mode: Mode,
    /// `true` when `mode` follows the system preference.
    pub auto: bool,
}

impl ResolvedMode {
    /// Pairs a mode with its auto flag.
    pub fn new(mode: Mode, auto: bool) -> Self {
        Self { mode, auto }
    }
}

impl fmt::Display for ResolvedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.auto {
            write!(f, "{} (auto)", self.mode)
        } else {
            write!(f, "{}", self.mode)
        }
    }
}

/// Which precedence rule decided a [`ResolvedMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionCause {
    /// An explicit user selection.
    User,
    /// The host attribute.
    Attribute,
    /// The system preference.
    System,
}

impl ResolutionCause {
    /// Lowercase name of the rule.
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionCause::User => "user",
            ResolutionCause::Attribute => "attribute",
            ResolutionCause::System => "system",
        }
    }
}

impl fmt::Display for ResolutionCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolves the displayed mode. Total over its inputs.
pub fn resolve(user: ModeSelection, attr: ModeSelection, system: Mode, dirty: bool) -> ResolvedMode {
    resolve_with_cause(user, attr, system, dirty).0
}

/// Like [`resolve`], also reporting which rule applied.
pub fn resolve_with_cause(
    user: ModeSelection,
    attr: ModeSelection,
    system: Mode,
    dirty: bool,
) -> (ResolvedMode, ResolutionCause) {
    if let Some(mode) = user.explicit() {
        return (ResolvedMode::new(mode, false), ResolutionCause::User);
    }
    match attr.explicit() {
        Some(mode) if !dirty => (ResolvedMode::new(mode, false), ResolutionCause::Attribute),
        _ => (ResolvedMode::new(system, true), ResolutionCause::System),
    }
}
