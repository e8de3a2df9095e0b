//! Custom element registry.
//!
//! Maps tag names to toggle variants so hosts can create toggles by name,
//! the way `customElements.define` does in a browser.

use std::collections::BTreeMap;

use crate::element::{ToggleBuilder, ToggleElement};
use crate::error::RegistryError;
use crate::variant::Variant;

/// Names the platform reserves; they contain a hyphen but cannot be defined.
const RESERVED_NAMES: [&str; 8] = [
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// Checks `name` against the custom element naming rules.
///
/// A valid name starts with a lowercase ASCII letter, contains a hyphen, has
/// no uppercase ASCII letters and is not one of the reserved names.
pub fn validate_name(name: &str) -> Result<(), RegistryError> {
    let invalid = || RegistryError::InvalidName(name.to_string());

    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return Err(invalid()),
    }
    if !name.contains('-') || RESERVED_NAMES.contains(&name) {
        return Err(invalid());
    }
    let allowed = |c: char| {
        c.is_ascii_lowercase()
            || c.is_ascii_digit()
            || matches!(c, '-' | '.' | '_')
            || (!c.is_ascii() && !c.is_whitespace())
    };
    if !chars.all(allowed) {
        return Err(invalid());
    }
    Ok(())
}

/// Tag name → variant definitions.
#[derive(Debug, Clone, Default)]
pub struct ElementRegistry {
    definitions: BTreeMap<String, Variant>,
}

impl ElementRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with both variants defined under their default names.
    pub fn with_defaults() -> Self {
        let definitions = Variant::ALL
            .into_iter()
            .map(|v| (v.tag_name().to_string(), v))
            .collect();
        Self { definitions }
    }

    /// Defines `name` as a toggle of `variant`.
    pub fn define(&mut self, name: &str, variant: Variant) -> Result<(), RegistryError> {
        validate_name(name)?;
        if self.definitions.contains_key(name) {
            return Err(RegistryError::AlreadyDefined(name.to_string()));
        }
        tracing::debug!(name, %variant, "element defined");
        self.definitions.insert(name.to_string(), variant);
        Ok(())
    }

    /// The variant defined under `name`.
    pub fn get(&self, name: &str) -> Option<Variant> {
        self.definitions.get(name).copied()
    }

    /// Whether `name` has been defined.
    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Defined names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    /// A builder for the element defined as `name`, with its tag preset.
    pub fn builder(&self, name: &str) -> Result<ToggleBuilder, RegistryError> {
        let variant = self
            .get(name)
            .ok_or_else(|| RegistryError::NotDefined(name.to_string()))?;
        Ok(ToggleElement::builder(variant).tag(name))
    }

    /// Creates the element defined as `name` with default collaborators.
    pub fn create(&self, name: &str) -> Result<ToggleElement, RegistryError> {
        Ok(self.builder(name)?.build())
    }
}
