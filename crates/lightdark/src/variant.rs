//! The two toggle flavours.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which toggle flavour an element is.
///
/// Both behave identically. They differ only in their default tag name and
/// the type of the change event they dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// `<dark-mode-toggle>`, dispatching `darkmodechange`.
    #[default]
    DarkMode,
    /// `<light-dark-toggle>`, dispatching `lightdarkchange`.
    LightDark,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::DarkMode, Variant::LightDark];

    /// Default custom element name.
    pub fn tag_name(self) -> &'static str {
        match self {
            Variant::DarkMode => "dark-mode-toggle",
            Variant::LightDark => "light-dark-toggle",
        }
    }

    /// Type of the change event.
    pub fn event_type(self) -> &'static str {
        match self {
            Variant::DarkMode => "darkmodechange",
            Variant::LightDark => "lightdarkchange",
        }
    }

    /// Name used in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::DarkMode => "dark-mode",
            Variant::LightDark => "light-dark",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
