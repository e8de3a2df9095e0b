//! Mode values and their string forms.
//!
//! Two enums cover every input the toggle accepts:
//!
//! - [`Mode`]: a concrete color mode, `light` or `dark`. This is what the
//!   toggle resolves to and what the system preference reports.
//! - [`ModeSelection`]: a choice that may defer to the system, `light`,
//!   `dark` or `auto`. This is what the host attribute and the user hold.
//!
//! ## Parsing
//!
//! The `FromStr` impls are strict after normalization: input is trimmed and
//! ASCII-lowercased, then must name a known value. They back the imperative
//! `mode` property, which rejects anything else.
//!
//! The host attribute is lenient instead. [`ModeSelection::from_attribute`]
//! applies the same normalization but maps absent, empty or unrecognized
//! content to [`ModeSelection::Auto`]:
//!
//! | attribute value        | selection |
//! |------------------------|-----------|
//! | absent                 | `auto`    |
//! | `""`                   | `auto`    |
//! | `"dark"`, `" DARK "`   | `dark`    |
//! | `"light"`, `"Light"`   | `light`   |
//! | `"auto"`               | `auto`    |
//! | `"blue"`, `"darker"`   | `auto`    |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModeError;

const MODE_CHOICES: &str = "\"dark\", \"light\"";
const SELECTION_CHOICES: &str = "\"dark\", \"light\", \"auto\"";

/// A concrete color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Light background, dark text.
    Light,
    /// Dark background, light text.
    Dark,
}

impl Mode {
    /// Every mode, in declaration order.
    pub const ALL: [Mode; 2] = [Mode::Light, Mode::Dark];

    /// The lowercase name, as used in attributes and custom states.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }

    /// Maps a "prefers dark" boolean to a mode.
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Mode::Dark
        } else {
            Mode::Light
        }
    }

    /// Whether this is [`Mode::Dark`].
    pub fn is_dark(self) -> bool {
        self == Mode::Dark
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Mode::Light => Mode::Dark,
            Mode::Dark => Mode::Light,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "light" => Ok(Mode::Light),
            "dark" => Ok(Mode::Dark),
            _ => Err(ModeError::invalid(s, MODE_CHOICES)),
        }
    }
}

/// A mode choice that may defer to the system preference.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ModeSelection {
    Light,
    Dark,
    /// Defer to the next source in line.
    #[default]
    Auto,
}

impl ModeSelection {
    /// Every selection, in declaration order.
    pub const ALL: [ModeSelection; 3] = [
        ModeSelection::Light,
        ModeSelection::Dark,
        ModeSelection::Auto,
    ];

    /// Lowercase name, as accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            ModeSelection::Light => "light",
            ModeSelection::Dark => "dark",
            ModeSelection::Auto => "auto",
        }
    }

    /// The explicit mode, or `None` for `auto`.
    pub fn explicit(self) -> Option<Mode> {
        match self {
            ModeSelection::Light => Some(Mode::Light),
            ModeSelection::Dark => Some(Mode::Dark),
            ModeSelection::Auto => None,
        }
    }

    /// Whether this is [`ModeSelection::Auto`].
    pub fn is_auto(self) -> bool {
        self == ModeSelection::Auto
    }

    /// Reads a host attribute value.
    ///
    /// Never fails: absent, empty or unrecognized values yield
    /// [`ModeSelection::Auto`]. See the module docs for the full table.
    pub fn from_attribute(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return ModeSelection::Auto;
        };
        match raw.parse() {
            Ok(selection) => selection,
            Err(_) => {
                tracing::debug!(value = raw, "unrecognized mode attribute, using auto");
                ModeSelection::Auto
            }
        }
    }
}

impl From<Mode> for ModeSelection {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Light => ModeSelection::Light,
            Mode::Dark => ModeSelection::Dark,
        }
    }
}

impl fmt::Display for ModeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeSelection {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "light" => Ok(ModeSelection::Light),
            "dark" => Ok(ModeSelection::Dark),
            "auto" => Ok(ModeSelection::Auto),
            _ => Err(ModeError::invalid(s, SELECTION_CHOICES)),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("DARK".parse::<Mode>().unwrap(), Mode::Dark);
        assert_eq!(" light\n".parse::<Mode>().unwrap(), Mode::Light);
    }

    #[test]
    fn mode_rejects_auto() {
        assert!("auto".parse::<Mode>().is_err());
    }

    #[test]
    fn selection_parses_trimmed_and_lowercased() {
        assert_eq!(" Dark ".parse::<ModeSelection>().unwrap(), ModeSelection::Dark);
        assert_eq!("AUTO".parse::<ModeSelection>().unwrap(), ModeSelection::Auto);
        assert_eq!("light".parse::<ModeSelection>().unwrap(), ModeSelection::Light);
    }

    #[test]
    fn selection_rejects_unknown_values() {
        let err = "BLUE".parse::<ModeSelection>().unwrap_err();
        assert_eq!(
            err,
            ModeError::InvalidMode {
                value: "BLUE".into(),
                expected: SELECTION_CHOICES,
            }
        );
        assert!("".parse::<ModeSelection>().is_err());
        assert!("dark mode".parse::<ModeSelection>().is_err());
    }

    #[test]
    fn attribute_fallback_policy() {
        let cases: &[(Option<&str>, ModeSelection)] = &[
            (None, ModeSelection::Auto),
            (Some(""), ModeSelection::Auto),
            (Some("   "), ModeSelection::Auto),
            (Some("dark"), ModeSelection::Dark),
            (Some(" DARK "), ModeSelection::Dark),
            (Some("Light"), ModeSelection::Light),
            (Some("auto"), ModeSelection::Auto),
            (Some("blue"), ModeSelection::Auto),
            (Some("darker"), ModeSelection::Auto),
        ];
        for (input, expected) in cases {
            assert_eq!(
                ModeSelection::from_attribute(*input),
                *expected,
                "attribute {input:?}"
            );
        }
    }

    #[test]
    fn display_round_trips_through_parse() {
        for selection in ModeSelection::ALL {
            assert_eq!(selection.to_string().parse::<ModeSelection>(), Ok(selection));
        }
    }

    #[test]
    fn explicit_and_from_mode() {
        assert_eq!(ModeSelection::Auto.explicit(), None);
        assert_eq!(ModeSelection::Dark.explicit(), Some(Mode::Dark));
        assert_eq!(ModeSelection::from(Mode::Light), ModeSelection::Light);
    }

    #[test]
    fn from_dark_and_toggled() {
        assert_eq!(Mode::from_dark(true), Mode::Dark);
        assert_eq!(Mode::from_dark(false), Mode::Light);
        assert_eq!(Mode::Light.toggled(), Mode::Dark);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&ModeSelection::Auto).unwrap();
        assert_eq!(json, "\"auto\"");
        let mode: Mode = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(mode, Mode::Dark);
    }
}
