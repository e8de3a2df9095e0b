//! Error types.

use std::path::PathBuf;

/// Error returned when a value is not a recognized mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModeError {
    /// The value is not `light`, `dark` or (where allowed) `auto`.
    #[error("\"{value}\" is an invalid value (valid: {expected})")]
    InvalidMode {
        /// The rejected input, verbatim.
        value: String,
        /// Human-readable list of accepted values.
        expected: &'static str,
    },
}

impl ModeError {
    pub(crate) fn invalid(value: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidMode {
            value: value.into(),
            expected,
        }
    }
}

/// Errors from the element registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The name is not a valid custom element name.
    #[error("\"{0}\" is not a valid custom element name")]
    InvalidName(String),

    /// An element with this name is already defined.
    #[error("the name \"{0}\" has already been used with this registry")]
    AlreadyDefined(String),

    /// No element is defined under this name.
    #[error("no element is defined as \"{0}\"")]
    NotDefined(String),
}

/// Errors loading a [`ToggleConfig`](crate::ToggleConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The YAML could not be parsed.
    #[error("failed to parse toggle config{}: {source}", display_path(.path))]
    Parse {
        /// Source file, when loaded from disk.
        path: Option<PathBuf>,
        #[source]
        source: serde_yaml::Error,
    },

    /// The config file could not be read.
    #[error("failed to read toggle config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured tag name is not a valid custom element name.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_mode_message_names_value_and_choices() {
        let err = ModeError::invalid("BLUE", "\"light\", \"dark\", \"auto\"");
        let msg = err.to_string();
        assert!(msg.contains("BLUE"));
        assert!(msg.contains("\"auto\""));
    }

    #[test]
    fn registry_error_display() {
        let err = RegistryError::AlreadyDefined("dark-mode-toggle".into());
        assert!(err.to_string().contains("dark-mode-toggle"));
    }

    #[test]
    fn config_parse_error_mentions_path() {
        let source = serde_yaml::from_str::<u32>("[").unwrap_err();
        let err = ConfigError::Parse {
            path: Some(PathBuf::from("toggle.yaml")),
            source,
        };
        assert!(err.to_string().contains("toggle.yaml"));
    }
}
