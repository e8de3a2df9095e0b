//! Declarative toggle configuration.
//!
//! A [`ToggleConfig`] describes a toggle the way markup would: which variant,
//! an optional tag name, and the initial `mode` attribute.
//!
//! ```yaml
//! variant: light-dark
//! tag: site-theme
//! mode: dark
//! ```
//!
//! Every field is optional. `mode` is applied as an attribute, so unknown
//! values fall back to auto instead of failing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::element::{ToggleBuilder, ToggleElement, MODE_ATTRIBUTE};
use crate::error::ConfigError;
use crate::registry::validate_name;
use crate::variant::Variant;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    pub variant: Variant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

impl ToggleConfig {
    /// Parses a config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse { path: None, source })
    }

    /// Reads and parses a YAML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loading toggle config");
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    /// A builder preset from this config.
    ///
    /// Fails only if `tag` is not a valid custom element name.
    pub fn builder(&self) -> Result<ToggleBuilder, ConfigError> {
        let mut builder = ToggleElement::builder(self.variant);
        if let Some(tag) = &self.tag {
            validate_name(tag)?;
            builder = builder.tag(tag.clone());
        }
        if let Some(mode) = &self.mode {
            builder = builder.attribute(MODE_ATTRIBUTE, mode.clone());
        }
        Ok(builder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistryError;
    use crate::mode::{Mode, ModeSelection};
    use crate::scheme::StaticColorScheme;
    use std::io::Write;
    use std::rc::Rc;

    #[test]
    fn empty_document_uses_defaults() {
        let config = ToggleConfig::from_yaml("{}").unwrap();
        assert_eq!(config, ToggleConfig::default());
        assert_eq!(config.variant, Variant::DarkMode);
    }

    #[test]
    fn parses_all_fields() {
        let config = ToggleConfig::from_yaml("variant: light-dark\ntag: site-theme\nmode: Dark\n").unwrap();
        assert_eq!(config.variant, Variant::LightDark);
        assert_eq!(config.tag.as_deref(), Some("site-theme"));

        let toggle = config
            .builder()
            .unwrap()
            .color_scheme(Rc::new(StaticColorScheme::new(Mode::Light)))
            .build();
        assert_eq!(toggle.tag_name(), "site-theme");
        assert_eq!(toggle.attribute_selection(), ModeSelection::Dark);
        assert_eq!(toggle.get_attribute("mode").as_deref(), Some("Dark"));
    }

    #[test]
    fn unknown_variant_is_a_parse_error() {
        let err = ToggleConfig::from_yaml("variant: sepia").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: None, .. }));
    }

    #[test]
    fn invalid_tag_is_rejected() {
        let config = ToggleConfig {
            tag: Some("Toggle".into()),
            ..Default::default()
        };
        let err = config.builder().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Registry(RegistryError::InvalidName(name)) if name == "Toggle"
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "variant: dark-mode\nmode: auto").unwrap();
        let config = ToggleConfig::from_file(file.path()).unwrap();
        assert_eq!(config.mode.as_deref(), Some("auto"));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let err = ToggleConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("absent.yaml"));
    }
}
