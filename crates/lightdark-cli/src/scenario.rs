//! Scripted toggle scenarios.
//!
//! A scenario is a [`ToggleConfig`] plus the initial system preference and a
//! list of steps:
//!
//! ```yaml
//! variant: dark-mode
//! mode: dark
//! preference: light
//! steps:
//!   - action: click
//!   - action: flush
//!   - action: prefer
//!     mode: dark
//!   - action: set-mode
//!     value: auto
//! ```
//!
//! Steps run in one turn until a `flush` step ends it. The scenario ends with
//! an implicit flush.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::Context;
use lightdark::{
    CheckboxUi, Mode, ModeChangeEvent, ResolutionCause, ResolvedMode, StaticColorScheme,
    ToggleConfig, MODE_ATTRIBUTE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    #[serde(flatten)]
    pub toggle: ToggleConfig,
    /// Initial system preference. Defaults to light.
    #[serde(default)]
    pub preference: Option<Mode>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    SetAttribute {
        #[serde(default = "mode_attribute")]
        name: String,
        value: String,
    },
    RemoveAttribute {
        #[serde(default = "mode_attribute")]
        name: String,
    },
    SetMode {
        value: String,
    },
    Click,
    Prefer {
        mode: Mode,
    },
    Flush,
}

fn mode_attribute() -> String {
    MODE_ATTRIBUTE.to_string()
}

/// A step the toggle refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Zero-based index into `steps`.
    pub step: usize,
    pub message: String,
}

/// What happened while playing a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayReport {
    pub tag: String,
    pub events: Vec<ModeChangeEvent>,
    pub rejected: Vec<Rejection>,
    #[serde(rename = "final")]
    pub resolved: ResolvedMode,
    pub cause: ResolutionCause,
    pub dirty: bool,
    pub states: Vec<String>,
    pub passes: u64,
}

impl Scenario {
    /// Parses a scenario from YAML.
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("invalid scenario")
    }

    /// Reads and parses a scenario file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid scenario {}", path.display()))
    }

    /// Runs the steps against a fresh toggle with an in-memory color scheme.
    pub fn play(&self) -> anyhow::Result<PlayReport> {
        let system = Rc::new(StaticColorScheme::new(
            self.preference.unwrap_or(Mode::Light),
        ));
        let checkbox = Rc::new(CheckboxUi::new());
        let toggle = self
            .toggle
            .builder()?
            .color_scheme(system.clone())
            .shadow(checkbox.clone())
            .build();

        let events = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&events);
        let _recorder = toggle.on_change(move |event| log.borrow_mut().push(event.clone()));

        let mut rejected = Vec::new();
        for (index, step) in self.steps.iter().enumerate() {
            tracing::info!(index, ?step, "playing step");
            match step {
                Step::SetAttribute { name, value } => toggle.set_attribute(name, value.as_str()),
                Step::RemoveAttribute { name } => toggle.remove_attribute(name),
                Step::SetMode { value } => {
                    if let Err(err) = toggle.set_mode(value) {
                        tracing::warn!(index, %err, "step rejected");
                        rejected.push(Rejection {
                            step: index,
                            message: err.to_string(),
                        });
                    }
                }
                Step::Click => checkbox.click(),
                Step::Prefer { mode } => {
                    system.set(*mode);
                }
                Step::Flush => {
                    toggle.flush();
                }
            }
        }
        toggle.flush();

        let (resolved, cause) = toggle.resolution();
        let events = events.borrow().clone();
        Ok(PlayReport {
            tag: toggle.tag_name().to_string(),
            events,
            rejected,
            resolved,
            cause,
            dirty: toggle.is_dirty(),
            states: toggle.states().iter().map(String::from).collect(),
            passes: toggle.reactor_passes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lightdark::Variant;

    #[test]
    fn parses_steps() {
        let scenario = Scenario::from_yaml(
            "variant: light-dark\nmode: dark\npreference: dark\nsteps:\n  \
             - action: set-attribute\n    value: light\n  \
             - action: remove-attribute\n  \
             - action: click\n  \
             - action: prefer\n    mode: light\n  \
             - action: set-mode\n    value: auto\n  \
             - action: flush\n",
        )
        .unwrap();
        assert_eq!(scenario.toggle.variant, Variant::LightDark);
        assert_eq!(scenario.toggle.mode.as_deref(), Some("dark"));
        assert_eq!(scenario.preference, Some(Mode::Dark));
        assert_eq!(
            scenario.steps,
            vec![
                Step::SetAttribute {
                    name: "mode".into(),
                    value: "light".into()
                },
                Step::RemoveAttribute {
                    name: "mode".into()
                },
                Step::Click,
                Step::Prefer { mode: Mode::Light },
                Step::SetMode {
                    value: "auto".into()
                },
                Step::Flush,
            ]
        );
    }

    #[test]
    fn unknown_action_is_an_error() {
        assert!(Scenario::from_yaml("steps:\n  - action: shake\n").is_err());
    }

    #[test]
    fn empty_scenario_plays_without_events() {
        let report = Scenario::default().play().unwrap();
        assert!(report.events.is_empty());
        assert_eq!(report.resolved, ResolvedMode::new(Mode::Light, true));
        assert_eq!(report.cause, ResolutionCause::System);
        assert_eq!(report.tag, "dark-mode-toggle");
        assert_eq!(report.passes, 1);
    }

    #[test]
    fn rejected_set_mode_is_reported() {
        let scenario = Scenario {
            steps: vec![
                Step::SetMode {
                    value: "BLUE".into(),
                },
                Step::SetMode {
                    value: " Dark ".into(),
                },
            ],
            ..Default::default()
        };
        let report = scenario.play().unwrap();
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].step, 0);
        assert!(report.rejected[0].message.contains("BLUE"));
        assert_eq!(report.resolved, ResolvedMode::new(Mode::Dark, false));
        assert_eq!(report.events.len(), 1);
    }
}
