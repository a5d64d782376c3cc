//! Scripted host sessions
//!
//! A scenario is a YAML file describing presentation objects and a sequence
//! of host events. It is replayed against [`SimHost`] to show how panels are
//! created, synchronized, hidden and restored across windows.
//!
//! ```yaml
//! owners:
//!   - name: report
//!     panels:
//!       - title: Research
//!         visible: true
//! steps:
//!   - activate: { window: 1, owner: report }
//!   - user-set: { owner: report, window: 1, dock: left }
//!   - close: 1
//!   - shutdown
//! ```

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RegistryConfig;
use crate::error::{BoxError, RegistryError};
use crate::messages::{HostMsg, PanelEvent};
use crate::panel::{DockPosition, OwnerId, PanelKey, WindowId};
use crate::registry::{PanelOwner, PanelRegistrar, PanelRegistry, PanelSummary};
use crate::sim::SimHost;
use crate::update::update;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("owner '{0}' is declared twice")]
    DuplicateOwner(String),

    #[error("unknown owner '{0}'")]
    UnknownOwner(String),

    #[error("owner '{owner}' has no panel {panel} in window {window}")]
    NoPanel {
        owner: String,
        panel: usize,
        window: u64,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub owners: Vec<OwnerSpec>,
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OwnerSpec {
    pub name: String,
    #[serde(default)]
    pub panels: Vec<PanelSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PanelSpec {
    pub title: String,
    #[serde(default)]
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    /// Focus `window` showing `owner`'s document
    Activate { window: u64, owner: String },
    /// Close a window normally (cleanup, then destroy)
    Close(u64),
    /// Destroy a window without telling the registry
    DestroyWindow(u64),
    /// Tear down an owner permanently
    Retire(String),
    /// The user changes one native panel directly
    UserSet {
        owner: String,
        #[serde(default)]
        panel: usize,
        window: u64,
        visible: Option<bool>,
        dock: Option<DockPosition>,
        width: Option<u32>,
        height: Option<u32>,
    },
    /// Add-in shutdown
    Shutdown,
}

impl Scenario {
    pub fn from_yaml(content: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }
}

/// Registers the panels listed in an [`OwnerSpec`]
struct ScenarioOwner {
    spec: OwnerSpec,
}

impl PanelOwner for ScenarioOwner {
    fn register_panels(&mut self, panels: &mut PanelRegistrar) -> Result<(), BoxError> {
        for panel in &self.spec.panels {
            let body = format!("{} ({})", panel.title, self.spec.name);
            panels.add_panel(panel.title.clone(), panel.visible, move || Box::new(body.clone()));
        }
        Ok(())
    }
}

/// Outcome of a replayed scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub panels: Vec<PanelSummary>,
    pub events: Vec<PanelEvent>,
    pub live_native_panels: usize,
}

impl ScenarioReport {
    /// Plain-text table of the final panel states
    pub fn render_table(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<8} {:<20} {:<10} {:<8} {:<9} {:>6} {:>6}  {}",
            "PANEL", "TITLE", "WINDOWS", "VISIBLE", "DOCK", "WIDTH", "HEIGHT", "STATE"
        );
        for panel in &self.panels {
            let windows = panel
                .windows
                .iter()
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
                .join(",");
            let state = if panel.disposed {
                "disposed"
            } else if panel.auto_hidden {
                "auto-hidden"
            } else {
                "shown"
            };
            let _ = writeln!(
                out,
                "{:<8} {:<20} {:<10} {:<8} {:<9} {:>6} {:>6}  {}",
                panel.key.to_string(),
                panel.title,
                windows,
                panel.visible,
                format!("{:?}", panel.dock).to_lowercase(),
                panel.width,
                panel.height,
                state
            );
        }
        let _ = writeln!(
            out,
            "{} event(s), {} native panel(s) alive",
            self.events.len(),
            self.live_native_panels
        );
        out
    }
}

/// Replay `scenario` against a fresh simulated host
pub fn run(scenario: &Scenario, config: RegistryConfig) -> Result<ScenarioReport, ScenarioError> {
    let host = SimHost::new();
    let mut registry = PanelRegistry::new(host.clone(), config);

    let mut names: HashMap<String, OwnerId> = HashMap::new();
    let mut owners: HashMap<OwnerId, Box<dyn PanelOwner>> = HashMap::new();
    for spec in &scenario.owners {
        if names.contains_key(&spec.name) {
            return Err(ScenarioError::DuplicateOwner(spec.name.clone()));
        }
        let id = registry.new_owner();
        names.insert(spec.name.clone(), id);
        owners.insert(id, Box::new(ScenarioOwner { spec: spec.clone() }));
    }
    let owner_id = |name: &str| {
        names
            .get(name)
            .copied()
            .ok_or_else(|| ScenarioError::UnknownOwner(name.to_string()))
    };

    let mut events = Vec::new();
    for (index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!("Scenario step {}: {:?}", index + 1, step);
        match step {
            Step::Activate { window, owner } => {
                let owner = owner_id(owner)?;
                let msg = HostMsg::WindowActivated {
                    window: WindowId(*window),
                    owner,
                };
                update(&mut registry, &mut owners, msg)?;
            }
            Step::Close(window) => {
                update(&mut registry, &mut owners, HostMsg::WindowClosing(WindowId(*window)))?;
                host.destroy_window(WindowId(*window));
            }
            Step::DestroyWindow(window) => host.destroy_window(WindowId(*window)),
            Step::Retire(name) => {
                let owner = owner_id(name)?;
                owners.remove(&owner);
                update(&mut registry, &mut owners, HostMsg::OwnerRetired(owner))?;
            }
            Step::UserSet {
                owner,
                panel,
                window,
                visible,
                dock,
                width,
                height,
            } => {
                let key = PanelKey::new(owner_id(owner)?, *panel);
                let handle = registry.handle_in(key, WindowId(*window)).ok_or_else(|| {
                    ScenarioError::NoPanel {
                        owner: owner.clone(),
                        panel: *panel,
                        window: *window,
                    }
                })?;
                if let Some(visible) = visible {
                    host.user_set_visible(handle, *visible);
                }
                if let Some(dock) = dock {
                    host.user_set_dock(handle, *dock);
                }
                if let Some(width) = width {
                    host.user_set_width(handle, *width);
                }
                if let Some(height) = height {
                    host.user_set_height(handle, *height);
                }
            }
            Step::Shutdown => update(&mut registry, &mut owners, HostMsg::Shutdown)?,
        }
        host.deliver(&mut registry);
        events.extend(registry.take_events());
    }

    Ok(ScenarioReport {
        panels: registry.summaries(),
        events,
        live_native_panels: host.live_panel_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let scenario = Scenario::from_yaml(
            r#"
owners:
  - name: doc
    panels:
      - title: Notes
        visible: true
steps:
  - activate: { window: 1, owner: doc }
  - user-set: { owner: doc, window: 1, dock: bottom, height: 120 }
  - destroy-window: 1
  - close: 2
  - retire: doc
  - shutdown
"#,
        )
        .unwrap();

        assert_eq!(scenario.owners[0].panels[0].title, "Notes");
        assert_eq!(
            scenario.steps[1],
            Step::UserSet {
                owner: "doc".into(),
                panel: 0,
                window: 1,
                visible: None,
                dock: Some(DockPosition::Bottom),
                width: None,
                height: Some(120),
            }
        );
        assert_eq!(scenario.steps[2], Step::DestroyWindow(1));
        assert_eq!(scenario.steps[5], Step::Shutdown);
    }

    #[test]
    fn test_unknown_owner_is_reported() {
        let scenario =
            Scenario::from_yaml("steps:\n  - activate: { window: 1, owner: ghost }\n").unwrap();
        let err = run(&scenario, RegistryConfig::default()).unwrap_err();
        assert!(matches!(err, ScenarioError::UnknownOwner(name) if name == "ghost"));
    }

    #[test]
    fn test_duplicate_owner_is_reported() {
        let scenario = Scenario::from_yaml("owners:\n  - name: a\n  - name: a\n").unwrap();
        assert!(matches!(
            run(&scenario, RegistryConfig::default()),
            Err(ScenarioError::DuplicateOwner(_))
        ));
    }

    #[test]
    fn test_table_lists_every_panel() {
        let scenario = Scenario::from_yaml(
            r#"
owners:
  - name: a
    panels:
      - title: Alpha
        visible: true
steps:
  - activate: { window: 1, owner: a }
"#,
        )
        .unwrap();
        let report = run(&scenario, RegistryConfig::default()).unwrap();
        let table = report.render_table();

        assert!(table.contains("Alpha"));
        assert!(table.contains("shown"));
        assert!(table.contains("1 native panel(s) alive"));
    }
}
