//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use panelsync::error::BoxError;
use panelsync::panel::{OwnerId, PanelKey, WindowId};
use panelsync::registry::{PanelOwner, PanelRegistrar, PanelRegistry};
use panelsync::sim::SimHost;
use panelsync::RegistryConfig;

/// Registry backed by a simulated host, plus a host clone for inspection
pub fn test_registry() -> (SimHost, PanelRegistry<SimHost>) {
    test_registry_with(RegistryConfig::default())
}

pub fn test_registry_with(config: RegistryConfig) -> (SimHost, PanelRegistry<SimHost>) {
    let host = SimHost::new();
    let registry = PanelRegistry::new(host.clone(), config);
    (host, registry)
}

/// Owner registering a fixed list of panels, counting callback invocations
pub struct TestOwner {
    pub panels: Vec<(&'static str, bool)>,
    pub calls: Rc<Cell<usize>>,
    pub fail: bool,
}

impl TestOwner {
    pub fn new(panels: &[(&'static str, bool)]) -> Self {
        Self {
            panels: panels.to_vec(),
            calls: Rc::new(Cell::new(0)),
            fail: false,
        }
    }

    /// Owner with a single panel
    pub fn single(title: &'static str, initially_visible: bool) -> Self {
        Self::new(&[(title, initially_visible)])
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(&[])
        }
    }
}

impl PanelOwner for TestOwner {
    fn register_panels(&mut self, panels: &mut PanelRegistrar) -> Result<(), BoxError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err("owner is misconfigured".into());
        }
        for &(title, visible) in &self.panels {
            panels.add_panel(title, visible, move || Box::new(format!("{} content", title)));
        }
        Ok(())
    }
}

/// Activate `owner` in `window` and deliver the host's notifications
pub fn activate(
    host: &SimHost,
    registry: &mut PanelRegistry<SimHost>,
    id: OwnerId,
    owner: &mut TestOwner,
    window: u64,
) -> Vec<PanelKey> {
    let keys = registry
        .register_panels(id, owner, WindowId(window), None)
        .expect("registration should succeed");
    host.deliver(registry);
    keys
}

/// Assert the window index agrees with every live adapter
pub fn assert_tables_consistent(registry: &PanelRegistry<SimHost>, owners: &[OwnerId]) {
    for owner in owners {
        for key in registry.panel_keys(*owner) {
            if registry.is_disposed(key) {
                continue;
            }
            for window in registry.windows_of(key) {
                assert!(
                    registry.owners_in(window).contains(owner),
                    "owner {} missing from window {} index",
                    owner,
                    window
                );
            }
        }
    }
}
