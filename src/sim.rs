//! In-memory host for tests and scenario replay
//!
//! [`SimHost`] implements [`PanelFactory`] the way a real host behaves:
//! setters queue a change notification whenever the value actually changes
//! (including writes made by the adapter itself), windows and panels can be
//! destroyed at any time, and a window can refuse visibility changes while it
//! is being torn down.
//!
//! Clones share the same world, so a test keeps one clone for inspection
//! while the registry owns another.

use std::any::Any;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::rc::Rc;

use crate::error::PanelError;
use crate::messages::PanelProperty;
use crate::panel::{
    DockPosition, DockRestriction, HandleId, NativePanel, PanelContent, PanelFactory, PanelState,
    WindowId,
};
use crate::registry::PanelRegistry;

/// Host-side state of one simulated panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimPanelState {
    pub window: WindowId,
    pub title: String,
    pub visible: bool,
    pub dock: DockPosition,
    pub restriction: DockRestriction,
    pub width: u32,
    pub height: u32,
    /// Destroyed by the host (window closed underneath the add-in)
    pub destroyed: bool,
    /// Released through `NativePanel::dispose`
    pub disposed: bool,
    pub refreshes: usize,
}

impl SimPanelState {
    pub fn panel_state(&self) -> PanelState {
        PanelState {
            visible: self.visible,
            dock: self.dock,
            width: self.width,
            height: self.height,
        }
    }

    fn is_gone(&self) -> bool {
        self.destroyed || self.disposed
    }
}

#[derive(Debug, Default)]
struct SimWorld {
    panels: BTreeMap<HandleId, SimPanelState>,
    closed_windows: HashSet<WindowId>,
    busy_windows: HashSet<WindowId>,
    pending: VecDeque<(HandleId, PanelProperty)>,
}

impl SimWorld {
    fn queue_if(&mut self, changed: bool, id: HandleId, property: PanelProperty) {
        if changed {
            self.pending.push_back((id, property));
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimHost {
    world: Rc<RefCell<SimWorld>>,
}

impl SimHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self, id: HandleId) -> Option<SimPanelState> {
        self.world.borrow().panels.get(&id).cloned()
    }

    /// Panels currently alive in `window`
    pub fn panels_in(&self, window: WindowId) -> Vec<(HandleId, SimPanelState)> {
        self.world
            .borrow()
            .panels
            .iter()
            .filter(|(_, p)| p.window == window && !p.is_gone())
            .map(|(id, p)| (*id, p.clone()))
            .collect()
    }

    pub fn live_panel_count(&self) -> usize {
        self.world
            .borrow()
            .panels
            .values()
            .filter(|p| !p.is_gone())
            .count()
    }

    pub fn pending_notifications(&self) -> usize {
        self.world.borrow().pending.len()
    }

    pub fn next_notification(&self) -> Option<(HandleId, PanelProperty)> {
        self.world.borrow_mut().pending.pop_front()
    }

    /// Deliver queued notifications until the queue is empty
    ///
    /// Returns the number delivered.
    pub fn deliver<F: PanelFactory>(&self, registry: &mut PanelRegistry<F>) -> usize {
        let mut delivered = 0;
        loop {
            let next = self.next_notification();
            let Some((handle, property)) = next else {
                break;
            };
            registry.panel_changed(handle, property);
            delivered += 1;
        }
        delivered
    }

    fn user_update(
        &self,
        id: HandleId,
        property: PanelProperty,
        update: impl FnOnce(&mut SimPanelState) -> bool,
    ) {
        let mut world = self.world.borrow_mut();
        let changed = match world.panels.get_mut(&id) {
            Some(panel) if !panel.is_gone() => update(panel),
            _ => false,
        };
        world.queue_if(changed, id, property);
    }

    /// The user shows or hides a panel in its window
    pub fn user_set_visible(&self, id: HandleId, visible: bool) {
        self.user_update(id, PanelProperty::Visible, |p| {
            std::mem::replace(&mut p.visible, visible) != visible
        });
    }

    /// The user drags a panel to another dock
    ///
    /// Ignored when the panel's dock restriction forbids the move.
    pub fn user_set_dock(&self, id: HandleId, dock: DockPosition) {
        self.user_update(id, PanelProperty::Dock, |p| {
            if !p.restriction.allows(p.dock, dock) {
                return false;
            }
            std::mem::replace(&mut p.dock, dock) != dock
        });
    }

    /// The user drags the panel's splitter
    pub fn user_set_width(&self, id: HandleId, width: u32) {
        self.user_update(id, PanelProperty::Width, |p| {
            std::mem::replace(&mut p.width, width) != width
        });
    }

    pub fn user_set_height(&self, id: HandleId, height: u32) {
        self.user_update(id, PanelProperty::Height, |p| {
            std::mem::replace(&mut p.height, height) != height
        });
    }

    /// The host destroys a window and every panel in it
    pub fn destroy_window(&self, window: WindowId) {
        let mut world = self.world.borrow_mut();
        world.closed_windows.insert(window);
        for panel in world.panels.values_mut().filter(|p| p.window == window) {
            panel.destroyed = true;
        }
    }

    /// The window stops resolving while its panels still answer
    pub fn lose_window(&self, window: WindowId) {
        self.world.borrow_mut().closed_windows.insert(window);
    }

    /// The host destroys a single panel
    pub fn destroy_panel(&self, id: HandleId) {
        if let Some(panel) = self.world.borrow_mut().panels.get_mut(&id) {
            panel.destroyed = true;
        }
    }

    /// While busy, a window refuses visibility changes
    pub fn set_window_busy(&self, window: WindowId, busy: bool) {
        let mut world = self.world.borrow_mut();
        if busy {
            world.busy_windows.insert(window);
        } else {
            world.busy_windows.remove(&window);
        }
    }
}

impl PanelFactory for SimHost {
    fn create(
        &mut self,
        id: HandleId,
        content: PanelContent,
        title: &str,
        window: WindowId,
    ) -> Result<Box<dyn NativePanel>, PanelError> {
        let mut world = self.world.borrow_mut();
        if world.closed_windows.contains(&window) {
            return Err(PanelError::WindowUnusable(window));
        }
        let defaults = PanelState::default();
        world.panels.insert(
            id,
            SimPanelState {
                window,
                title: title.to_string(),
                visible: defaults.visible,
                dock: defaults.dock,
                restriction: DockRestriction::default(),
                width: defaults.width,
                height: defaults.height,
                destroyed: false,
                disposed: false,
                refreshes: 0,
            },
        );
        Ok(Box::new(SimPanel {
            id,
            world: Rc::clone(&self.world),
            content,
        }))
    }
}

struct SimPanel {
    id: HandleId,
    world: Rc<RefCell<SimWorld>>,
    content: PanelContent,
}

impl SimPanel {
    fn read<T>(&self, read: impl FnOnce(&SimPanelState) -> T) -> Result<T, PanelError> {
        match self.world.borrow().panels.get(&self.id) {
            Some(panel) if !panel.is_gone() => Ok(read(panel)),
            _ => Err(PanelError::Destroyed),
        }
    }

    fn write(
        &mut self,
        property: Option<PanelProperty>,
        write: impl FnOnce(&mut SimPanelState) -> bool,
    ) -> Result<(), PanelError> {
        let mut world = self.world.borrow_mut();
        let changed = match world.panels.get_mut(&self.id) {
            Some(panel) if !panel.is_gone() => write(panel),
            _ => return Err(PanelError::Destroyed),
        };
        if let Some(property) = property {
            world.queue_if(changed, self.id, property);
        }
        Ok(())
    }
}

impl NativePanel for SimPanel {
    fn is_live(&self) -> bool {
        self.read(|_| ()).is_ok()
    }

    fn visible(&self) -> Result<bool, PanelError> {
        self.read(|p| p.visible)
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), PanelError> {
        let window = self.read(|p| p.window)?;
        if self.world.borrow().busy_windows.contains(&window) {
            return Err(PanelError::Rejected(format!("window {} is busy", window)));
        }
        self.write(Some(PanelProperty::Visible), |p| {
            std::mem::replace(&mut p.visible, visible) != visible
        })
    }

    fn dock_position(&self) -> Result<DockPosition, PanelError> {
        self.read(|p| p.dock)
    }

    fn set_dock_position(&mut self, dock: DockPosition) -> Result<(), PanelError> {
        self.write(Some(PanelProperty::Dock), |p| {
            std::mem::replace(&mut p.dock, dock) != dock
        })
    }

    fn dock_restriction(&self) -> Result<DockRestriction, PanelError> {
        self.read(|p| p.restriction)
    }

    fn set_dock_restriction(&mut self, restriction: DockRestriction) -> Result<(), PanelError> {
        self.write(None, |p| {
            p.restriction = restriction;
            false
        })
    }

    fn width(&self) -> Result<u32, PanelError> {
        self.read(|p| p.width)
    }

    fn set_width(&mut self, width: u32) -> Result<(), PanelError> {
        self.write(Some(PanelProperty::Width), |p| {
            std::mem::replace(&mut p.width, width) != width
        })
    }

    fn height(&self) -> Result<u32, PanelError> {
        self.read(|p| p.height)
    }

    fn set_height(&mut self, height: u32) -> Result<(), PanelError> {
        self.write(Some(PanelProperty::Height), |p| {
            std::mem::replace(&mut p.height, height) != height
        })
    }

    fn title(&self) -> Result<String, PanelError> {
        self.read(|p| p.title.clone())
    }

    fn window(&self) -> Result<WindowId, PanelError> {
        let window = self.read(|p| p.window)?;
        if self.world.borrow().closed_windows.contains(&window) {
            return Err(PanelError::WindowGone);
        }
        Ok(window)
    }

    fn content(&self) -> Option<&dyn Any> {
        Some(self.content.as_ref())
    }

    fn refresh(&mut self) {
        let _ = self.write(None, |p| {
            p.refreshes += 1;
            false
        });
    }

    fn dispose(&mut self) -> Result<(), PanelError> {
        self.write(None, |p| {
            p.disposed = true;
            false
        })
    }
}
