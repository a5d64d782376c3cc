//! Physical panel handle
//!
//! Wraps one [`NativePanel`] and enforces the live/disposed lifecycle. Once a
//! handle is disposed, or the host reports the native object gone, every
//! operation fails with [`PanelError::Destroyed`] without touching the host.
//! The owning adapter decides what a failure means (default value for reads,
//! disposal for writes).

use std::any::Any;
use std::fmt;

use super::dock::{DockPosition, DockRestriction, PanelState};
use super::ids::{HandleId, WindowId};
use super::native::NativePanel;
use crate::error::PanelError;
use crate::messages::PanelProperty;

pub struct PanelHandle {
    id: HandleId,
    native: Box<dyn NativePanel>,
    disposed: bool,
}

impl fmt::Debug for PanelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelHandle")
            .field("id", &self.id)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl PanelHandle {
    pub fn new(id: HandleId, native: Box<dyn NativePanel>) -> Self {
        Self {
            id,
            native,
            disposed: false,
        }
    }

    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Live handles are safe to read and write
    pub fn is_live(&self) -> bool {
        !self.disposed && self.native.is_live()
    }

    fn get<T>(
        &self,
        read: impl FnOnce(&dyn NativePanel) -> Result<T, PanelError>,
    ) -> Result<T, PanelError> {
        if !self.is_live() {
            return Err(PanelError::Destroyed);
        }
        read(self.native.as_ref())
    }

    fn set(
        &mut self,
        write: impl FnOnce(&mut dyn NativePanel) -> Result<(), PanelError>,
    ) -> Result<(), PanelError> {
        if !self.is_live() {
            return Err(PanelError::Destroyed);
        }
        write(self.native.as_mut())
    }

    pub fn visible(&self) -> Result<bool, PanelError> {
        self.get(|n| n.visible())
    }

    pub fn set_visible(&mut self, visible: bool) -> Result<(), PanelError> {
        self.set(|n| n.set_visible(visible))
    }

    pub fn dock_position(&self) -> Result<DockPosition, PanelError> {
        self.get(|n| n.dock_position())
    }

    pub fn set_dock_position(&mut self, dock: DockPosition) -> Result<(), PanelError> {
        self.set(|n| n.set_dock_position(dock))
    }

    pub fn dock_restriction(&self) -> Result<DockRestriction, PanelError> {
        self.get(|n| n.dock_restriction())
    }

    pub fn set_dock_restriction(&mut self, restriction: DockRestriction) -> Result<(), PanelError> {
        self.set(|n| n.set_dock_restriction(restriction))
    }

    pub fn width(&self) -> Result<u32, PanelError> {
        self.get(|n| n.width())
    }

    pub fn set_width(&mut self, width: u32) -> Result<(), PanelError> {
        self.set(|n| n.set_width(width))
    }

    pub fn height(&self) -> Result<u32, PanelError> {
        self.get(|n| n.height())
    }

    pub fn set_height(&mut self, height: u32) -> Result<(), PanelError> {
        self.set(|n| n.set_height(height))
    }

    pub fn title(&self) -> Result<String, PanelError> {
        self.get(|n| n.title())
    }

    pub fn window(&self) -> Result<WindowId, PanelError> {
        self.get(|n| n.window())
    }

    pub fn content(&self) -> Option<&dyn Any> {
        if self.is_live() {
            self.native.content()
        } else {
            None
        }
    }

    pub fn refresh(&mut self) {
        if self.is_live() {
            self.native.refresh();
        }
    }

    /// Read every synchronized property at once
    pub fn state(&self) -> Result<PanelState, PanelError> {
        Ok(PanelState {
            visible: self.visible()?,
            dock: self.dock_position()?,
            width: self.width()?,
            height: self.height()?,
        })
    }

    /// Write `state`'s value for `property`
    pub fn apply(&mut self, property: PanelProperty, state: &PanelState) -> Result<(), PanelError> {
        match property {
            PanelProperty::Visible => self.set_visible(state.visible),
            PanelProperty::Dock => self.set_dock_position(state.dock),
            PanelProperty::Width => self.set_width(state.width),
            PanelProperty::Height => self.set_height(state.height),
        }
    }

    /// Release the native panel
    ///
    /// A native object already destroyed by the host counts as disposed.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        if !self.native.is_live() {
            return;
        }
        match self.native.dispose() {
            Ok(()) | Err(PanelError::Destroyed) | Err(PanelError::WindowGone) => {}
            Err(e) => tracing::warn!("Failed to dispose panel {}: {}", self.id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PanelFactory;
    use crate::sim::SimHost;

    fn handle(host: &mut SimHost, id: u64) -> PanelHandle {
        let native = host
            .create(HandleId(id), Box::new(7u32), "Panel", WindowId(1))
            .unwrap();
        PanelHandle::new(HandleId(id), native)
    }

    #[test]
    fn test_live_handle_reads_and_writes() {
        let mut host = SimHost::new();
        let mut panel = handle(&mut host, 1);

        panel.set_dock_position(DockPosition::Top).unwrap();
        let resized = PanelState {
            height: 90,
            ..PanelState::default()
        };
        panel.apply(PanelProperty::Height, &resized).unwrap();

        let state = panel.state().unwrap();
        assert_eq!(state.dock, DockPosition::Top);
        assert_eq!(state.height, 90);
        assert_eq!(panel.content().and_then(|c| c.downcast_ref::<u32>()), Some(&7));
    }

    #[test]
    fn test_disposed_handle_fails_without_touching_host() {
        let mut host = SimHost::new();
        let mut panel = handle(&mut host, 1);

        panel.dispose();
        panel.dispose();

        assert!(!panel.is_live());
        assert_eq!(panel.set_visible(true), Err(PanelError::Destroyed));
        assert_eq!(panel.window(), Err(PanelError::Destroyed));
        assert!(panel.content().is_none());
        assert!(host.panel(HandleId(1)).unwrap().disposed);
        assert_eq!(host.pending_notifications(), 0);
    }

    #[test]
    fn test_host_destroyed_panel_is_not_live() {
        let mut host = SimHost::new();
        let mut panel = handle(&mut host, 1);

        host.destroy_panel(HandleId(1));
        panel.refresh();
        panel.dispose();

        assert!(!panel.is_live());
        assert_eq!(panel.visible(), Err(PanelError::Destroyed));
        assert!(!host.panel(HandleId(1)).unwrap().disposed);
    }
}
