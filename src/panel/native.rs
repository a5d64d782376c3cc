//! Contract for host-owned native panels
//!
//! The host application supplies a [`PanelFactory`] at registry construction.
//! Every panel it creates is bound to one window and reports failures as
//! [`PanelError`] instead of panicking when the host tears it down.

use std::any::Any;
use std::rc::Rc;

use super::dock::{DockPosition, DockRestriction};
use super::ids::{HandleId, WindowId};
use crate::error::PanelError;

/// Content placed inside a native panel, owned by that panel
pub type PanelContent = Box<dyn Any>;

/// Produces fresh content for each native panel of a logical panel
pub type ContentFactory = Rc<dyn Fn() -> PanelContent>;

/// Opaque per-activation context forwarded from the host to adapters
pub type ViewContext = Rc<dyn Any>;

/// One native side panel living in one host window
pub trait NativePanel {
    /// Whether the host object still exists
    fn is_live(&self) -> bool;

    fn visible(&self) -> Result<bool, PanelError>;
    fn set_visible(&mut self, visible: bool) -> Result<(), PanelError>;

    fn dock_position(&self) -> Result<DockPosition, PanelError>;
    fn set_dock_position(&mut self, dock: DockPosition) -> Result<(), PanelError>;

    fn dock_restriction(&self) -> Result<DockRestriction, PanelError>;
    fn set_dock_restriction(&mut self, restriction: DockRestriction) -> Result<(), PanelError>;

    fn width(&self) -> Result<u32, PanelError>;
    fn set_width(&mut self, width: u32) -> Result<(), PanelError>;

    fn height(&self) -> Result<u32, PanelError>;
    fn set_height(&mut self, height: u32) -> Result<(), PanelError>;

    fn title(&self) -> Result<String, PanelError>;

    /// Window this panel is shown in
    fn window(&self) -> Result<WindowId, PanelError>;

    /// Content created for this panel, if the host exposes it
    fn content(&self) -> Option<&dyn Any>;

    /// Re-bind content after the panel's window was re-activated
    fn refresh(&mut self) {}

    /// Release the native object
    fn dispose(&mut self) -> Result<(), PanelError>;
}

/// Creates native panels on behalf of the registry
pub trait PanelFactory {
    /// Create a panel showing `content` in `window`
    ///
    /// `id` is the registry's identity for the panel; hosts tag change
    /// notifications with it.
    fn create(
        &mut self,
        id: HandleId,
        content: PanelContent,
        title: &str,
        window: WindowId,
    ) -> Result<Box<dyn NativePanel>, PanelError>;
}
