//! Host message dispatch
//!
//! Routes [`HostMsg`]s from the host application's event thread into the
//! registry.

use std::collections::HashMap;

use crate::error::RegistryError;
use crate::messages::HostMsg;
use crate::panel::{OwnerId, PanelFactory, ViewContext};
use crate::registry::{PanelOwner, PanelRegistry};

/// Lookup of live presentation objects by owner id
pub trait OwnerDirectory {
    fn owner_mut(&mut self, id: OwnerId) -> Option<&mut dyn PanelOwner>;

    /// Context handed to adapters created while `id` activates
    fn view_context(&self, _id: OwnerId) -> Option<ViewContext> {
        None
    }
}

impl OwnerDirectory for HashMap<OwnerId, Box<dyn PanelOwner>> {
    fn owner_mut(&mut self, id: OwnerId) -> Option<&mut dyn PanelOwner> {
        match self.get_mut(&id) {
            Some(owner) => Some(owner.as_mut()),
            None => None,
        }
    }
}

/// Apply one host message to the registry
pub fn update<F: PanelFactory>(
    registry: &mut PanelRegistry<F>,
    owners: &mut dyn OwnerDirectory,
    msg: HostMsg,
) -> Result<(), RegistryError> {
    match msg {
        HostMsg::WindowActivated { window, owner } => {
            let context = owners.view_context(owner);
            let Some(panels) = owners.owner_mut(owner) else {
                tracing::debug!("Window {} activated for unknown owner {}", window, owner);
                return Ok(());
            };
            registry.register_panels(owner, panels, window, context)?;
        }
        HostMsg::WindowClosing(window) => registry.cleanup(window),
        HostMsg::OwnerRetired(owner) => registry.cleanup_view_model(owner),
        HostMsg::PanelChanged { handle, property } => registry.panel_changed(handle, property),
        HostMsg::Shutdown => registry.dispose(),
    }
    Ok(())
}
