//! Message types for the host integration
//!
//! Host input flows through [`HostMsg`]; the registry reports coalesced panel
//! changes back to owners as [`PanelEvent`]s.

use serde::{Deserialize, Serialize};

use crate::panel::{HandleId, OwnerId, PanelKey, PanelState, WindowId};

/// A synchronized panel property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelProperty {
    Visible,
    Dock,
    Width,
    Height,
}

/// One adapter-level change, raised once per propagated write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelEvent {
    pub key: PanelKey,
    pub property: PanelProperty,
    /// Synchronized state after the change
    pub state: PanelState,
}

/// Notifications delivered by the host application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMsg {
    /// A window gained focus while showing `owner`'s presentation object
    WindowActivated { window: WindowId, owner: OwnerId },
    /// A window is closing for good
    WindowClosing(WindowId),
    /// A presentation object was torn down permanently
    OwnerRetired(OwnerId),
    /// A native panel reported a property change
    PanelChanged {
        handle: HandleId,
        property: PanelProperty,
    },
    /// The add-in is shutting down
    Shutdown,
}
