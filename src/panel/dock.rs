//! Dock positions and synchronized panel state
//!
//! This module defines the value types shared by every native panel backing
//! the same logical panel.

use serde::{Deserialize, Serialize};

/// Position where a panel is docked inside its window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DockPosition {
    Left,
    #[default]
    Right,
    Top,
    Bottom,
    Floating,
}

impl DockPosition {
    /// Returns the axis this dock expands along, `None` for floating panels
    pub fn axis(&self) -> Option<Axis> {
        match self {
            DockPosition::Left | DockPosition::Right => Some(Axis::Vertical),
            DockPosition::Top | DockPosition::Bottom => Some(Axis::Horizontal),
            DockPosition::Floating => None,
        }
    }

    /// Width is meaningful unless the panel spans the window horizontally
    pub fn syncs_width(&self) -> bool {
        self.axis() != Some(Axis::Horizontal)
    }

    /// Height is meaningful unless the panel spans the window vertically
    pub fn syncs_height(&self) -> bool {
        self.axis() != Some(Axis::Vertical)
    }
}

/// Axis a docked panel stretches along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Panel spans the full window width (top/bottom docks)
    Horizontal,
    /// Panel spans the full window height (left/right docks)
    Vertical,
}

/// Restriction on where the user may move a panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DockRestriction {
    #[default]
    None,
    NoChange,
    NoHorizontal,
    NoVertical,
}

impl DockRestriction {
    /// Whether a panel under this restriction may be moved to `position`
    pub fn allows(&self, from: DockPosition, to: DockPosition) -> bool {
        match self {
            DockRestriction::None => true,
            DockRestriction::NoChange => from == to,
            DockRestriction::NoHorizontal => to.axis() != Some(Axis::Horizontal),
            DockRestriction::NoVertical => to.axis() != Some(Axis::Vertical),
        }
    }
}

/// The properties kept in lock-step across every member of an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelState {
    pub visible: bool,
    pub dock: DockPosition,
    pub width: u32,
    pub height: u32,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            visible: false,
            dock: DockPosition::default(),
            width: 250,
            height: 200,
        }
    }
}
