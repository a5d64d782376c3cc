//! Panel system - one logical panel shown in many windows
//!
//! ## Architecture
//!
//! - `NativePanel` / `PanelFactory`: contract the host application implements
//! - `PanelHandle`: one native panel with a one-way live → disposed lifecycle
//! - `PanelAdapter`: all handles of one logical panel, kept in lock-step
//! - `DockPosition`, `PanelState`: the synchronized values
//!
//! The registry (`crate::registry`) owns adapters and decides which ones are
//! hidden or restored when the focused window changes.

mod adapter;
mod dock;
mod handle;
mod ids;
mod native;

pub use adapter::{AdapterChange, PanelAdapter};
pub use dock::{Axis, DockPosition, DockRestriction, PanelState};
pub use handle::PanelHandle;
pub(crate) use ids::IdCounter;
pub use ids::{HandleId, OwnerId, PanelKey, WindowId};
pub use native::{ContentFactory, NativePanel, PanelContent, PanelFactory, ViewContext};
