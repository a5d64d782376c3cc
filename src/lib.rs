//! panelsync - one logical side panel, many host windows
//!
//! This crate provides the panel registry and one-to-many synchronization
//! adapter for add-ins running inside a multi-window document editor. Each
//! presentation object ("owner") registers its panels once; the registry
//! creates a native panel per window, keeps all copies in sync, and hides or
//! restores them as focus moves between windows.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod messages;
pub mod panel;
pub mod registry;
pub mod scenario;
pub mod sim;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use config::RegistryConfig;
pub use error::{PanelError, RegistryError};
pub use messages::{HostMsg, PanelEvent, PanelProperty};
pub use panel::{DockPosition, OwnerId, PanelKey, WindowId};
pub use registry::{PanelOwner, PanelRegistrar, PanelRegistry};
