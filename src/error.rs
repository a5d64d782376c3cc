//! Error types for the panel layer
//!
//! Host failures surface as [`PanelError`]. Most of them are absorbed by the
//! adapter (see `panel::handle`), only registration failures reach callers
//! through [`RegistryError`].

use thiserror::Error;

use crate::panel::{OwnerId, WindowId};

/// Boxed error returned by owner registration callbacks
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure reported by a native panel or the native panel factory
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PanelError {
    /// The native panel object has been destroyed by the host
    #[error("panel has been destroyed")]
    Destroyed,

    /// The window the panel belonged to no longer resolves
    #[error("owning window is gone")]
    WindowGone,

    /// The factory could not create a panel because the window was torn down
    #[error("window {0} is unusable")]
    WindowUnusable(WindowId),

    /// The host refused the operation (e.g. window mid-destruction)
    #[error("host rejected operation: {0}")]
    Rejected(String),
}

impl PanelError {
    /// Whether this error means the native object is permanently gone
    pub fn is_stale(&self) -> bool {
        matches!(self, PanelError::Destroyed | PanelError::WindowGone)
    }
}

/// Errors surfaced by [`crate::registry::PanelRegistry`] operations
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The owner's registration callback failed
    #[error("panel registration failed for owner {owner}")]
    Registration {
        owner: OwnerId,
        #[source]
        source: BoxError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_classification() {
        assert!(PanelError::Destroyed.is_stale());
        assert!(PanelError::WindowGone.is_stale());
        assert!(!PanelError::Rejected("busy".into()).is_stale());
        assert!(!PanelError::WindowUnusable(WindowId(3)).is_stale());
    }

    #[test]
    fn test_registration_error_keeps_source() {
        let err = RegistryError::Registration {
            owner: OwnerId(7),
            source: "factory exploded".into(),
        };
        assert_eq!(err.to_string(), "panel registration failed for owner 7");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("factory exploded"));
    }
}
