//! Logical panel owners and their registration descriptors

use std::fmt;
use std::rc::Rc;

use crate::error::BoxError;
use crate::panel::{ContentFactory, OwnerId, PanelContent, PanelKey};

/// A presentation object that defines side panels
///
/// `register_panels` is invoked once, the first time the owner is activated
/// in any window.
pub trait PanelOwner {
    fn register_panels(&mut self, panels: &mut PanelRegistrar) -> Result<(), BoxError>;
}

impl<F> PanelOwner for F
where
    F: FnMut(&mut PanelRegistrar) -> Result<(), BoxError>,
{
    fn register_panels(&mut self, panels: &mut PanelRegistrar) -> Result<(), BoxError> {
        self(panels)
    }
}

/// Immutable record of one panel an owner registered
#[derive(Clone)]
pub struct PanelDescriptor {
    pub title: String,
    pub initially_visible: bool,
    factory: ContentFactory,
}

impl PanelDescriptor {
    /// Create fresh content for a new native panel
    pub fn create_content(&self) -> PanelContent {
        (self.factory)()
    }
}

impl fmt::Debug for PanelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelDescriptor")
            .field("title", &self.title)
            .field("initially_visible", &self.initially_visible)
            .finish_non_exhaustive()
    }
}

/// Collects descriptors while an owner registers its panels
#[derive(Debug)]
pub struct PanelRegistrar {
    owner: OwnerId,
    descriptors: Vec<PanelDescriptor>,
}

impl PanelRegistrar {
    pub(crate) fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            descriptors: Vec::new(),
        }
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Register a panel, returning the key the owner uses to reach it later
    pub fn add_panel<F>(
        &mut self,
        title: impl Into<String>,
        initially_visible: bool,
        factory: F,
    ) -> PanelKey
    where
        F: Fn() -> PanelContent + 'static,
    {
        let key = PanelKey::new(self.owner, self.descriptors.len());
        self.descriptors.push(PanelDescriptor {
            title: title.into(),
            initially_visible,
            factory: Rc::new(factory),
        });
        key
    }

    pub(crate) fn into_descriptors(self) -> Vec<PanelDescriptor> {
        self.descriptors
    }
}
