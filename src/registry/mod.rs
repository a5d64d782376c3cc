//! Panel registry
//!
//! Process-wide coordinator mapping logical panel owners to their adapters
//! and windows to the owners present in them.
//!
//! On every window activation the registry lazily creates the native panels
//! the activating owner is missing, hides the panels of every other owner
//! present in that window, then restores the activating owner's panels that
//! it hid earlier.
//!
//! ## Tables
//!
//! - `owners`: owner → descriptors and one adapter per descriptor (same slot)
//! - `windows`: window → owners with a live panel in that window
//!
//! `windows` is rebuilt from the live adapters at the end of every mutating
//! operation, so the two tables agree on live adapters only. An owner whose
//! adapters were all disposed by the host stays in `owners` (it is not asked
//! to register again) but is absent from `windows`.

mod owner;

pub use owner::{PanelDescriptor, PanelOwner, PanelRegistrar};

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::config::RegistryConfig;
use crate::error::{PanelError, RegistryError};
use crate::messages::{PanelEvent, PanelProperty};
use crate::panel::{
    DockPosition, DockRestriction, HandleId, IdCounter, OwnerId, PanelAdapter, PanelFactory,
    PanelHandle, PanelKey, PanelState, ViewContext, WindowId,
};

/// Descriptors and adapters of one owner, indexed by slot
#[derive(Debug)]
struct OwnerPanels {
    descriptors: Vec<PanelDescriptor>,
    adapters: Vec<PanelAdapter>,
}

/// Snapshot of one logical panel for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelSummary {
    pub key: PanelKey,
    pub title: String,
    pub windows: Vec<WindowId>,
    pub visible: bool,
    pub dock: DockPosition,
    pub width: u32,
    pub height: u32,
    pub auto_hidden: bool,
    pub disposed: bool,
}

pub struct PanelRegistry<F: PanelFactory> {
    factory: F,
    config: RegistryConfig,
    owners: BTreeMap<OwnerId, OwnerPanels>,
    windows: BTreeMap<WindowId, BTreeSet<OwnerId>>,
    owner_ids: IdCounter,
    handle_ids: IdCounter,
    events: Vec<PanelEvent>,
}

impl<F: PanelFactory> PanelRegistry<F> {
    pub fn new(factory: F, config: RegistryConfig) -> Self {
        Self {
            factory,
            config,
            owners: BTreeMap::new(),
            windows: BTreeMap::new(),
            owner_ids: IdCounter::default(),
            handle_ids: IdCounter::default(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Allocate an identity for a new presentation object
    pub fn new_owner(&mut self) -> OwnerId {
        OwnerId(self.owner_ids.next())
    }

    /// Whether `owner` has registered its panels
    pub fn is_registered(&self, owner: OwnerId) -> bool {
        self.owners.contains_key(&owner)
    }

    /// Owners with a live panel in `window`
    pub fn owners_in(&self, window: WindowId) -> Vec<OwnerId> {
        self.windows
            .get(&window)
            .map(|owners| owners.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Keys of every panel `owner` registered
    pub fn panel_keys(&self, owner: OwnerId) -> Vec<PanelKey> {
        self.owners
            .get(&owner)
            .map(|entry| {
                (0..entry.descriptors.len())
                    .map(|slot| PanelKey::new(owner, slot))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Drain adapter-level change events
    pub fn take_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Activation
    // ========================================================================

    /// Ensure `owner`'s panels exist in `window` and arbitrate visibility
    pub fn register_panels(
        &mut self,
        owner: OwnerId,
        panels: &mut dyn PanelOwner,
        window: WindowId,
        view_context: Option<ViewContext>,
    ) -> Result<Vec<PanelKey>, RegistryError> {
        if self.owners.contains_key(&owner) {
            self.attach_window(owner, window);
        } else {
            self.register_owner(owner, panels, window, view_context)?;
        }
        self.reindex();
        self.collect_events();

        if self.config.auto_hide_inactive {
            let others: Vec<OwnerId> = self
                .owners_in(window)
                .into_iter()
                .filter(|other| *other != owner)
                .collect();
            for other in others {
                if let Some(entry) = self.owners.get_mut(&other) {
                    tracing::debug!("Hiding panels of owner {} in window {}", other, window);
                    for adapter in entry.adapters.iter_mut() {
                        adapter.hide_if_visible();
                    }
                }
            }
            self.collect_events();
        }

        if let Some(entry) = self.owners.get_mut(&owner) {
            for adapter in entry.adapters.iter_mut() {
                adapter.restore_if_needed();
            }
        }
        self.reindex();
        self.collect_events();

        Ok(self.panel_keys(owner))
    }

    /// First activation: capture descriptors and create one adapter each
    fn register_owner(
        &mut self,
        owner: OwnerId,
        panels: &mut dyn PanelOwner,
        window: WindowId,
        view_context: Option<ViewContext>,
    ) -> Result<(), RegistryError> {
        let mut registrar = PanelRegistrar::new(owner);
        panels
            .register_panels(&mut registrar)
            .map_err(|source| RegistryError::Registration { owner, source })?;
        let descriptors = registrar.into_descriptors();
        tracing::debug!(
            "Owner {} registered {} panel(s) in window {}",
            owner,
            descriptors.len(),
            window
        );

        let mut adapters = Vec::with_capacity(descriptors.len());
        for descriptor in &descriptors {
            let created =
                create_handle(&mut self.factory, &mut self.handle_ids, descriptor, window);
            let adapter = match created {
                Ok(handle) => {
                    let mut adapter = PanelAdapter::new(handle, view_context.clone());
                    adapter.set_dock_position(self.config.default_dock);
                    adapter.set_width(self.config.default_width);
                    adapter.set_height(self.config.default_height);
                    adapter.set_visible(descriptor.initially_visible);
                    // Initial layout is not a change the owner observes
                    adapter.take_changes();
                    adapter
                }
                Err(e) => {
                    tracing::warn!(
                        "Could not create panel '{}' in window {}: {}",
                        descriptor.title,
                        window,
                        e
                    );
                    PanelAdapter::detached(view_context.clone())
                }
            };
            adapters.push(adapter);
        }

        self.owners.insert(
            owner,
            OwnerPanels {
                descriptors,
                adapters,
            },
        );
        Ok(())
    }

    /// Later activation: add a member for `window` where one is missing
    fn attach_window(&mut self, owner: OwnerId, window: WindowId) {
        let Some(entry) = self.owners.get_mut(&owner) else {
            return;
        };

        for (slot, adapter) in entry.adapters.iter_mut().enumerate() {
            if adapter.check_dispose() {
                continue;
            }
            if adapter.view_registered(window) {
                adapter.refresh(window);
                continue;
            }
            let descriptor = &entry.descriptors[slot];
            match create_handle(&mut self.factory, &mut self.handle_ids, descriptor, window) {
                Ok(handle) => adapter.add(handle),
                Err(e) => tracing::warn!(
                    "Could not add panel '{}' to window {}: {}",
                    descriptor.title,
                    window,
                    e
                ),
            }
        }
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Remove every panel shown in a closing window
    pub fn cleanup(&mut self, window: WindowId) {
        tracing::debug!("Cleaning up panels for window {}", window);
        for entry in self.owners.values_mut() {
            for adapter in entry.adapters.iter_mut() {
                adapter.cleanup_view(window);
            }
        }
        self.windows.remove(&window);
        self.reindex();
        self.collect_events();
    }

    /// Dispose every panel of a retired owner
    pub fn cleanup_view_model(&mut self, owner: OwnerId) {
        let Some(mut entry) = self.owners.remove(&owner) else {
            return;
        };
        tracing::debug!("Retiring owner {}", owner);
        for adapter in entry.adapters.iter_mut() {
            adapter.dispose();
        }
        self.reindex();
    }

    /// Dispose everything (add-in shutdown)
    ///
    /// The tables are emptied before any adapter is disposed.
    pub fn dispose(&mut self) {
        let owners = std::mem::take(&mut self.owners);
        self.windows.clear();
        tracing::debug!("Disposing panel registry ({} owners)", owners.len());
        for (_, mut entry) in owners {
            for adapter in entry.adapters.iter_mut() {
                adapter.dispose();
            }
        }
    }

    // ========================================================================
    // Host notifications
    // ========================================================================

    /// A native panel reported that `property` changed
    pub fn panel_changed(&mut self, handle: HandleId, property: PanelProperty) {
        let adapter = self
            .owners
            .values_mut()
            .flat_map(|entry| entry.adapters.iter_mut())
            .find(|adapter| adapter.contains(handle));

        match adapter {
            Some(adapter) => adapter.member_changed(handle, property),
            None => {
                tracing::trace!("Change from unknown panel {} ignored", handle);
                return;
            }
        }
        self.reindex();
        self.collect_events();
    }

    // ========================================================================
    // Owner-facing panel access
    // ========================================================================

    fn adapter(&self, key: PanelKey) -> Option<&PanelAdapter> {
        self.owners.get(&key.owner)?.adapters.get(key.slot)
    }

    fn update_panel(&mut self, key: PanelKey, update: impl FnOnce(&mut PanelAdapter)) {
        match self
            .owners
            .get_mut(&key.owner)
            .and_then(|entry| entry.adapters.get_mut(key.slot))
        {
            Some(adapter) => update(adapter),
            None => {
                tracing::debug!("Write to unknown panel {} ignored", key);
                return;
            }
        }
        self.reindex();
        self.collect_events();
    }

    pub fn visible(&self, key: PanelKey) -> bool {
        self.adapter(key).is_some_and(|a| a.visible())
    }

    pub fn set_visible(&mut self, key: PanelKey, visible: bool) {
        self.update_panel(key, |a| a.set_visible(visible));
    }

    pub fn dock_position(&self, key: PanelKey) -> DockPosition {
        self.adapter(key)
            .map(|a| a.dock_position())
            .unwrap_or_default()
    }

    pub fn set_dock_position(&mut self, key: PanelKey, dock: DockPosition) {
        self.update_panel(key, |a| a.set_dock_position(dock));
    }

    pub fn dock_restriction(&self, key: PanelKey) -> DockRestriction {
        self.adapter(key)
            .map(|a| a.dock_restriction())
            .unwrap_or_default()
    }

    pub fn set_dock_restriction(&mut self, key: PanelKey, restriction: DockRestriction) {
        self.update_panel(key, |a| a.set_dock_restriction(restriction));
    }

    pub fn width(&self, key: PanelKey) -> u32 {
        self.adapter(key).map_or(0, |a| a.width())
    }

    pub fn set_width(&mut self, key: PanelKey, width: u32) {
        self.update_panel(key, |a| a.set_width(width));
    }

    pub fn height(&self, key: PanelKey) -> u32 {
        self.adapter(key).map_or(0, |a| a.height())
    }

    pub fn set_height(&mut self, key: PanelKey, height: u32) {
        self.update_panel(key, |a| a.set_height(height));
    }

    pub fn title(&self, key: PanelKey) -> String {
        self.adapter(key).map(|a| a.title()).unwrap_or_default()
    }

    /// Synchronized state, `None` for unknown keys
    pub fn state(&self, key: PanelKey) -> Option<PanelState> {
        self.adapter(key).map(|a| a.state())
    }

    /// Unknown keys count as disposed
    pub fn is_disposed(&self, key: PanelKey) -> bool {
        self.adapter(key).map_or(true, |a| a.is_disposed())
    }

    pub fn is_auto_hidden(&self, key: PanelKey) -> bool {
        self.adapter(key).is_some_and(|a| a.is_auto_hidden())
    }

    pub fn view_context(&self, key: PanelKey) -> Option<&ViewContext> {
        self.adapter(key)?.view_context()
    }

    /// Native panels backing `key`, in creation order
    pub fn handles(&self, key: PanelKey) -> Vec<HandleId> {
        self.adapter(key).map(|a| a.handles()).unwrap_or_default()
    }

    /// Native panel backing `key` in `window`
    pub fn handle_in(&self, key: PanelKey, window: WindowId) -> Option<HandleId> {
        self.adapter(key)?.handle_in(window)
    }

    /// Windows showing `key`
    pub fn windows_of(&self, key: PanelKey) -> Vec<WindowId> {
        self.adapter(key).map(|a| a.windows()).unwrap_or_default()
    }

    /// Content of the panel backing `key` in `window`
    pub fn content_in(&self, key: PanelKey, window: WindowId) -> Option<&dyn Any> {
        self.adapter(key)?.content_in(window)
    }

    /// One row per registered logical panel, ordered by key
    pub fn summaries(&self) -> Vec<PanelSummary> {
        self.owners
            .iter()
            .flat_map(|(owner, entry)| {
                entry
                    .adapters
                    .iter()
                    .zip(&entry.descriptors)
                    .enumerate()
                    .map(move |(slot, (adapter, descriptor))| PanelSummary {
                        key: PanelKey::new(*owner, slot),
                        title: descriptor.title.clone(),
                        windows: adapter.windows(),
                        visible: adapter.visible(),
                        dock: adapter.dock_position(),
                        width: adapter.width(),
                        height: adapter.height(),
                        auto_hidden: adapter.is_auto_hidden(),
                        disposed: adapter.is_disposed(),
                    })
            })
            .collect()
    }

    // ========================================================================
    // Bookkeeping
    // ========================================================================

    /// Rebuild the window → owners index from live adapters
    fn reindex(&mut self) {
        self.windows.clear();
        for (owner, entry) in &self.owners {
            for adapter in entry.adapters.iter().filter(|a| !a.is_disposed()) {
                for window in adapter.windows() {
                    self.windows.entry(window).or_default().insert(*owner);
                }
            }
        }
    }

    fn collect_events(&mut self) {
        for (owner, entry) in self.owners.iter_mut() {
            for (slot, adapter) in entry.adapters.iter_mut().enumerate() {
                let key = PanelKey::new(*owner, slot);
                self.events
                    .extend(adapter.take_changes().into_iter().map(|change| PanelEvent {
                        key,
                        property: change.property,
                        state: change.state,
                    }));
            }
        }
    }
}

impl<F: PanelFactory> Drop for PanelRegistry<F> {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn create_handle<F: PanelFactory>(
    factory: &mut F,
    ids: &mut IdCounter,
    descriptor: &PanelDescriptor,
    window: WindowId,
) -> Result<PanelHandle, PanelError> {
    let id = HandleId(ids.next());
    let native = factory.create(id, descriptor.create_content(), &descriptor.title, window)?;
    tracing::debug!("Created panel {} '{}' in window {}", id, descriptor.title, window);
    Ok(PanelHandle::new(id, native))
}
