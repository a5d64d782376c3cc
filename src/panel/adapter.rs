//! One-to-many panel adapter
//!
//! A [`PanelAdapter`] owns every native panel that shows the same logical
//! panel in different windows and keeps their visibility, dock position and
//! size in lock-step.
//!
//! ## Propagation
//!
//! A change reported by one member is fanned out to its siblings. Writing a
//! sibling makes the host report a change for that sibling too; those echoes
//! carry the value the adapter just synchronized and are dropped, so one
//! external change raises exactly one adapter event.
//!
//! ## Hide / restore
//!
//! `hide_if_visible` and `restore_if_needed` implement window-switch
//! arbitration. Only panels hidden by the registry (`auto_hidden`) are
//! restored; a panel the user closed stays closed.

use super::dock::{DockPosition, DockRestriction, PanelState};
use super::handle::PanelHandle;
use super::ids::{HandleId, WindowId};
use super::native::ViewContext;
use crate::error::PanelError;
use crate::messages::PanelProperty;

/// Adapter-level change awaiting delivery to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterChange {
    pub property: PanelProperty,
    pub state: PanelState,
}

pub struct PanelAdapter {
    /// Non-empty while alive; the first member is the representative
    members: Vec<PanelHandle>,
    /// Last value written to every member
    synced: PanelState,
    auto_hidden: bool,
    alive: bool,
    view_context: Option<ViewContext>,
    changes: Vec<AdapterChange>,
}

impl std::fmt::Debug for PanelAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanelAdapter")
            .field("members", &self.members)
            .field("synced", &self.synced)
            .field("auto_hidden", &self.auto_hidden)
            .field("alive", &self.alive)
            .finish_non_exhaustive()
    }
}

impl PanelAdapter {
    /// Create an adapter around its first member
    pub fn new(handle: PanelHandle, view_context: Option<ViewContext>) -> Self {
        let synced = handle.state().unwrap_or_default();
        let alive = handle.is_live();
        Self {
            members: vec![handle],
            synced,
            auto_hidden: false,
            alive,
            view_context,
            changes: Vec::new(),
        }
    }

    /// An adapter that never got a member (its window was unusable)
    pub fn detached(view_context: Option<ViewContext>) -> Self {
        Self {
            members: Vec::new(),
            synced: PanelState::default(),
            auto_hidden: false,
            alive: false,
            view_context,
            changes: Vec::new(),
        }
    }

    pub fn is_disposed(&self) -> bool {
        !self.alive
    }

    pub fn is_auto_hidden(&self) -> bool {
        self.auto_hidden
    }

    pub fn view_context(&self) -> Option<&ViewContext> {
        self.view_context.as_ref()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, handle: HandleId) -> bool {
        self.members.iter().any(|m| m.id() == handle)
    }

    pub fn handles(&self) -> Vec<HandleId> {
        self.members.iter().map(|m| m.id()).collect()
    }

    /// Windows with a live member, in member order
    pub fn windows(&self) -> Vec<WindowId> {
        self.members
            .iter()
            .filter(|m| m.is_live())
            .filter_map(|m| m.window().ok())
            .collect()
    }

    /// Member shown in `window`, if any
    pub fn handle_in(&self, window: WindowId) -> Option<HandleId> {
        self.members
            .iter()
            .find(|m| m.window().ok() == Some(window))
            .map(|m| m.id())
    }

    /// Content of the member shown in `window`
    pub fn content_in(&self, window: WindowId) -> Option<&dyn std::any::Any> {
        self.members
            .iter()
            .find(|m| m.window().ok() == Some(window))
            .and_then(|m| m.content())
    }

    /// Drain changes raised since the last call
    pub fn take_changes(&mut self) -> Vec<AdapterChange> {
        std::mem::take(&mut self.changes)
    }

    fn raise(&mut self, property: PanelProperty) {
        self.changes.push(AdapterChange {
            property,
            state: self.synced,
        });
    }

    // ========================================================================
    // Merged view
    // ========================================================================

    fn read<T>(&self, read: impl FnOnce(&PanelHandle) -> Result<T, PanelError>, default: T) -> T {
        if !self.alive {
            return default;
        }
        match self.members.first() {
            Some(representative) => read(representative).unwrap_or(default),
            None => default,
        }
    }

    pub fn visible(&self) -> bool {
        self.read(|h| h.visible(), false)
    }

    pub fn dock_position(&self) -> DockPosition {
        self.read(|h| h.dock_position(), DockPosition::default())
    }

    pub fn dock_restriction(&self) -> DockRestriction {
        self.read(|h| h.dock_restriction(), DockRestriction::default())
    }

    pub fn width(&self) -> u32 {
        self.read(|h| h.width(), 0)
    }

    pub fn height(&self) -> u32 {
        self.read(|h| h.height(), 0)
    }

    pub fn title(&self) -> String {
        self.read(|h| h.title(), String::new())
    }

    pub fn window(&self) -> Option<WindowId> {
        self.read(|h| h.window().map(Some), None)
    }

    /// Synchronized state as last written to every member
    pub fn state(&self) -> PanelState {
        self.synced
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Write to every member except `skip`
    ///
    /// A stale member disposes the whole adapter. The first error is returned
    /// after every other member has been written.
    fn write_members(
        &mut self,
        skip: Option<HandleId>,
        mut write: impl FnMut(&mut PanelHandle) -> Result<(), PanelError>,
    ) -> Result<(), PanelError> {
        if !self.alive {
            return Err(PanelError::Destroyed);
        }

        let mut result = Ok(());
        let mut stale = false;
        for member in self.members.iter_mut() {
            if Some(member.id()) == skip {
                continue;
            }
            if let Err(e) = write(member) {
                stale |= e.is_stale();
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }

        if stale {
            tracing::debug!("Stale panel during write, disposing adapter");
            self.dispose();
        }
        result
    }

    /// Write one synchronized property to every member
    ///
    /// Raises a change when the representative reported a different value
    /// before the write. A refused write leaves `synced` at what the
    /// representative actually shows.
    fn write_property(
        &mut self,
        property: PanelProperty,
        state: PanelState,
    ) -> Result<(), PanelError> {
        let before = match self.members.first().map(|m| m.state()) {
            Some(Ok(current)) => current,
            _ => self.synced,
        };
        if let Err(e) = self.write_members(None, |m| m.apply(property, &state)) {
            self.resync(property);
            return Err(e);
        }
        self.synced = state;
        if self.alive && !same_value(property, &before, &state) {
            self.raise(property);
        }
        Ok(())
    }

    /// Reload `property` from the representative and realign the siblings
    fn resync(&mut self, property: PanelProperty) {
        if !self.alive {
            return;
        }
        let Some((representative, siblings)) = self.members.split_first_mut() else {
            return;
        };
        let actual = match representative.state() {
            Ok(actual) => actual,
            Err(e) => {
                tracing::debug!("Cannot resync {:?} from representative: {}", property, e);
                return;
            }
        };
        for sibling in siblings {
            let aligned = sibling
                .state()
                .is_ok_and(|current| same_value(property, &current, &actual));
            if aligned {
                continue;
            }
            if let Err(e) = sibling.apply(property, &actual) {
                tracing::debug!("Panel {} left out of resync: {}", sibling.id(), e);
            }
        }
        self.synced = actual;
    }

    fn write_visible(&mut self, visible: bool) -> Result<(), PanelError> {
        let mut state = self.synced;
        state.visible = visible;
        self.write_property(PanelProperty::Visible, state)
    }

    pub fn set_visible(&mut self, visible: bool) {
        if let Err(e) = self.write_visible(visible) {
            tracing::warn!("Failed to set panel visibility to {}: {}", visible, e);
        }
    }

    pub fn set_dock_position(&mut self, dock: DockPosition) {
        let mut state = self.synced;
        state.dock = dock;
        if let Err(e) = self.write_property(PanelProperty::Dock, state) {
            tracing::warn!("Failed to set panel dock to {:?}: {}", dock, e);
        }
    }

    pub fn set_width(&mut self, width: u32) {
        let mut state = self.synced;
        state.width = width;
        if let Err(e) = self.write_property(PanelProperty::Width, state) {
            tracing::warn!("Failed to set panel width to {}: {}", width, e);
        }
    }

    pub fn set_height(&mut self, height: u32) {
        let mut state = self.synced;
        state.height = height;
        if let Err(e) = self.write_property(PanelProperty::Height, state) {
            tracing::warn!("Failed to set panel height to {}: {}", height, e);
        }
    }

    pub fn set_dock_restriction(&mut self, restriction: DockRestriction) {
        if let Err(e) = self.write_members(None, |m| m.set_dock_restriction(restriction)) {
            tracing::warn!("Failed to set dock restriction: {}", e);
        }
    }

    // ========================================================================
    // Membership
    // ========================================================================

    /// Add the panel for another window, inheriting the siblings' layout
    pub fn add(&mut self, mut handle: PanelHandle) {
        if !self.alive {
            handle.dispose();
            return;
        }

        let state = match self.members.first().map(|m| m.state()) {
            Some(Ok(state)) => state,
            _ => self.synced,
        };

        let synced = handle
            .set_visible(state.visible)
            .and_then(|_| handle.set_dock_position(state.dock))
            .and_then(|_| {
                if state.dock.syncs_width() {
                    handle.set_width(state.width)?;
                }
                if state.dock.syncs_height() {
                    handle.set_height(state.height)?;
                }
                Ok(())
            });

        match synced {
            Err(e) if e.is_stale() => {
                tracing::debug!("Panel {} died before joining adapter: {}", handle.id(), e);
                handle.dispose();
            }
            result => {
                if let Err(e) = result {
                    tracing::warn!("Panel {} joined with partial state: {}", handle.id(), e);
                }
                tracing::debug!(
                    "Panel {} joined adapter ({} members)",
                    handle.id(),
                    self.members.len() + 1
                );
                self.synced = state;
                self.members.push(handle);
            }
        }
    }

    /// Handle a change reported by the host for one member
    pub fn member_changed(&mut self, handle: HandleId, property: PanelProperty) {
        if !self.alive {
            return;
        }
        let Some(member) = self.members.iter().find(|m| m.id() == handle) else {
            return;
        };

        let state = match member.state() {
            Ok(reported) => {
                let mut state = self.synced;
                match property {
                    PanelProperty::Visible => state.visible = reported.visible,
                    PanelProperty::Dock => state.dock = reported.dock,
                    PanelProperty::Width => state.width = reported.width,
                    PanelProperty::Height => state.height = reported.height,
                }
                state
            }
            Err(e) => {
                tracing::debug!("Ignoring change from unreadable panel {}: {}", handle, e);
                return;
            }
        };

        if same_value(property, &self.synced, &state) {
            tracing::trace!("Echo of {:?} from panel {} suppressed", property, handle);
            return;
        }

        self.synced = state;
        let cross_axis = match property {
            PanelProperty::Width => !state.dock.syncs_width(),
            PanelProperty::Height => !state.dock.syncs_height(),
            _ => false,
        };
        if !cross_axis {
            if let Err(e) = self.write_members(Some(handle), |m| m.apply(property, &state)) {
                tracing::warn!("Failed to propagate {:?} from panel {}: {}", property, handle, e);
            }
        }
        if self.alive {
            self.raise(property);
        }
    }

    /// Whether a member is shown in `window`
    pub fn view_registered(&self, window: WindowId) -> bool {
        self.alive
            && self
                .members
                .iter()
                .any(|m| m.is_live() && m.window().ok() == Some(window))
    }

    /// Forward a re-activation to the member in `window`
    pub fn refresh(&mut self, window: WindowId) {
        if let Some(member) = self
            .members
            .iter_mut()
            .find(|m| m.window().ok() == Some(window))
        {
            member.refresh();
        }
    }

    /// Probe the representative member; dispose if the host destroyed it
    pub fn check_dispose(&mut self) -> bool {
        if !self.alive {
            return true;
        }
        let probe = match self.members.first() {
            Some(representative) => representative.visible(),
            None => Err(PanelError::Destroyed),
        };
        if matches!(probe, Err(ref e) if e.is_stale()) {
            tracing::debug!("Representative panel is gone, disposing adapter");
            self.dispose();
        }
        !self.alive
    }

    /// Remove every member bound to `window`
    ///
    /// Members whose window can no longer be resolved are dropped as well.
    pub fn cleanup_view(&mut self, window: WindowId) {
        if !self.alive {
            return;
        }

        loop {
            let next = self
                .members
                .iter()
                .map(|m| m.window())
                .enumerate()
                .find(|(_, lookup)| lookup.as_ref().map_or(true, |w| *w == window));
            let Some((index, lookup)) = next else {
                break;
            };

            let mut member = self.members.remove(index);
            match lookup {
                Ok(_) => {
                    tracing::debug!("Removing panel {} for closed window {}", member.id(), window);
                    member.dispose();
                }
                Err(e) => {
                    tracing::debug!("Dropping panel {} with unresolved window: {}", member.id(), e);
                }
            }
        }

        if self.members.is_empty() {
            self.alive = false;
        }
    }

    // ========================================================================
    // Hide / restore
    // ========================================================================

    /// Hide on behalf of the registry, remembering to restore later
    pub fn hide_if_visible(&mut self) {
        if !self.alive || !self.visible() {
            return;
        }
        if let Err(e) = self.write_visible(false) {
            tracing::debug!("Auto-hide failed: {}", e);
        }
        self.auto_hidden = true;
    }

    /// Show again if the registry hid this panel
    pub fn restore_if_needed(&mut self) {
        if !self.auto_hidden || !self.alive {
            return;
        }
        match self.write_visible(true) {
            Ok(()) => self.auto_hidden = false,
            Err(e) => tracing::debug!("Restore deferred: {}", e),
        }
    }

    /// Dispose every member
    pub fn dispose(&mut self) {
        if !self.alive && self.members.is_empty() {
            return;
        }
        for mut member in self.members.drain(..) {
            member.dispose();
        }
        self.alive = false;
    }
}

fn same_value(property: PanelProperty, a: &PanelState, b: &PanelState) -> bool {
    match property {
        PanelProperty::Visible => a.visible == b.visible,
        PanelProperty::Dock => a.dock == b.dock,
        PanelProperty::Width => a.width == b.width,
        PanelProperty::Height => a.height == b.height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PanelFactory;
    use crate::sim::SimHost;

    fn handle(host: &mut SimHost, id: u64, window: u64) -> PanelHandle {
        let native = host
            .create(HandleId(id), Box::new(()), "Panel", WindowId(window))
            .unwrap();
        PanelHandle::new(HandleId(id), native)
    }

    /// Deliver queued host notifications to the adapter
    fn pump(host: &SimHost, adapter: &mut PanelAdapter) {
        loop {
            let next = host.next_notification();
            let Some((id, property)) = next else {
                break;
            };
            adapter.member_changed(id, property);
        }
    }

    /// Visible adapter with members in windows 1 and 2
    fn two_window_adapter(host: &mut SimHost) -> PanelAdapter {
        let mut adapter = PanelAdapter::new(handle(host, 1, 1), None);
        adapter.set_visible(true);
        adapter.add(handle(host, 2, 2));
        pump(host, &mut adapter);
        adapter.take_changes();
        adapter
    }

    #[test]
    fn test_add_inherits_layout() {
        let mut host = SimHost::new();
        let mut adapter = PanelAdapter::new(handle(&mut host, 1, 1), None);
        adapter.set_visible(true);
        adapter.set_dock_position(DockPosition::Right);
        adapter.set_width(300);
        adapter.set_height(500);
        pump(&host, &mut adapter);

        adapter.add(handle(&mut host, 2, 2));

        let second = host.panel(HandleId(2)).unwrap();
        assert!(second.visible);
        assert_eq!(second.dock, DockPosition::Right);
        assert_eq!(second.width, 300);
        // Right-docked panels span the window height, so height is not copied
        assert_eq!(second.height, PanelState::default().height);
        assert_eq!(adapter.len(), 2);
    }

    #[test]
    fn test_add_bottom_dock_copies_height_only() {
        let mut host = SimHost::new();
        let mut adapter = PanelAdapter::new(handle(&mut host, 1, 1), None);
        adapter.set_dock_position(DockPosition::Bottom);
        adapter.set_width(900);
        adapter.set_height(120);

        adapter.add(handle(&mut host, 2, 2));

        let second = host.panel(HandleId(2)).unwrap();
        assert_eq!(second.dock, DockPosition::Bottom);
        assert_eq!(second.height, 120);
        assert_eq!(second.width, PanelState::default().width);
    }

    #[test]
    fn test_user_change_propagates_once() {
        let mut host = SimHost::new();
        let mut adapter = two_window_adapter(&mut host);

        host.user_set_visible(HandleId(1), false);
        pump(&host, &mut adapter);

        assert!(!host.panel(HandleId(2)).unwrap().visible);
        let changes = adapter.take_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].property, PanelProperty::Visible);
        assert!(!changes[0].state.visible);
    }

    #[test]
    fn test_dock_change_propagates_from_any_member() {
        let mut host = SimHost::new();
        let mut adapter = two_window_adapter(&mut host);

        host.user_set_dock(HandleId(2), DockPosition::Left);
        pump(&host, &mut adapter);

        assert_eq!(host.panel(HandleId(1)).unwrap().dock, DockPosition::Left);
        assert_eq!(adapter.dock_position(), DockPosition::Left);
        assert_eq!(adapter.take_changes().len(), 1);
    }

    #[test]
    fn test_cross_axis_resize_is_not_propagated() {
        let mut host = SimHost::new();
        let mut adapter = two_window_adapter(&mut host);

        // Right dock: height follows the window, not the sibling
        host.user_set_height(HandleId(1), 640);
        pump(&host, &mut adapter);
        assert_eq!(host.panel(HandleId(2)).unwrap().height, PanelState::default().height);

        host.user_set_width(HandleId(1), 410);
        pump(&host, &mut adapter);
        assert_eq!(host.panel(HandleId(2)).unwrap().width, 410);
    }

    #[test]
    fn test_unchanged_write_raises_nothing() {
        let mut host = SimHost::new();
        let mut adapter = two_window_adapter(&mut host);

        host.user_set_visible(HandleId(1), true);
        pump(&host, &mut adapter);
        adapter.set_visible(true);
        pump(&host, &mut adapter);

        assert!(adapter.take_changes().is_empty());
        assert_eq!(host.pending_notifications(), 0);
    }

    #[test]
    fn test_view_registered() {
        let mut host = SimHost::new();
        let adapter = two_window_adapter(&mut host);

        assert!(adapter.view_registered(WindowId(1)));
        assert!(adapter.view_registered(WindowId(2)));
        assert!(!adapter.view_registered(WindowId(3)));
        assert_eq!(adapter.handle_in(WindowId(2)), Some(HandleId(2)));
    }

    #[test]
    fn test_hide_then_restore() {
        let mut host = SimHost::new();
        let mut adapter = two_window_adapter(&mut host);

        adapter.hide_if_visible();
        assert!(adapter.is_auto_hidden());
        assert!(!host.panel(HandleId(1)).unwrap().visible);
        assert!(!host.panel(HandleId(2)).unwrap().visible);

        // Second hide is a no-op
        adapter.hide_if_visible();
        assert!(adapter.is_auto_hidden());
        assert!(!adapter.visible());

        adapter.restore_if_needed();
        assert!(!adapter.is_auto_hidden());
        assert!(adapter.visible());

        adapter.restore_if_needed();
        assert!(adapter.visible());

        let changes = adapter.take_changes();
        assert_eq!(changes.len(), 2, "one hide and one restore: {:?}", changes);
    }

    #[test]
    fn test_restore_requires_auto_hide() {
        let mut host = SimHost::new();
        let mut adapter = two_window_adapter(&mut host);

        // Hidden by the user, not the registry
        host.user_set_visible(HandleId(1), false);
        pump(&host, &mut adapter);

        adapter.hide_if_visible();
        assert!(!adapter.is_auto_hidden());

        adapter.restore_if_needed();
        assert!(!adapter.visible());
    }

    #[test]
    fn test_failed_restore_is_retried() {
        let mut host = SimHost::new();
        let mut adapter = PanelAdapter::new(handle(&mut host, 1, 1), None);
        adapter.set_visible(true);
        adapter.hide_if_visible();

        host.set_window_busy(WindowId(1), true);
        adapter.restore_if_needed();
        assert!(adapter.is_auto_hidden());
        assert!(!adapter.is_disposed());
        assert!(!adapter.visible());

        host.set_window_busy(WindowId(1), false);
        adapter.restore_if_needed();
        assert!(!adapter.is_auto_hidden());
        assert!(adapter.visible());
    }

    #[test]
    fn test_failed_hide_still_marks_auto_hidden() {
        let mut host = SimHost::new();
        let mut adapter = PanelAdapter::new(handle(&mut host, 1, 1), None);
        adapter.set_visible(true);

        host.set_window_busy(WindowId(1), true);
        adapter.hide_if_visible();

        assert!(adapter.is_auto_hidden());
        assert!(host.panel(HandleId(1)).unwrap().visible);
        assert!(adapter.state().visible);
    }

    #[test]
    fn test_user_hide_after_failed_auto_hide_raises_event() {
        let mut host = SimHost::new();
        let mut adapter = PanelAdapter::new(handle(&mut host, 1, 1), None);
        adapter.set_visible(true);
        pump(&host, &mut adapter);
        host.set_window_busy(WindowId(1), true);
        adapter.hide_if_visible();
        host.set_window_busy(WindowId(1), false);
        adapter.take_changes();

        host.user_set_visible(HandleId(1), false);
        pump(&host, &mut adapter);

        let changes = adapter.take_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].property, PanelProperty::Visible);
        assert!(!changes[0].state.visible);
    }

    #[test]
    fn test_refused_write_keeps_members_aligned() {
        let mut host = SimHost::new();
        let mut adapter = two_window_adapter(&mut host);

        host.set_window_busy(WindowId(1), true);
        adapter.set_visible(false);
        pump(&host, &mut adapter);

        assert!(host.panel(HandleId(1)).unwrap().visible);
        assert!(host.panel(HandleId(2)).unwrap().visible);
        assert!(adapter.state().visible);
        assert!(!adapter.is_disposed());
        assert!(adapter.take_changes().is_empty());

        // The next user change is not mistaken for an echo
        host.set_window_busy(WindowId(1), false);
        host.user_set_visible(HandleId(2), false);
        pump(&host, &mut adapter);
        assert_eq!(adapter.take_changes().len(), 1);
        assert!(!host.panel(HandleId(1)).unwrap().visible);
    }

    #[test]
    fn test_check_dispose_detects_destroyed_representative() {
        let mut host = SimHost::new();
        let mut adapter = two_window_adapter(&mut host);
        assert!(!adapter.check_dispose());

        host.destroy_panel(HandleId(1));

        assert!(adapter.check_dispose());
        assert!(adapter.is_disposed());
        assert!(host.panel(HandleId(2)).unwrap().disposed);
    }

    #[test]
    fn test_stale_write_disposes_adapter() {
        let mut host = SimHost::new();
        let mut adapter = two_window_adapter(&mut host);

        host.destroy_panel(HandleId(2));
        adapter.set_dock_position(DockPosition::Left);

        assert!(adapter.is_disposed());
        assert!(host.panel(HandleId(1)).unwrap().disposed);
    }

    #[test]
    fn test_cleanup_view_removes_only_that_window() {
        let mut host = SimHost::new();
        let mut adapter = two_window_adapter(&mut host);

        adapter.cleanup_view(WindowId(1));

        assert_eq!(adapter.handles(), vec![HandleId(2)]);
        assert!(host.panel(HandleId(1)).unwrap().disposed);
        assert!(!adapter.is_disposed());
        assert!(adapter.visible());

        adapter.cleanup_view(WindowId(2));
        assert!(adapter.is_disposed());
        assert!(adapter.is_empty());
    }

    #[test]
    fn test_cleanup_view_drops_unresolvable_members() {
        let mut host = SimHost::new();
        let mut adapter = two_window_adapter(&mut host);

        host.lose_window(WindowId(2));
        adapter.cleanup_view(WindowId(3));

        assert_eq!(adapter.handles(), vec![HandleId(1)]);
        // Dropped, not disposed: the window is already gone
        assert!(!host.panel(HandleId(2)).unwrap().disposed);
    }

    #[test]
    fn test_operations_after_dispose_are_noops() {
        let mut host = SimHost::new();
        let mut adapter = two_window_adapter(&mut host);
        adapter.dispose();
        adapter.dispose();

        adapter.set_visible(false);
        adapter.set_width(10);
        adapter.hide_if_visible();
        adapter.restore_if_needed();
        adapter.cleanup_view(WindowId(1));
        adapter.member_changed(HandleId(1), PanelProperty::Visible);
        adapter.add(handle(&mut host, 3, 3));

        assert!(adapter.is_disposed());
        assert!(adapter.check_dispose());
        assert!(!adapter.visible());
        assert!(!adapter.view_registered(WindowId(1)));
        assert_eq!(adapter.title(), "");
        assert!(adapter.take_changes().is_empty());
        assert!(host.panel(HandleId(3)).unwrap().disposed);
    }

    #[test]
    fn test_dispose_tolerates_host_destroyed_members() {
        let mut host = SimHost::new();
        let mut adapter = two_window_adapter(&mut host);

        host.destroy_window(WindowId(2));
        adapter.dispose();

        assert!(adapter.is_disposed());
        assert!(host.panel(HandleId(1)).unwrap().disposed);
        assert!(!host.panel(HandleId(2)).unwrap().disposed);
    }
}
