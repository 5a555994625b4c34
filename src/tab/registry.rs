//! Ordered tab collection and the current-tab pointer.
//!
//! The registry is the single writer of tab state. Every change to the order,
//! the current pointer or a tab's merged state is pushed out as a
//! [`Notification`].

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::error::{Error, Result};
use crate::identifiers::TabId;
use crate::protocol::{Notification, TabsSnapshot};
use crate::surface::{RenderSurface, SurfaceConfig, SurfaceFactory};

use super::patch::{HistoryFlags, TabPatch};
use super::state::TabState;

// ============================================================================
// Types
// ============================================================================

struct TabEntry {
    state: TabState,
    surface: Box<dyn RenderSurface>,
}

impl TabEntry {
    fn history(&self) -> HistoryFlags {
        HistoryFlags {
            can_go_back: self.surface.can_go_back(),
            can_go_forward: self.surface.can_go_forward(),
        }
    }
}

/// Outcome of [`TabRegistry::close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedTab {
    /// Tab that is current after the close, if any tab remains.
    pub current: Option<TabId>,
    /// Whether the closed tab was the current one.
    pub was_current: bool,
}

impl ClosedTab {
    /// Returns `true` when the registry has no tabs left.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

// ============================================================================
// TabRegistry
// ============================================================================

/// Owns every tab of a session.
pub struct TabRegistry {
    order: Vec<TabId>,
    tabs: FxHashMap<TabId, TabEntry>,
    current: Option<TabId>,
    next_id: Option<TabId>,
    factory: Box<dyn SurfaceFactory>,
    notifications: mpsc::UnboundedSender<Notification>,
    blank_title: String,
}

impl fmt::Debug for TabRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabRegistry")
            .field("order", &self.order)
            .field("current", &self.current)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TabRegistry - Constructor
// ============================================================================

impl TabRegistry {
    /// Creates an empty registry.
    ///
    /// New tabs start with `blank_title` and get their surface from `factory`.
    pub fn new(
        factory: Box<dyn SurfaceFactory>,
        blank_title: impl Into<String>,
        notifications: mpsc::UnboundedSender<Notification>,
    ) -> Self {
        Self {
            order: Vec::new(),
            tabs: FxHashMap::default(),
            current: None,
            next_id: Some(TabId::first()),
            factory,
            notifications,
            blank_title: blank_title.into(),
        }
    }
}

// ============================================================================
// TabRegistry - Mutations
// ============================================================================

impl TabRegistry {
    /// Allocates a tab and makes it current.
    ///
    /// The tab is placed right after `after` when that tab is live, otherwise
    /// at the end.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabsExhausted`] once every id has been handed out.
    pub fn open(&mut self, after: Option<TabId>, config: Option<&SurfaceConfig>) -> Result<TabId> {
        let Some(id) = self.next_id else {
            error!(open_tabs = self.order.len(), "Tab ids exhausted, refusing to open tab");
            return Err(Error::TabsExhausted);
        };
        self.next_id = id.successor();

        let surface = self.factory.create(id, config);
        self.tabs.insert(
            id,
            TabEntry {
                state: TabState::blank(self.blank_title.clone()),
                surface,
            },
        );

        let position = after
            .and_then(|sibling| self.position(sibling))
            .map_or(self.order.len(), |i| i + 1);
        self.order.insert(position, id);
        self.current = Some(id);

        debug!(tab_id = %id, position, "Tab opened");
        self.notify(Notification::ActiveTabChanged { id });
        self.notify_tabs();
        Ok(id)
    }

    /// Removes a tab and destroys its surface.
    ///
    /// Closing the current tab selects the one that followed it, wrapping to
    /// the first tab.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if `id` is not live.
    pub fn close(&mut self, id: TabId) -> Result<ClosedTab> {
        let index = self.position(id).ok_or_else(|| Error::tab_not_found(id))?;
        self.order.remove(index);

        if let Some(mut entry) = self.tabs.remove(&id) {
            entry.surface.destroy();
        }

        let was_current = self.current == Some(id);
        if was_current {
            self.current = if self.order.is_empty() {
                None
            } else {
                Some(self.order[index % self.order.len()])
            };
        }

        debug!(tab_id = %id, was_current, remaining = self.order.len(), "Tab closed");

        if was_current && let Some(next) = self.current {
            self.notify(Notification::ActiveTabChanged { id: next });
        }
        self.notify_tabs();

        Ok(ClosedTab {
            current: self.current,
            was_current,
        })
    }

    /// Makes `id` the current tab and focuses its surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if `id` is not live.
    pub fn switch(&mut self, id: TabId) -> Result<()> {
        let entry = self.tabs.get_mut(&id).ok_or_else(|| Error::tab_not_found(id))?;
        entry.surface.focus();

        self.current = Some(id);
        debug!(tab_id = %id, "Tab switched");
        self.notify(Notification::ActiveTabChanged { id });
        Ok(())
    }

    /// Merges `patch` into the tab's state and publishes the result.
    ///
    /// Back/forward capability is re-read from the surface on every call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if `id` is not live.
    pub fn update(&mut self, id: TabId, patch: TabPatch) -> Result<()> {
        let entry = self.tabs.get_mut(&id).ok_or_else(|| Error::tab_not_found(id))?;
        let history = entry.history();
        patch.apply(&mut entry.state, history);
        self.notify_tabs();
        Ok(())
    }

    /// Destroys every surface and empties the registry.
    pub fn destroy_all(&mut self) {
        for (id, mut entry) in self.tabs.drain() {
            entry.surface.destroy();
            debug!(tab_id = %id, "Surface destroyed on shutdown");
        }
        self.order.clear();
        self.current = None;
    }
}

// ============================================================================
// TabRegistry - Accessors
// ============================================================================

impl TabRegistry {
    /// Returns the current tab id.
    #[inline]
    #[must_use]
    pub fn current_id(&self) -> Option<TabId> {
        self.current
    }

    /// Returns the current tab's state.
    #[must_use]
    pub fn current(&self) -> Option<&TabState> {
        self.current.and_then(|id| self.get(id))
    }

    /// Returns a tab's state.
    #[must_use]
    pub fn get(&self, id: TabId) -> Option<&TabState> {
        self.tabs.get(&id).map(|entry| &entry.state)
    }

    /// Returns `true` if `id` is live.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: TabId) -> bool {
        self.tabs.contains_key(&id)
    }

    /// Tab ids in display order.
    #[inline]
    #[must_use]
    pub fn order(&self) -> &[TabId] {
        &self.order
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns a tab's surface.
    #[must_use]
    pub fn surface(&self, id: TabId) -> Option<&dyn RenderSurface> {
        self.tabs.get(&id).map(|entry| entry.surface.as_ref())
    }

    /// Returns a tab's surface for issuing commands.
    #[must_use]
    pub fn surface_mut(&mut self, id: TabId) -> Option<&mut dyn RenderSurface> {
        self.tabs
            .get_mut(&id)
            .map(|entry| &mut *entry.surface as &mut dyn RenderSurface)
    }

    /// Captures order and states.
    #[must_use]
    pub fn snapshot(&self) -> TabsSnapshot {
        let states: BTreeMap<TabId, TabState> = self
            .tabs
            .iter()
            .map(|(id, entry)| (*id, entry.state.clone()))
            .collect();

        TabsSnapshot {
            tabs: self.order.clone(),
            states,
        }
    }

    fn position(&self, id: TabId) -> Option<usize> {
        self.order.iter().position(|candidate| *candidate == id)
    }
}

// ============================================================================
// TabRegistry - Notifications
// ============================================================================

impl TabRegistry {
    /// Pushes a notification, logging if the receiver is gone.
    pub(crate) fn notify(&self, notification: Notification) {
        let name = notification.name();
        if self.notifications.send(notification).is_err() {
            warn!(notification = name, "Notification receiver dropped");
        }
    }

    fn notify_tabs(&self) {
        self.notify(Notification::TabsChanged(self.snapshot()));
    }
}

// ============================================================================
// Tests
// ============================================================================
