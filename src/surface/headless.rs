//! In-memory rendering surface.
//!
//! [`HeadlessSurface`] records every command it receives and keeps a simple
//! back/forward history, so the session can run without a real engine.
//! Handles are cheap clones over shared state: the factory keeps one per tab
//! for inspection while the registry owns the boxed surface.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::identifiers::TabId;

use super::{RenderSurface, SurfaceConfig, SurfaceFactory};

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Default)]
struct HeadlessState {
    history: Vec<String>,
    index: Option<usize>,
    loads: Vec<String>,
    stops: usize,
    reloads: usize,
    focused: bool,
    devtools_opened: bool,
    destroyed: bool,
    config: Option<SurfaceConfig>,
}

// ============================================================================
// HeadlessSurface
// ============================================================================

/// Recording surface with back/forward history.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    tab_id: TabId,
    state: Arc<Mutex<HeadlessState>>,
}

impl HeadlessSurface {
    /// Creates an empty surface for `tab_id`.
    #[must_use]
    pub fn new(tab_id: TabId, config: Option<SurfaceConfig>) -> Self {
        Self {
            tab_id,
            state: Arc::new(Mutex::new(HeadlessState {
                config,
                ..HeadlessState::default()
            })),
        }
    }

    /// Returns the tab this surface belongs to.
    #[inline]
    #[must_use]
    pub fn tab_id(&self) -> TabId {
        self.tab_id
    }

    /// Every URL passed to `load_url`, oldest first.
    #[must_use]
    pub fn loads(&self) -> Vec<String> {
        self.state.lock().loads.clone()
    }

    /// The most recent URL passed to `load_url`.
    #[must_use]
    pub fn last_load(&self) -> Option<String> {
        self.state.lock().loads.last().cloned()
    }

    /// Number of `stop` calls.
    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.state.lock().stops
    }

    /// Number of `reload` calls.
    #[must_use]
    pub fn reload_count(&self) -> usize {
        self.state.lock().reloads
    }

    /// Whether the surface has been focused.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.state.lock().focused
    }

    /// Whether developer tools were opened.
    #[must_use]
    pub fn devtools_opened(&self) -> bool {
        self.state.lock().devtools_opened
    }

    /// Whether the surface has been destroyed.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.state.lock().destroyed
    }

    /// Preferences the surface was created with.
    #[must_use]
    pub fn config(&self) -> Option<SurfaceConfig> {
        self.state.lock().config.clone()
    }
}

impl RenderSurface for HeadlessSurface {
    fn load_url(&mut self, url: &str) {
        let mut state = self.state.lock();
        let keep = state.index.map_or(0, |i| i + 1);
        state.history.truncate(keep);
        state.history.push(url.to_string());
        state.index = Some(state.history.len() - 1);
        state.loads.push(url.to_string());
        trace!(tab_id = %self.tab_id, url = %url, "Headless load");
    }

    fn stop(&mut self) {
        self.state.lock().stops += 1;
    }

    fn reload(&mut self) {
        self.state.lock().reloads += 1;
    }

    fn go_back(&mut self) {
        let mut state = self.state.lock();
        if let Some(i) = state.index
            && i > 0
        {
            state.index = Some(i - 1);
        }
    }

    fn go_forward(&mut self) {
        let mut state = self.state.lock();
        if let Some(i) = state.index
            && i + 1 < state.history.len()
        {
            state.index = Some(i + 1);
        }
    }

    fn focus(&mut self) {
        self.state.lock().focused = true;
    }

    fn open_devtools(&mut self) {
        self.state.lock().devtools_opened = true;
    }

    fn destroy(&mut self) {
        self.state.lock().destroyed = true;
        trace!(tab_id = %self.tab_id, "Headless surface destroyed");
    }

    fn current_url(&self) -> String {
        let state = self.state.lock();
        state
            .index
            .and_then(|i| state.history.get(i).cloned())
            .unwrap_or_default()
    }

    fn can_go_back(&self) -> bool {
        self.state.lock().index.is_some_and(|i| i > 0)
    }

    fn can_go_forward(&self) -> bool {
        let state = self.state.lock();
        state.index.is_some_and(|i| i + 1 < state.history.len())
    }
}

// ============================================================================
// HeadlessSurfaceFactory
// ============================================================================

/// Factory producing [`HeadlessSurface`]s and remembering them by tab.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurfaceFactory {
    surfaces: Arc<Mutex<FxHashMap<TabId, HeadlessSurface>>>,
}

impl HeadlessSurfaceFactory {
    /// Creates an empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the surface created for `tab_id`, including destroyed ones.
    #[must_use]
    pub fn surface(&self, tab_id: TabId) -> Option<HeadlessSurface> {
        self.surfaces.lock().get(&tab_id).cloned()
    }

    /// Number of surfaces created so far.
    #[must_use]
    pub fn created(&self) -> usize {
        self.surfaces.lock().len()
    }
}

impl SurfaceFactory for HeadlessSurfaceFactory {
    fn create(&mut self, tab_id: TabId, config: Option<&SurfaceConfig>) -> Box<dyn RenderSurface> {
        let surface = HeadlessSurface::new(tab_id, config.cloned());
        self.surfaces.lock().insert(tab_id, surface.clone());
        Box::new(surface)
    }
}

// ============================================================================
// Tests
// ============================================================================
