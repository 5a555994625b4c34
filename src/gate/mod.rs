//! Per-tab navigation gate.
//!
//! Each tab runs a small state machine:
//!
//! ```text
//! Idle ──verify──▶ AwaitingVerification ──result──▶ Routing ──▶ Loaded | Blocked
//!   └────────────────────bypass───────────────────────▲
//! ```
//!
//! A new navigation from any state restarts the cycle and bumps the tab's
//! [`Generation`]. Completions carry the generation they were started with;
//! [`NavigationGate::accept`] refuses anything older.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`NavigationGate`] | Gate states and generations for every tab |
//! | [`NavigationIntent`] | Requested navigation |
//! | [`route`] | Verdict to destination mapping |
//! | [`LocalActionToken`] | In-page trust/ignore/home control |

// ============================================================================
// Submodules
// ============================================================================

/// In-page control tokens.
pub mod local_action;

/// Verdict routing.
pub mod router;

// ============================================================================
// Re-exports
// ============================================================================

pub use local_action::{LocalAction, LocalActionToken};
pub use router::{BlockedSurface, Destination, RouteRequest, route};

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::trace;

use crate::identifiers::{Generation, TabId};

// ============================================================================
// GateState
// ============================================================================

/// Position of one tab in the navigation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GateState {
    #[default]
    Idle,
    AwaitingVerification,
    Routing,
    Loaded,
    Blocked,
}

// ============================================================================
// NavigationIntent
// ============================================================================

/// A requested navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub tab_id: TabId,
    pub url: String,
    /// Skip the oracle and load as `Unverified`.
    pub bypass_verification: bool,
}

impl NavigationIntent {
    /// Navigation that goes through the oracle.
    #[inline]
    #[must_use]
    pub fn verified(tab_id: TabId, url: impl Into<String>) -> Self {
        Self {
            tab_id,
            url: url.into(),
            bypass_verification: false,
        }
    }

    /// Trusted navigation that skips the oracle.
    #[inline]
    #[must_use]
    pub fn bypassed(tab_id: TabId, url: impl Into<String>) -> Self {
        Self {
            tab_id,
            url: url.into(),
            bypass_verification: true,
        }
    }

    /// Returns `true` for the empty page.
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        let url = self.url.trim();
        url.is_empty() || url == "about:blank"
    }
}

// ============================================================================
// NavigationGate
// ============================================================================

#[derive(Debug, Default)]
struct GateEntry {
    state: GateState,
    generation: Generation,
}

/// Gate states and generations of every live tab.
#[derive(Debug, Default)]
pub struct NavigationGate {
    entries: FxHashMap<TabId, GateEntry>,
}

impl NavigationGate {
    /// Creates an empty gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking a tab in `Idle`.
    pub fn register(&mut self, tab_id: TabId) {
        self.entries.entry(tab_id).or_default();
    }

    /// Starts a navigation cycle and returns its generation.
    ///
    /// Any completion issued for an earlier generation becomes stale.
    pub fn begin(&mut self, intent: &NavigationIntent) -> Generation {
        let entry = self.entries.entry(intent.tab_id).or_default();
        entry.generation = entry.generation.next();
        entry.state = if intent.bypass_verification {
            GateState::Routing
        } else {
            GateState::AwaitingVerification
        };
        trace!(tab_id = %intent.tab_id, generation = %entry.generation, state = ?entry.state, "Gate begin");
        entry.generation
    }

    /// Parks a tab in `Idle`, staling any in-flight verification.
    pub fn reset(&mut self, tab_id: TabId) {
        let entry = self.entries.entry(tab_id).or_default();
        entry.generation = entry.generation.next();
        entry.state = GateState::Idle;
    }

    /// Accepts a verification completion.
    ///
    /// Returns `false` (and changes nothing) when the tab is gone, the
    /// generation is stale, or the tab is not awaiting verification.
    pub fn accept(&mut self, tab_id: TabId, generation: Generation) -> bool {
        match self.entries.get_mut(&tab_id) {
            Some(entry)
                if entry.generation == generation
                    && entry.state == GateState::AwaitingVerification =>
            {
                entry.state = GateState::Routing;
                true
            }
            _ => false,
        }
    }

    /// Finishes routing for the current generation.
    pub fn resolve(&mut self, tab_id: TabId, generation: Generation, blocked: bool) {
        if let Some(entry) = self.entries.get_mut(&tab_id)
            && entry.generation == generation
            && entry.state == GateState::Routing
        {
            entry.state = if blocked {
                GateState::Blocked
            } else {
                GateState::Loaded
            };
        }
    }

    /// Stops tracking a tab. Late completions for it are dropped.
    pub fn invalidate(&mut self, tab_id: TabId) {
        self.entries.remove(&tab_id);
    }

    /// Stops tracking every tab.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    /// Current state of a tab. Unknown tabs read as `Idle`.
    #[must_use]
    pub fn state(&self, tab_id: TabId) -> GateState {
        self.entries
            .get(&tab_id)
            .map_or(GateState::Idle, |entry| entry.state)
    }

    /// Current generation of a tab.
    #[must_use]
    pub fn generation(&self, tab_id: TabId) -> Option<Generation> {
        self.entries.get(&tab_id).map(|entry| entry.generation)
    }

    /// Returns `true` if `generation` is the tab's latest.
    #[must_use]
    pub fn is_current(&self, tab_id: TabId, generation: Generation) -> bool {
        self.generation(tab_id) == Some(generation)
    }
}
