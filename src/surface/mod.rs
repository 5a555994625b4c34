//! Rendering surface collaborator.
//!
//! The engine that actually paints pages is outside this crate. Each tab owns
//! one [`RenderSurface`], created by the host's [`SurfaceFactory`].
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RenderSurface`] | Per-tab handle to the rendering engine |
//! | [`SurfaceFactory`] | Creates a surface for a newly opened tab |
//! | [`SurfaceConfig`] | Per-tab engine preferences |
//! | [`HeadlessSurface`] | In-memory surface with back/forward history |

// ============================================================================
// Submodules
// ============================================================================

/// In-memory surface implementation.
pub mod headless;

// ============================================================================
// Re-exports
// ============================================================================

pub use headless::{HeadlessSurface, HeadlessSurfaceFactory};

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::identifiers::TabId;

// ============================================================================
// SurfaceConfig
// ============================================================================

/// Engine preferences for one tab's surface.
///
/// Unknown keys are passed through untouched to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceConfig {
    /// Run page content sandboxed (needed for `window.opener` support).
    #[serde(default = "default_sandbox")]
    pub sandbox: bool,

    /// Remaining engine-specific preferences.
    #[serde(flatten)]
    pub preferences: Map<String, Value>,
}

fn default_sandbox() -> bool {
    true
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            sandbox: true,
            preferences: Map::new(),
        }
    }
}

// ============================================================================
// RenderSurface
// ============================================================================

/// Handle to the rendering engine for a single tab.
///
/// All calls are commands; none of them block on the engine.
pub trait RenderSurface: Send {
    /// Starts loading `url`.
    fn load_url(&mut self, url: &str);

    /// Aborts the in-flight load.
    fn stop(&mut self);

    /// Reloads the current page.
    fn reload(&mut self);

    /// Navigates back in history.
    fn go_back(&mut self);

    /// Navigates forward in history.
    fn go_forward(&mut self);

    /// Gives keyboard focus to the page.
    fn focus(&mut self);

    /// Opens developer tools for the page.
    fn open_devtools(&mut self);

    /// Releases the surface. No further calls follow.
    fn destroy(&mut self);

    /// URL of the page currently committed in the surface.
    fn current_url(&self) -> String;

    /// Whether history has an entry behind the current one.
    fn can_go_back(&self) -> bool;

    /// Whether history has an entry ahead of the current one.
    fn can_go_forward(&self) -> bool;
}

// ============================================================================
// SurfaceFactory
// ============================================================================

/// Creates rendering surfaces for new tabs.
pub trait SurfaceFactory: Send {
    /// Creates the surface for `tab_id`.
    ///
    /// `config` is `None` when the tab uses the window's default preferences.
    fn create(&mut self, tab_id: TabId, config: Option<&SurfaceConfig>) -> Box<dyn RenderSurface>;
}
