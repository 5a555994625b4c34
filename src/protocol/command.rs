//! Inbound control-panel commands.
//!
//! # Format
//!
//! ```json
//! { "method": "urlEntered", "params": { "url": "https://example.com" } }
//! ```
//!
//! | Method | Params |
//! |--------|--------|
//! | `ready` | none |
//! | `urlChanged` | `url` |
//! | `urlEntered` | `url` |
//! | `act` | `action` |
//! | `openTab` | `url`, `surfaceConfig` |
//! | `switchTab` | `id` |
//! | `closeTab` | `id` |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::identifiers::TabId;
use crate::surface::SurfaceConfig;

// ============================================================================
// ControlCommand
// ============================================================================

/// Command sent by the control panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "camelCase")]
pub enum ControlCommand {
    /// Control panel finished loading; open the start page.
    Ready,

    /// Address bar text edited without submitting.
    UrlChanged {
        /// Current address bar text.
        url: String,
    },

    /// Address bar submitted.
    UrlEntered {
        /// Submitted URL.
        url: String,
    },

    /// Toolbar button pressed.
    Act {
        /// Action name, see [`SurfaceAction`].
        action: String,
    },

    /// New tab requested.
    #[serde(rename_all = "camelCase")]
    OpenTab {
        /// URL to open; empty opens the blank page.
        #[serde(default)]
        url: String,
        /// Per-tab engine preferences.
        #[serde(default)]
        surface_config: Option<SurfaceConfig>,
    },

    /// Tab strip selection.
    SwitchTab {
        /// Tab to show.
        id: TabId,
    },

    /// Tab close button.
    CloseTab {
        /// Tab to close.
        id: TabId,
    },
}

impl ControlCommand {
    /// Returns the wire name of the command.
    #[inline]
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::UrlChanged { .. } => "urlChanged",
            Self::UrlEntered { .. } => "urlEntered",
            Self::Act { .. } => "act",
            Self::OpenTab { .. } => "openTab",
            Self::SwitchTab { .. } => "switchTab",
            Self::CloseTab { .. } => "closeTab",
        }
    }
}

// ============================================================================
// SurfaceAction
// ============================================================================

/// Surface commands the toolbar may trigger through `act`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurfaceAction {
    GoBack,
    GoForward,
    Reload,
    Stop,
}

impl SurfaceAction {
    /// Returns the wire name.
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::GoBack => "goBack",
            Self::GoForward => "goForward",
            Self::Reload => "reload",
            Self::Stop => "stop",
        }
    }
}

impl FromStr for SurfaceAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goBack" => Ok(Self::GoBack),
            "goForward" => Ok(Self::GoForward),
            "reload" => Ok(Self::Reload),
            "stop" => Ok(Self::Stop),
            other => Err(Error::unknown_action(other)),
        }
    }
}

impl fmt::Display for SurfaceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Tests
// ============================================================================
