//! Page events raised by a tab's rendering surface.
//!
//! Every event is answered with a [`PageEventOutcome`] telling the host
//! whether to let the engine's default behavior proceed.
//!
//! # Event Types
//!
//! | Group | Events |
//! |-------|--------|
//! | Loading | `did-start-loading`, `did-stop-loading`, `dom-ready` |
//! | Page metadata | `page-title-updated`, `page-favicon-updated`, `update-target-url` |
//! | Navigation | `will-navigate`, `will-redirect`, `new-window` |
//! | Input | `context-menu` |

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::menu::{ContextMenuParams, MenuItem};

// ============================================================================
// WindowDisposition
// ============================================================================

/// Where the page asked a new window to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WindowDisposition {
    #[default]
    Default,
    ForegroundTab,
    BackgroundTab,
    NewWindow,
    #[serde(other)]
    Other,
}

// ============================================================================
// PageEvent
// ============================================================================

/// Event from one tab's rendering surface.
///
/// # Format
///
/// ```json
/// { "event": "will-navigate", "params": { "url": "https://example.com" } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "params", rename_all = "kebab-case")]
pub enum PageEvent {
    DidStartLoading,
    DidStopLoading,
    PageTitleUpdated {
        title: String,
    },
    /// Hovered or focused link changed. Empty means none.
    UpdateTargetUrl {
        url: String,
    },
    PageFaviconUpdated {
        favicons: Vec<String>,
    },
    DomReady,
    /// The page is about to navigate on its own.
    WillNavigate {
        url: String,
    },
    /// The server redirected the current load.
    WillRedirect {
        url: String,
    },
    /// The page asked for a new window or tab.
    NewWindow {
        url: String,
        #[serde(default)]
        disposition: WindowDisposition,
    },
    ContextMenu(ContextMenuParams),
}

impl PageEvent {
    /// Returns the wire name of the event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DidStartLoading => "did-start-loading",
            Self::DidStopLoading => "did-stop-loading",
            Self::PageTitleUpdated { .. } => "page-title-updated",
            Self::UpdateTargetUrl { .. } => "update-target-url",
            Self::PageFaviconUpdated { .. } => "page-favicon-updated",
            Self::DomReady => "dom-ready",
            Self::WillNavigate { .. } => "will-navigate",
            Self::WillRedirect { .. } => "will-redirect",
            Self::NewWindow { .. } => "new-window",
            Self::ContextMenu(_) => "context-menu",
        }
    }
}

// ============================================================================
// PageEventOutcome
// ============================================================================

/// Answer to a [`PageEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum PageEventOutcome {
    /// Let the engine proceed normally.
    Continue,
    /// Cancel the engine's default behavior.
    PreventDefault,
    /// Show these entries at the pointer position.
    ShowContextMenu {
        items: Vec<MenuItem>,
        x: i32,
        y: i32,
    },
    /// Open `url` in a separate host window.
    OpenInHostWindow {
        url: String,
    },
}

impl PageEventOutcome {
    /// Returns `true` if the engine's default behavior must not run.
    #[inline]
    #[must_use]
    pub fn prevents_default(&self) -> bool {
        !matches!(self, Self::Continue)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_parse_will_navigate() {
        let event: PageEvent = serde_json::from_value(json!({
            "event": "will-navigate",
            "params": { "url": "https://a.example/" }
        }))
        .expect("parse");

        assert_eq!(
            event,
            PageEvent::WillNavigate {
                url: "https://a.example/".to_string()
            }
        );
        assert_eq!(event.name(), "will-navigate");
    }

    #[test]
    fn test_parse_unit_event() {
        let event: PageEvent =
            serde_json::from_value(json!({ "event": "dom-ready" })).expect("parse");
        assert_eq!(event, PageEvent::DomReady);
    }

    #[test]
    fn test_new_window_disposition() {
        let event: PageEvent = serde_json::from_value(json!({
            "event": "new-window",
            "params": { "url": "https://a.example/", "disposition": "foreground-tab" }
        }))
        .expect("parse");

        assert!(matches!(
            event,
            PageEvent::NewWindow { disposition: WindowDisposition::ForegroundTab, .. }
        ));
    }

    #[test]
    fn test_unknown_disposition_is_other() {
        let disposition: WindowDisposition =
            serde_json::from_value(json!("save-to-disk")).expect("parse");
        assert_eq!(disposition, WindowDisposition::Other);
    }

    #[test]
    fn test_outcome_wire_format() {
        let json = serde_json::to_value(PageEventOutcome::PreventDefault).expect("serialize");
        assert_eq!(json, json!({ "outcome": "preventDefault" }));
        assert!(PageEventOutcome::PreventDefault.prevents_default());
        assert!(!PageEventOutcome::Continue.prevents_default());
    }
}
