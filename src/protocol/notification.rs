//! Outbound notifications pushed to the control panel.
//!
//! # Format
//!
//! ```json
//! { "event": "tabsChanged", "data": { "tabs": [1, 2], "states": { "1": { ... } } } }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::identifiers::TabId;
use crate::tab::TabState;

// ============================================================================
// TabsSnapshot
// ============================================================================

/// Full picture of the session: tab order plus every tab's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabsSnapshot {
    /// Tab ids in display order.
    pub tabs: Vec<TabId>,
    /// State of each live tab.
    pub states: BTreeMap<TabId, TabState>,
}

// ============================================================================
// Notification
// ============================================================================

/// Session to control-panel notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum Notification {
    /// The current tab changed.
    ActiveTabChanged {
        /// New current tab.
        id: TabId,
    },

    /// Tab order or some tab's state changed.
    TabsChanged(TabsSnapshot),

    /// A tab was opened.
    TabOpened {
        /// The new tab.
        id: TabId,
        /// URL it was asked to navigate to.
        url: String,
        /// Tab that was current before the open.
        #[serde(rename = "lastTab")]
        last_tab: Option<TabId>,
    },
}

impl Notification {
    /// Returns the wire name of the notification.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::ActiveTabChanged { .. } => "activeTabChanged",
            Self::TabsChanged(_) => "tabsChanged",
            Self::TabOpened { .. } => "tabOpened",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: u32) -> TabId {
        TabId::new(id).expect("non-zero")
    }

    #[test]
    fn test_active_tab_changed_wire_format() {
        let json = serde_json::to_value(Notification::ActiveTabChanged { id: tab(3) })
            .expect("serialize");
        assert_eq!(json, serde_json::json!({ "event": "activeTabChanged", "data": { "id": 3 } }));
    }

    #[test]
    fn test_tabs_changed_keys_states_by_id() {
        let mut states = BTreeMap::new();
        states.insert(tab(2), TabState::blank("New tab"));
        let notification = Notification::TabsChanged(TabsSnapshot {
            tabs: vec![tab(2)],
            states,
        });

        let json = serde_json::to_value(&notification).expect("serialize");
        assert_eq!(json["event"], "tabsChanged");
        assert_eq!(json["data"]["tabs"], serde_json::json!([2]));
        assert_eq!(json["data"]["states"]["2"]["title"], "New tab");
        assert_eq!(notification.name(), "tabsChanged");
    }

    #[test]
    fn test_tab_opened_uses_last_tab_key() {
        let json = serde_json::to_value(Notification::TabOpened {
            id: tab(4),
            url: "https://a.example/".to_string(),
            last_tab: Some(tab(1)),
        })
        .expect("serialize");
        assert_eq!(json["data"]["lastTab"], 1);
    }
}
