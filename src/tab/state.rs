//! Per-tab record pushed to the control panel.

use serde::{Deserialize, Serialize};

use crate::identifiers::RecordId;
use crate::verify::Verdict;

// ============================================================================
// TitleStatus
// ============================================================================

/// What the tab title currently reflects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleStatus {
    /// Waiting on the oracle.
    Verifying,
    /// Surface is loading the routed destination.
    Loading,
    /// Page finished loading.
    #[default]
    Done,
}

// ============================================================================
// TabState
// ============================================================================

/// Observable state of one tab.
///
/// Only the registry writes this, through [`TabPatch`](super::TabPatch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabState {
    /// Address-bar value. Lags the loaded page while verifying.
    pub url: String,
    /// Last confirmed loaded location.
    pub href: String,
    pub title: String,
    pub title_status: TitleStatus,
    /// Last hovered or focused link.
    pub target_url: Option<String>,
    pub verdict: Verdict,
    pub record_id: Option<RecordId>,
    pub favicon: Option<String>,
    pub is_loading: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

impl TabState {
    /// State of a freshly opened tab.
    #[must_use]
    pub fn blank(title: impl Into<String>) -> Self {
        Self {
            url: String::new(),
            href: String::new(),
            title: title.into(),
            title_status: TitleStatus::Done,
            target_url: None,
            verdict: Verdict::Unverified,
            record_id: None,
            favicon: None,
            is_loading: false,
            can_go_back: false,
            can_go_forward: false,
        }
    }
}
