//! Partial tab updates and the merge rules applied to them.
//!
//! | Field | Rule |
//! |-------|------|
//! | `url`, `href`, `title`, `titleStatus`, `verdict`, `isLoading` | patch value wins when present |
//! | `targetUrl`, `recordId`, `favicon` | `Some(None)` clears, `Some(Some(v))` sets, `None` keeps |
//! | `canGoBack`, `canGoForward` | always taken from the live surface |

use crate::identifiers::RecordId;
use crate::verify::Verdict;

use super::state::{TabState, TitleStatus};

// ============================================================================
// HistoryFlags
// ============================================================================

/// Back/forward capability read from the surface at merge time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryFlags {
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

// ============================================================================
// TabPatch
// ============================================================================

/// Set of field overrides for one tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabPatch {
    pub url: Option<String>,
    pub href: Option<String>,
    pub title: Option<String>,
    pub title_status: Option<TitleStatus>,
    pub target_url: Option<Option<String>>,
    pub verdict: Option<Verdict>,
    pub record_id: Option<Option<RecordId>>,
    pub favicon: Option<Option<String>>,
    pub is_loading: Option<bool>,
}

impl TabPatch {
    /// Creates an empty patch.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the patch overrides nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    #[inline]
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Sets `url` and `href` together.
    #[inline]
    #[must_use]
    pub fn location(self, url: &str) -> Self {
        self.url(url).href(url)
    }

    #[inline]
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn title_status(mut self, status: TitleStatus) -> Self {
        self.title_status = Some(status);
        self
    }

    #[inline]
    #[must_use]
    pub fn target_url(mut self, target: Option<String>) -> Self {
        self.target_url = Some(target);
        self
    }

    #[inline]
    #[must_use]
    pub fn verdict(mut self, verdict: Verdict) -> Self {
        self.verdict = Some(verdict);
        self
    }

    #[inline]
    #[must_use]
    pub fn record_id(mut self, record_id: Option<RecordId>) -> Self {
        self.record_id = Some(record_id);
        self
    }

    #[inline]
    #[must_use]
    pub fn favicon(mut self, favicon: Option<String>) -> Self {
        self.favicon = Some(favicon);
        self
    }

    #[inline]
    #[must_use]
    pub fn loading(mut self, is_loading: bool) -> Self {
        self.is_loading = Some(is_loading);
        self
    }

    /// Merges the patch into `state`.
    ///
    /// Total: every field of `state` ends up either overridden, kept, or
    /// derived from `history`.
    pub fn apply(self, state: &mut TabState, history: HistoryFlags) {
        let Self {
            url,
            href,
            title,
            title_status,
            target_url,
            verdict,
            record_id,
            favicon,
            is_loading,
        } = self;

        if let Some(url) = url {
            state.url = url;
        }
        if let Some(href) = href {
            state.href = href;
        }
        if let Some(title) = title {
            state.title = title;
        }
        if let Some(status) = title_status {
            state.title_status = status;
        }
        if let Some(target) = target_url {
            state.target_url = target;
        }
        if let Some(verdict) = verdict {
            state.verdict = verdict;
        }
        if let Some(record_id) = record_id {
            state.record_id = record_id;
        }
        if let Some(favicon) = favicon {
            state.favicon = favicon;
        }
        if let Some(loading) = is_loading {
            state.is_loading = loading;
        }

        state.can_go_back = history.can_go_back;
        state.can_go_forward = history.can_go_forward;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_only_refreshes_history() {
        let mut state = TabState::blank("t");
        state.url = "https://kept.example/".to_string();

        TabPatch::new().apply(
            &mut state,
            HistoryFlags {
                can_go_back: true,
                can_go_forward: false,
            },
        );

        assert_eq!(state.url, "https://kept.example/");
        assert!(state.can_go_back);
        assert!(!state.can_go_forward);
    }

    #[test]
    fn test_clearable_fields() {
        let mut state = TabState::blank("t");
        state.record_id = Some(RecordId::from("r1"));
        state.favicon = Some("icon.png".to_string());

        TabPatch::new()
            .record_id(None)
            .apply(&mut state, HistoryFlags::default());

        assert!(state.record_id.is_none());
        assert_eq!(state.favicon.as_deref(), Some("icon.png"));
    }

    #[test]
    fn test_history_never_comes_from_caller() {
        let mut state = TabState::blank("t");
        state.can_go_back = true;

        TabPatch::new()
            .location("https://a.example/")
            .verdict(Verdict::Safe)
            .apply(&mut state, HistoryFlags::default());

        assert!(!state.can_go_back);
        assert_eq!(state.href, "https://a.example/");
        assert_eq!(state.verdict, Verdict::Safe);
    }

    #[test]
    fn test_is_empty() {
        assert!(TabPatch::new().is_empty());
        assert!(!TabPatch::new().loading(true).is_empty());
    }
}
