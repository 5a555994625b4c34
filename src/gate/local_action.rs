//! In-page control tokens.
//!
//! Blocked templates and the site pages embed buttons that navigate to a URL
//! whose last path segment is `<marker>#<action>#<tabId>`. The session
//! intercepts those navigations instead of letting the surface follow them.

use crate::identifiers::TabId;

// ============================================================================
// LocalAction
// ============================================================================

/// Action requested by an in-page control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalAction {
    /// Go to the configured site home.
    SiteHome,
    /// Load the tab's stored URL without verification.
    Ignore,
    /// Same as [`Ignore`](Self::Ignore), and report the trust decision.
    Trust,
    /// Anything else: go to the generic home page.
    Home,
}

impl LocalAction {
    fn from_name(name: &str) -> Self {
        match name {
            "mora-home" | "uni-home" => Self::SiteHome,
            "ignore" => Self::Ignore,
            "trust" => Self::Trust,
            _ => Self::Home,
        }
    }

    /// Returns `true` if the action continues to the tab's stored URL.
    #[inline]
    #[must_use]
    pub fn continues_to_stored_url(self) -> bool {
        matches!(self, Self::Ignore | Self::Trust)
    }
}

// ============================================================================
// LocalActionToken
// ============================================================================

/// Parsed in-page control token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalActionToken {
    pub action: LocalAction,
    /// Tab the control was rendered for, when it names a valid id.
    pub tab_id: Option<TabId>,
}

impl LocalActionToken {
    /// Parses `url` if its last path segment starts with `marker`.
    #[must_use]
    pub fn parse(url: &str, marker: &str) -> Option<Self> {
        let segment = url.rsplit('/').next()?;
        let mut parts = segment.split('#');
        if parts.next()? != marker {
            return None;
        }

        let action = LocalAction::from_name(parts.next().unwrap_or_default());
        let tab_id = parts.next().and_then(|raw| raw.parse::<TabId>().ok());

        Some(Self { action, tab_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKER: &str = "moraapp-local-btn-clicked";

    #[test]
    fn test_parse_trust_with_tab() {
        let token =
            LocalActionToken::parse("http://localhost/site/moraapp-local-btn-clicked#trust#4", MARKER)
                .expect("token");
        assert_eq!(token.action, LocalAction::Trust);
        assert_eq!(token.tab_id, TabId::new(4));
        assert!(token.action.continues_to_stored_url());
    }

    #[test]
    fn test_site_home_aliases() {
        for name in ["mora-home", "uni-home"] {
            let url = format!("http://localhost/{MARKER}#{name}");
            let token = LocalActionToken::parse(&url, MARKER).expect("token");
            assert_eq!(token.action, LocalAction::SiteHome);
            assert!(token.tab_id.is_none());
        }
    }

    #[test]
    fn test_unknown_action_goes_home() {
        let token = LocalActionToken::parse(&format!("http://x/{MARKER}#print#1"), MARKER)
            .expect("token");
        assert_eq!(token.action, LocalAction::Home);
    }

    #[test]
    fn test_bad_tab_id_is_dropped() {
        let token = LocalActionToken::parse(&format!("http://x/{MARKER}#ignore#zero"), MARKER)
            .expect("token");
        assert_eq!(token.action, LocalAction::Ignore);
        assert!(token.tab_id.is_none());
    }

    #[test]
    fn test_ordinary_urls_are_not_tokens() {
        assert!(LocalActionToken::parse("https://example.com/page#trust#1", MARKER).is_none());
        assert!(LocalActionToken::parse(&format!("https://x/{MARKER}/next"), MARKER).is_none());
    }
}
