//! Verdict to destination mapping.
//!
//! | Verdict | Destination |
//! |---------|-------------|
//! | `Safe`, `Unverified` | the requested URL |
//! | `Deceptive` | `deceptive-site` |
//! | `Suspicious` | `user-select` |
//! | `ServiceError` | `service-error` |
//! | `RedirectionAttempt` | `redirection-attempt` |
//!
//! Blocked templates live at `<base>/site/<name>?id=<tabId>`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identifiers::{RecordId, TabId};
use crate::verify::Verdict;

// ============================================================================
// BlockedSurface
// ============================================================================

/// Collaborator-served page shown in place of a refused destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockedSurface {
    DeceptiveSite,
    UserSelect,
    ServiceError,
    RedirectionAttempt,
}

impl BlockedSurface {
    /// Template for `verdict`, or `None` if the verdict loads directly.
    #[must_use]
    pub fn for_verdict(verdict: Verdict) -> Option<Self> {
        match verdict {
            Verdict::Safe | Verdict::Unverified => None,
            Verdict::Deceptive => Some(Self::DeceptiveSite),
            Verdict::Suspicious => Some(Self::UserSelect),
            Verdict::ServiceError => Some(Self::ServiceError),
            Verdict::RedirectionAttempt => Some(Self::RedirectionAttempt),
        }
    }

    /// Template name used in the URL path.
    #[inline]
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::DeceptiveSite => "deceptive-site",
            Self::UserSelect => "user-select",
            Self::ServiceError => "service-error",
            Self::RedirectionAttempt => "redirection-attempt",
        }
    }

    /// Full template URL for `tab_id` under `base`.
    #[must_use]
    pub fn url(self, base: &str, tab_id: TabId) -> String {
        format!(
            "{}/site/{}?id={}",
            base.trim_end_matches('/'),
            self.name(),
            tab_id
        )
    }
}

impl fmt::Display for BlockedSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Route
// ============================================================================

/// Input of [`route`].
#[derive(Debug, Clone, Copy)]
pub struct RouteRequest<'a> {
    pub verdict: Verdict,
    pub tab_id: TabId,
    /// The URL the user asked for.
    pub url: &'a str,
    pub record_id: Option<&'a RecordId>,
}

/// Where a tab goes after verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Load the requested URL as-is.
    Load {
        url: String,
    },
    /// Show a blocked template instead.
    Blocked {
        surface: BlockedSurface,
        /// Template URL the surface loads.
        surface_url: String,
        /// Requested URL, kept for the address bar and trust/ignore.
        original_url: String,
        record_id: Option<RecordId>,
    },
}

impl Destination {
    /// URL the rendering surface should load.
    #[must_use]
    pub fn load_target(&self) -> &str {
        match self {
            Self::Load { url } => url,
            Self::Blocked { surface_url, .. } => surface_url,
        }
    }

    /// Returns `true` for blocked templates.
    #[inline]
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked { .. })
    }
}

/// Maps a verdict to a destination. Pure.
#[must_use]
pub fn route(request: &RouteRequest<'_>, blocked_base: &str) -> Destination {
    match BlockedSurface::for_verdict(request.verdict) {
        None => Destination::Load {
            url: request.url.to_string(),
        },
        Some(surface) => Destination::Blocked {
            surface,
            surface_url: surface.url(blocked_base, request.tab_id),
            original_url: request.url.to_string(),
            record_id: request.record_id.cloned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost";

    fn request(verdict: Verdict, url: &str) -> RouteRequest<'_> {
        RouteRequest {
            verdict,
            tab_id: TabId::new(3).expect("non-zero"),
            url,
            record_id: None,
        }
    }

    #[test]
    fn test_safe_and_unverified_load_directly() {
        for verdict in [Verdict::Safe, Verdict::Unverified] {
            let destination = route(&request(verdict, "http://safe.example"), BASE);
            assert_eq!(
                destination,
                Destination::Load {
                    url: "http://safe.example".to_string()
                }
            );
        }
    }

    #[test]
    fn test_blocked_templates_embed_tab_id() {
        let cases = [
            (Verdict::Deceptive, "http://localhost/site/deceptive-site?id=3"),
            (Verdict::Suspicious, "http://localhost/site/user-select?id=3"),
            (Verdict::ServiceError, "http://localhost/site/service-error?id=3"),
            (
                Verdict::RedirectionAttempt,
                "http://localhost/site/redirection-attempt?id=3",
            ),
        ];

        for (verdict, expected) in cases {
            let destination = route(&request(verdict, "http://evil.example"), BASE);
            assert!(destination.is_blocked());
            assert_eq!(destination.load_target(), expected);
            if let Destination::Blocked { original_url, .. } = destination {
                assert_eq!(original_url, "http://evil.example");
            }
        }
    }

    #[test]
    fn test_base_trailing_slash_is_trimmed() {
        let tab_id = TabId::new(1).expect("non-zero");
        assert_eq!(
            BlockedSurface::UserSelect.url("http://pages.test/", tab_id),
            "http://pages.test/site/user-select?id=1"
        );
    }

    #[test]
    fn test_record_is_carried_to_blocked_destination() {
        let record = RecordId::from("r1");
        let mut req = request(Verdict::Deceptive, "http://evil.example");
        req.record_id = Some(&record);

        match route(&req, BASE) {
            Destination::Blocked { record_id, .. } => assert_eq!(record_id, Some(record)),
            other => panic!("expected blocked destination, got {other:?}"),
        }
    }
}
