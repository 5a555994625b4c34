//! Error types for the navigation-gating core.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use phishgate::{Result, Session};
//!
//! fn example(session: &mut Session) -> Result<()> {
//!     session.load_url("https://example.com", false)?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Verification | [`Error::Verification`], [`Error::VerificationTimeout`], [`Error::Http`] |
//! | Registry | [`Error::TabNotFound`], [`Error::TabsExhausted`] |
//! | Destination | [`Error::InvalidDestination`], [`Error::UnknownAction`] |
//! | Session | [`Error::SessionClosed`], [`Error::ChannelClosed`] |
//! | External | [`Error::Json`], [`Error::Url`] |

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;

use crate::identifiers::TabId;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Nothing here is process-fatal: verification failures degrade to the
/// service-error surface and registry errors leave the session untouched.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when [`SessionConfig`](crate::SessionConfig) validation fails.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Verification Errors
    // ========================================================================
    /// The oracle was unreachable or answered with something unusable.
    #[error("Verification failed: {message}")]
    Verification {
        /// Description of the failure.
        message: String,
    },

    /// The oracle did not answer within the configured timeout.
    #[error("Verification timed out after {timeout_ms}ms")]
    VerificationTimeout {
        /// Milliseconds waited before giving up.
        timeout_ms: u64,
    },

    // ========================================================================
    // Registry Errors
    // ========================================================================
    /// Tab not found.
    ///
    /// Returned when an operation references an id that is not live.
    #[error("Tab not found: {tab_id}")]
    TabNotFound {
        /// The missing tab ID.
        tab_id: TabId,
    },

    /// Every tab id has been handed out.
    #[error("Tab ids exhausted")]
    TabsExhausted,

    // ========================================================================
    // Destination Errors
    // ========================================================================
    /// Navigation target cannot be resolved to a host.
    #[error("Invalid destination {url:?}: {reason}")]
    InvalidDestination {
        /// The rejected URL as supplied.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An `act` command named an action outside the allowed set.
    #[error("Unknown action: {action}")]
    UnknownAction {
        /// The rejected action name.
        action: String,
    },

    // ========================================================================
    // Session Errors
    // ========================================================================
    /// The session event loop is no longer running.
    #[error("Session closed")]
    SessionClosed,

    /// A reply channel was dropped before answering.
    #[error("Channel closed")]
    ChannelClosed(#[from] RecvError),

    // ========================================================================
    // External Errors
    // ========================================================================
    /// HTTP transport error talking to the oracle.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parse error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a verification error.
    #[inline]
    pub fn verification(message: impl Into<String>) -> Self {
        Self::Verification {
            message: message.into(),
        }
    }

    /// Creates a verification timeout error.
    #[inline]
    pub fn verification_timeout(timeout_ms: u64) -> Self {
        Self::VerificationTimeout { timeout_ms }
    }

    /// Creates a tab not found error.
    #[inline]
    pub fn tab_not_found(tab_id: TabId) -> Self {
        Self::TabNotFound { tab_id }
    }

    /// Creates an invalid destination error.
    #[inline]
    pub fn invalid_destination(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDestination {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unknown action error.
    #[inline]
    pub fn unknown_action(action: impl Into<String>) -> Self {
        Self::UnknownAction {
            action: action.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this error came out of the verification path.
    #[inline]
    #[must_use]
    pub fn is_verification_error(&self) -> bool {
        matches!(
            self,
            Self::Verification { .. } | Self::VerificationTimeout { .. } | Self::Http(_)
        )
    }

    /// Returns `true` if the request was rejected for naming a bad target.
    #[inline]
    #[must_use]
    pub fn is_invalid_destination(&self) -> bool {
        matches!(
            self,
            Self::InvalidDestination { .. } | Self::UnknownAction { .. } | Self::Url(_)
        )
    }

    /// Returns `true` if this error may succeed on retry.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::VerificationTimeout { .. } | Self::Verification { .. } | Self::Http(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::verification("status 502");
        assert_eq!(err.to_string(), "Verification failed: status 502");
    }

    #[test]
    fn test_tab_not_found_display() {
        let tab_id = TabId::new(7).expect("non-zero");
        assert_eq!(Error::tab_not_found(tab_id).to_string(), "Tab not found: 7");
    }

    #[test]
    fn test_tabs_exhausted_display() {
        assert_eq!(Error::TabsExhausted.to_string(), "Tab ids exhausted");
        assert!(!Error::TabsExhausted.is_recoverable());
    }

    #[test]
    fn test_invalid_destination_display() {
        let err = Error::invalid_destination("not a url", "relative URL without a base");
        assert_eq!(
            err.to_string(),
            "Invalid destination \"not a url\": relative URL without a base"
        );
    }

    #[test]
    fn test_is_verification_error() {
        assert!(Error::verification("x").is_verification_error());
        assert!(Error::verification_timeout(100).is_verification_error());
        assert!(!Error::config("x").is_verification_error());
    }

    #[test]
    fn test_unknown_action_is_destination_class() {
        assert!(Error::unknown_action("print").is_invalid_destination());
        assert!(!Error::SessionClosed.is_invalid_destination());
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::verification_timeout(10).is_recoverable());
        assert!(!Error::unknown_action("x").is_recoverable());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_from_url_error() {
        let url_err = url::Url::parse("::").unwrap_err();
        let err: Error = url_err.into();
        assert!(err.is_invalid_destination());
    }
}
