//! Session configuration.
//!
//! Provides a type-safe interface for the knobs a host window passes to its
//! [`Session`](crate::Session): where the oracle lives, which pages the
//! trusted local actions lead to, and how long a verification may take.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use phishgate::SessionConfig;
//!
//! let config = SessionConfig::new()
//!     .with_oracle_url("http://oracle.internal:5000")
//!     .with_start_page("https://www.example.org/")
//!     .with_verification_timeout(Duration::from_secs(10));
//!
//! config.validate()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default verification timeout.
pub const DEFAULT_VERIFICATION_TIMEOUT: Duration = Duration::from_secs(15);

/// Longest verification timeout accepted by [`SessionConfig::validate`].
pub const MAX_VERIFICATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Path segment the blocked-surface pages use for their trust/ignore controls.
pub const DEFAULT_LOCAL_ACTION_MARKER: &str = "moraapp-local-btn-clicked";

// ============================================================================
// SessionConfig
// ============================================================================

/// Per-window session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Page opened in the first tab when the control channel reports ready.
    pub start_page: Option<String>,

    /// Page loaded into tabs opened without a URL (empty loads nothing).
    pub blank_page: String,

    /// Title given to freshly opened tabs.
    pub blank_title: String,

    /// Target of the generic "home" local action.
    pub home_page: String,

    /// Target of the site-home local actions.
    pub site_home: String,

    /// Base URL of the verification oracle.
    pub oracle_url: String,

    /// Base URL serving the blocked-surface templates.
    pub blocked_surface_base: String,

    /// Upper bound on a single verification request.
    #[serde(rename = "verificationTimeoutMs", with = "duration_ms")]
    pub verification_timeout: Duration,

    /// Re-verify redirect targets instead of accepting them.
    pub reverify_redirects: bool,

    /// Last-path-segment marker of the in-page trust/ignore control.
    pub local_action_marker: String,

    /// Offer the Inspect entry in context menus.
    pub devtools: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl SessionConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start_page: None,
            blank_page: String::new(),
            blank_title: "New tab".to_string(),
            home_page: "https://www.google.com/".to_string(),
            site_home: "https://uom.lk".to_string(),
            oracle_url: "http://localhost:5000".to_string(),
            blocked_surface_base: "http://localhost".to_string(),
            verification_timeout: DEFAULT_VERIFICATION_TIMEOUT,
            reverify_redirects: true,
            local_action_marker: DEFAULT_LOCAL_ACTION_MARKER.to_string(),
            devtools: false,
        }
    }

    /// Parses a configuration from JSON, filling unspecified fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] on malformed input and [`Error::Config`] if the
    /// parsed values fail validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl SessionConfig {
    /// Sets the page opened on `ready`.
    #[inline]
    #[must_use]
    pub fn with_start_page(mut self, url: impl Into<String>) -> Self {
        self.start_page = Some(url.into());
        self
    }

    /// Sets the page loaded into tabs opened without a URL.
    #[inline]
    #[must_use]
    pub fn with_blank_page(mut self, url: impl Into<String>) -> Self {
        self.blank_page = url.into();
        self
    }

    /// Sets the title of freshly opened tabs.
    #[inline]
    #[must_use]
    pub fn with_blank_title(mut self, title: impl Into<String>) -> Self {
        self.blank_title = title.into();
        self
    }

    /// Sets the generic home page.
    #[inline]
    #[must_use]
    pub fn with_home_page(mut self, url: impl Into<String>) -> Self {
        self.home_page = url.into();
        self
    }

    /// Sets the site home page.
    #[inline]
    #[must_use]
    pub fn with_site_home(mut self, url: impl Into<String>) -> Self {
        self.site_home = url.into();
        self
    }

    /// Sets the oracle base URL.
    #[inline]
    #[must_use]
    pub fn with_oracle_url(mut self, url: impl Into<String>) -> Self {
        self.oracle_url = url.into();
        self
    }

    /// Sets the base URL of the blocked-surface templates.
    #[inline]
    #[must_use]
    pub fn with_blocked_surface_base(mut self, url: impl Into<String>) -> Self {
        self.blocked_surface_base = url.into();
        self
    }

    /// Sets the verification timeout.
    #[inline]
    #[must_use]
    pub fn with_verification_timeout(mut self, timeout: Duration) -> Self {
        self.verification_timeout = timeout;
        self
    }

    /// Chooses whether redirect targets are re-verified.
    #[inline]
    #[must_use]
    pub fn with_reverify_redirects(mut self, enabled: bool) -> Self {
        self.reverify_redirects = enabled;
        self
    }

    /// Enables the Inspect context-menu entry.
    #[inline]
    #[must_use]
    pub fn with_devtools(mut self) -> Self {
        self.devtools = true;
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl SessionConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("oracleUrl", &self.oracle_url),
            ("blockedSurfaceBase", &self.blocked_surface_base),
            ("homePage", &self.home_page),
            ("siteHome", &self.site_home),
        ] {
            let parsed = Url::parse(value)
                .map_err(|e| Error::config(format!("{field} is not a valid URL: {e}")))?;
            if parsed.host_str().is_none() {
                return Err(Error::config(format!("{field} has no host: {value}")));
            }
        }

        if self.verification_timeout.is_zero()
            || self.verification_timeout > MAX_VERIFICATION_TIMEOUT
        {
            return Err(Error::config(format!(
                "verificationTimeoutMs must be between 1 and {}",
                MAX_VERIFICATION_TIMEOUT.as_millis()
            )));
        }

        if self.local_action_marker.is_empty() || self.local_action_marker.contains('/') {
            return Err(Error::config(
                "localActionMarker must be a single non-empty path segment",
            ));
        }

        Ok(())
    }

    /// Returns the verification timeout in whole milliseconds.
    #[inline]
    #[must_use]
    pub fn verification_timeout_ms(&self) -> u64 {
        u64::try_from(self.verification_timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

// ============================================================================
// Serde Helpers
// ============================================================================

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SessionConfig::new().validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = SessionConfig::new()
            .with_start_page("https://start.example/")
            .with_blank_title("Empty")
            .with_verification_timeout(Duration::from_secs(5))
            .with_reverify_redirects(false)
            .with_devtools();

        assert_eq!(config.start_page.as_deref(), Some("https://start.example/"));
        assert_eq!(config.blank_title, "Empty");
        assert_eq!(config.verification_timeout_ms(), 5000);
        assert!(!config.reverify_redirects);
        assert!(config.devtools);
    }

    #[test]
    fn test_validate_rejects_hostless_oracle() {
        let config = SessionConfig::new().with_oracle_url("file:///tmp/oracle");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("oracleUrl"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = SessionConfig::new().with_verification_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_excessive_timeout() {
        let config = SessionConfig::new().with_verification_timeout(Duration::from_secs(600));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = SessionConfig::from_json(
            r#"{ "oracleUrl": "http://oracle.test:5000", "verificationTimeoutMs": 2500 }"#,
        )
        .expect("valid config");

        assert_eq!(config.oracle_url, "http://oracle.test:5000");
        assert_eq!(config.verification_timeout, Duration::from_millis(2500));
        assert_eq!(config.blank_title, "New tab");
        assert!(config.reverify_redirects);
    }

    #[test]
    fn test_from_json_rejects_bad_marker() {
        let result = SessionConfig::from_json(r#"{ "localActionMarker": "a/b" }"#);
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
