//! Verdict codes returned by the oracle.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Verdict
// ============================================================================

/// Phishing-verification outcome for a navigation.
///
/// Serialized as the oracle's integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Verdict {
    /// No verification was performed (bypassed or not yet verified).
    #[default]
    Unverified,
    /// Oracle considers the destination safe.
    Safe,
    /// Known deceptive site.
    Deceptive,
    /// Suspicious; the user decides.
    Suspicious,
    /// The oracle failed to produce a verdict.
    ServiceError,
    /// The page attempted a redirection the oracle flagged.
    RedirectionAttempt,
}

impl Verdict {
    /// Maps an oracle action code to a verdict.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::Unverified),
            0 => Some(Self::Safe),
            1 => Some(Self::Deceptive),
            2 => Some(Self::Suspicious),
            3 => Some(Self::ServiceError),
            4 => Some(Self::RedirectionAttempt),
            _ => None,
        }
    }

    /// Returns the oracle action code.
    #[inline]
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            Self::Unverified => -1,
            Self::Safe => 0,
            Self::Deceptive => 1,
            Self::Suspicious => 2,
            Self::ServiceError => 3,
            Self::RedirectionAttempt => 4,
        }
    }

    /// Returns `true` when the destination may be loaded directly.
    #[inline]
    #[must_use]
    pub fn allows_direct_load(self) -> bool {
        matches!(self, Self::Safe | Self::Unverified)
    }
}

impl TryFrom<i64> for Verdict {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown verdict code {code}"))
    }
}

impl From<Verdict> for i64 {
    fn from(verdict: Verdict) -> Self {
        verdict.code()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unverified => "unverified",
            Self::Safe => "safe",
            Self::Deceptive => "deceptive",
            Self::Suspicious => "suspicious",
            Self::ServiceError => "service-error",
            Self::RedirectionAttempt => "redirection-attempt",
        };
        f.write_str(name)
    }
}
