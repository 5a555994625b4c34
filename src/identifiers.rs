//! Type-safe identifiers.
//!
//! Newtype wrappers prevent mixing incompatible IDs at compile time.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TabId`] | Session-unique tab identifier, never reused |
//! | [`Generation`] | Per-tab navigation counter used to drop stale results |
//! | [`RecordId`] | Opaque oracle record reference |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// TabId
// ============================================================================

/// Identifier of one tab within a session.
///
/// Allocated monotonically by the registry; a closed id is never handed out
/// again for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(NonZeroU32);

impl TabId {
    /// Creates a tab ID, returning `None` for zero.
    #[inline]
    #[must_use]
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    /// Returns the raw numeric value.
    #[inline]
    #[must_use]
    pub fn as_u32(&self) -> u32 {
        self.0.get()
    }

    /// The first id a registry hands out.
    #[inline]
    #[must_use]
    pub(crate) fn first() -> Self {
        Self(NonZeroU32::MIN)
    }

    /// The id allocated after this one, or `None` past `u32::MAX`.
    #[inline]
    #[must_use]
    pub(crate) fn successor(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TabId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<NonZeroU32>().map(Self)
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Monotonic per-tab navigation counter.
///
/// Every navigation request bumps the tab's generation; a verification
/// result tagged with an older generation is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Generation(u64);

impl Generation {
    /// Returns the following generation.
    #[inline]
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the raw counter value.
    #[inline]
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// RecordId
// ============================================================================

/// Opaque reference to the oracle's verification record.
///
/// The oracle may hand out numbers or strings; the value is kept verbatim so
/// feedback reports echo exactly what was received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Value);

impl RecordId {
    /// Wraps a raw JSON value.
    #[inline]
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the raw JSON value.
    #[inline]
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(Value::from(value))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
