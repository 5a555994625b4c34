//! Verification oracle collaborator.
//!
//! The oracle decides whether a URL is safe to load. This module defines the
//! request/response contract only; the detection model behind it is opaque.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`VerificationClient`] | Async contract the navigation gate talks to |
//! | [`Verdict`] | Outcome code attached to a navigation |
//! | [`VerificationResult`] | Verdict plus oracle record reference |
//! | [`HttpVerificationClient`] | HTTP implementation of the contract |

// ============================================================================
// Submodules
// ============================================================================

/// HTTP implementation of the oracle contract.
pub mod http;

/// Verdict codes.
pub mod verdict;

// ============================================================================
// Re-exports
// ============================================================================

pub use http::HttpVerificationClient;
pub use verdict::Verdict;

// ============================================================================
// Imports
// ============================================================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::identifiers::RecordId;

// ============================================================================
// VerificationResult
// ============================================================================

/// Outcome of one verification request. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// Verdict for the requested URL.
    pub verdict: Verdict,
    /// Oracle record, kept for later feedback reports.
    pub record_id: Option<RecordId>,
}

impl VerificationResult {
    /// Creates a result.
    #[inline]
    #[must_use]
    pub fn new(verdict: Verdict, record_id: Option<RecordId>) -> Self {
        Self { verdict, record_id }
    }
}

// ============================================================================
// VerificationClient
// ============================================================================

/// Contract between the navigation gate and the verification oracle.
///
/// Both operations may suspend; nothing else in the session does.
#[async_trait]
pub trait VerificationClient: Send + Sync {
    /// Asks the oracle for a verdict on `url`.
    ///
    /// # Errors
    ///
    /// Network failures and non-success answers surface as
    /// [`Error::Verification`](crate::Error::Verification) or
    /// [`Error::Http`](crate::Error::Http).
    async fn verify(&self, url: &str) -> Result<VerificationResult>;

    /// Reports that the user chose to trust the page behind `record_id`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`verify`](Self::verify).
    async fn report_user_action(&self, record_id: &RecordId) -> Result<()>;
}
