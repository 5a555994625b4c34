//! Tab records and the tab registry.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TabRegistry`] | Ordered tabs plus the current-tab pointer |
//! | [`TabState`] | Observable state of one tab |
//! | [`TabPatch`] | Partial update merged by the registry |

// ============================================================================
// Submodules
// ============================================================================

/// Partial updates and merge rules.
pub mod patch;

/// The registry.
pub mod registry;

/// Tab state record.
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use patch::{HistoryFlags, TabPatch};
pub use registry::{ClosedTab, TabRegistry};
pub use state::{TabState, TitleStatus};
