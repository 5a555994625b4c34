//! Message contract between the session and its collaborators.
//!
//! | Message | Direction | Purpose |
//! |---------|-----------|---------|
//! | [`ControlCommand`] | Control panel → Session | User intent |
//! | [`Notification`] | Session → Control panel | State change |
//! | [`PageEvent`] | Surface → Session | Engine activity for one tab |
//! | [`PageEventOutcome`] | Session → Surface | Decision on that activity |
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Inbound commands and toolbar actions |
//! | `event` | Page events and their outcomes |
//! | `notification` | Outbound notifications |

// ============================================================================
// Submodules
// ============================================================================

/// Control-panel commands.
pub mod command;

/// Page events.
pub mod event;

/// Outbound notifications.
pub mod notification;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{ControlCommand, SurfaceAction};
pub use event::{PageEvent, PageEventOutcome, WindowDisposition};
pub use notification::{Notification, TabsSnapshot};
