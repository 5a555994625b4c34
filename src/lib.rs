//! Phishgate - navigation gating for a multi-tab browsing shell.
//!
//! This library is the control core of a browser window that sends every
//! navigation through an external phishing-verification oracle before the
//! page is allowed to load.
//!
//! # Architecture
//!
//! Each host window owns one [`Session`]:
//!
//! - **Tab registry**: ordered tabs plus the current-tab pointer
//! - **Navigation gate**: per-tab state machine, verify or bypass then route
//! - **Outcome router**: verdict to direct load or blocked template
//! - **Verification client**: async oracle contract ([`VerificationClient`])
//!
//! The session runs on its own task ([`spawn_session`]) and talks to the
//! outside world through messages only: [`ControlCommand`]s and
//! [`PageEvent`]s come in, [`Notification`]s go out.
//!
//! # Quick Start
//!
//! ```no_run
//! use phishgate::{
//!     ControlCommand, HeadlessSurfaceFactory, Result, Session, SessionConfig, spawn_session,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = SessionConfig::new()
//!         .with_oracle_url("http://localhost:5000")
//!         .with_start_page("https://www.example.org/");
//!
//!     let (session, mut notifications) =
//!         Session::with_http_oracle(config, Box::new(HeadlessSurfaceFactory::new()))?;
//!     let (handle, _task) = spawn_session(session);
//!
//!     handle.send_command(ControlCommand::Ready).await?;
//!
//!     while let Some(notification) = notifications.recv().await {
//!         println!("{}", serde_json::to_string(&notification)?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | [`SessionConfig`] and its defaults |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`gate`] | Navigation gate, routing, in-page control tokens |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`menu`] | Context menu descriptors |
//! | [`protocol`] | Commands, page events, notifications |
//! | [`session`] | [`Session`] and its event loop |
//! | [`surface`] | Rendering surface collaborator |
//! | [`tab`] | Tab state and registry |
//! | [`verify`] | Oracle contract and HTTP client |

// ============================================================================
// Modules
// ============================================================================

/// Session configuration.
pub mod config;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Per-tab navigation state machine and outcome routing.
pub mod gate;

/// Type-safe identifiers.
pub mod identifiers;

/// Context menu descriptors.
pub mod menu;

/// Message contract with the control panel and rendering surfaces.
pub mod protocol;

/// The tab session and its event loop.
pub mod session;

/// Rendering surface collaborator.
pub mod surface;

/// Tab records and registry.
pub mod tab;

/// Verification oracle contract.
pub mod verify;

// ============================================================================
// Re-exports
// ============================================================================

// Configuration
pub use config::SessionConfig;

// Error types
pub use error::{Error, Result};

// Gate types
pub use gate::{BlockedSurface, Destination, GateState, NavigationIntent};

// Identifier types
pub use identifiers::{Generation, RecordId, TabId};

// Menu types
pub use menu::{ContextMenuParams, MenuItem, ZoomDirection};

// Protocol types
pub use protocol::{
    ControlCommand, Notification, PageEvent, PageEventOutcome, SurfaceAction, TabsSnapshot,
    WindowDisposition,
};

// Session types
pub use session::{Session, SessionHandle, SessionInput, spawn_session};

// Surface types
pub use surface::{
    HeadlessSurface, HeadlessSurfaceFactory, RenderSurface, SurfaceConfig, SurfaceFactory,
};

// Tab types
pub use tab::{TabPatch, TabState, TitleStatus};

// Verification types
pub use verify::{HttpVerificationClient, Verdict, VerificationClient, VerificationResult};
