//! Tab session for one host window.
//!
//! A [`Session`] owns the tab registry, the navigation gate and the link to
//! the verification oracle. Every operation is synchronous except the oracle
//! calls, which run as spawned tasks and report back through an internal
//! completion channel.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use phishgate::{HeadlessSurfaceFactory, HttpVerificationClient, Session, SessionConfig};
//!
//! let config = SessionConfig::new().with_start_page("https://example.org/");
//! let client = Arc::new(HttpVerificationClient::from_config(&config)?);
//! let (session, notifications) =
//!     Session::new(config, client, Box::new(HeadlessSurfaceFactory::new()))?;
//! let (handle, task) = phishgate::spawn_session(session);
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod control;
mod event_loop;
mod events;
mod navigation;


// ============================================================================
// Re-exports
// ============================================================================

pub use event_loop::{SessionHandle, SessionInput, spawn_session};
pub use navigation::VerificationCompletion;

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::gate::{GateState, NavigationGate, NavigationIntent};
use crate::identifiers::TabId;
use crate::protocol::{Notification, TabsSnapshot};
use crate::surface::{SurfaceConfig, SurfaceFactory};
use crate::tab::{TabPatch, TabRegistry, TabState};
use crate::verify::{HttpVerificationClient, VerificationClient};

// ============================================================================
// Session
// ============================================================================

/// Tab session and navigation gate for one host window.
pub struct Session {
    id: Uuid,
    config: SessionConfig,
    registry: TabRegistry,
    gate: NavigationGate,
    client: Arc<dyn VerificationClient>,
    completion_tx: mpsc::UnboundedSender<VerificationCompletion>,
    completion_rx: mpsc::UnboundedReceiver<VerificationCompletion>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("registry", &self.registry)
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Session - Constructors
// ============================================================================

impl Session {
    /// Creates an empty session.
    ///
    /// Returns the session together with the receiving end of its
    /// notification stream. No tab exists until `ready` or
    /// [`open_tab`](Self::open_tab).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `config` fails validation.
    pub fn new(
        config: SessionConfig,
        client: Arc<dyn VerificationClient>,
        factory: Box<dyn SurfaceFactory>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<Notification>)> {
        config.validate()?;

        let (notification_tx, notification_rx) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let registry = TabRegistry::new(factory, config.blank_title.clone(), notification_tx);
        let id = Uuid::new_v4();

        info!(session_id = %id, oracle = %config.oracle_url, "Session created");

        Ok((
            Self {
                id,
                config,
                registry,
                gate: NavigationGate::new(),
                client,
                completion_tx,
                completion_rx,
            },
            notification_rx,
        ))
    }

    /// Creates a session talking to the HTTP oracle named in `config`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid or the HTTP client cannot be built.
    pub fn with_http_oracle(
        config: SessionConfig,
        factory: Box<dyn SurfaceFactory>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<Notification>)> {
        config.validate()?;
        let client = Arc::new(HttpVerificationClient::from_config(&config)?);
        Self::new(config, client, factory)
    }
}

// ============================================================================
// Session - Accessors
// ============================================================================

impl Session {
    /// Session id used in logs.
    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current tab's state.
    #[must_use]
    pub fn current_tab(&self) -> Option<&TabState> {
        self.registry.current()
    }

    #[inline]
    #[must_use]
    pub fn current_tab_id(&self) -> Option<TabId> {
        self.registry.current_id()
    }

    #[must_use]
    pub fn tab(&self, tab_id: TabId) -> Option<&TabState> {
        self.registry.get(tab_id)
    }

    /// Tab ids in display order.
    #[must_use]
    pub fn tab_order(&self) -> &[TabId] {
        self.registry.order()
    }

    /// Gate state of a tab.
    #[must_use]
    pub fn gate_state(&self, tab_id: TabId) -> GateState {
        self.gate.state(tab_id)
    }

    /// Order plus every tab's state.
    #[must_use]
    pub fn snapshot(&self) -> TabsSnapshot {
        self.registry.snapshot()
    }

    fn require_current(&self) -> Result<TabId> {
        self.registry.current_id().ok_or(Error::SessionClosed)
    }
}

// ============================================================================
// Session - Tab Operations
// ============================================================================

impl Session {
    /// Opens a tab, makes it current and navigates it.
    ///
    /// An empty `url` opens the configured blank page. A URL that fails
    /// validation leaves the new tab blank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabsExhausted`] when no tab id is left to allocate.
    pub fn open_tab(
        &mut self,
        url: &str,
        after: Option<TabId>,
        bypass: bool,
        surface_config: Option<&SurfaceConfig>,
    ) -> Result<TabId> {
        let last_tab = self.registry.current_id();
        let tab_id = self.registry.open(after, surface_config)?;
        self.gate.register(tab_id);

        let url = if url.is_empty() {
            self.config.blank_page.clone()
        } else {
            url.to_string()
        };

        self.registry.notify(Notification::TabOpened {
            id: tab_id,
            url: url.clone(),
            last_tab,
        });

        let intent = NavigationIntent {
            tab_id,
            url,
            bypass_verification: bypass,
        };
        if let Err(e) = self.navigate(intent) {
            warn!(session_id = %self.id, tab_id = %tab_id, error = %e, "New tab left blank");
        }

        Ok(tab_id)
    }

    /// Closes a tab.
    ///
    /// Closing the last tab opens a blank replacement so the session is
    /// never empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if `tab_id` is not live.
    pub fn close_tab(&mut self, tab_id: TabId) -> Result<()> {
        let closed = self.registry.close(tab_id)?;
        self.gate.invalidate(tab_id);

        if closed.is_empty() {
            debug!(session_id = %self.id, "Last tab closed, opening replacement");
            self.open_tab("", None, false, None)?;
        }
        Ok(())
    }

    /// Makes `tab_id` the current tab.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if `tab_id` is not live.
    pub fn switch_tab(&mut self, tab_id: TabId) -> Result<()> {
        self.registry.switch(tab_id)
    }

    /// Merges `patch` into a tab's state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if `tab_id` is not live.
    pub fn update_tab_state(&mut self, tab_id: TabId, patch: TabPatch) -> Result<()> {
        self.registry.update(tab_id, patch)
    }

    /// Destroys every tab and stales every in-flight verification.
    pub fn shutdown(&mut self) {
        self.gate.invalidate_all();
        self.registry.destroy_all();
        info!(session_id = %self.id, "Session shut down");
    }
}
