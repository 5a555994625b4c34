//! Session event loop.
//!
//! The loop owns the [`Session`] and serializes everything that touches it:
//! control commands, page events and verification completions. Callers talk
//! to it through a cloneable [`SessionHandle`].

// ============================================================================
// Imports
// ============================================================================

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::identifiers::TabId;
use crate::menu::MenuItem;
use crate::protocol::{ControlCommand, PageEvent, PageEventOutcome};

use super::Session;

// ============================================================================
// SessionInput
// ============================================================================

/// Input processed by the event loop.
#[derive(Debug)]
pub enum SessionInput {
    /// Command from the control panel.
    Control {
        command: ControlCommand,
        reply: oneshot::Sender<Result<()>>,
    },

    /// Event from a tab's rendering surface.
    Page {
        tab_id: TabId,
        event: PageEvent,
        reply: oneshot::Sender<Result<PageEventOutcome>>,
    },

    /// Context-menu entry picked by the user.
    MenuItem {
        tab_id: TabId,
        item: MenuItem,
        reply: oneshot::Sender<Result<bool>>,
    },

    /// Destroy every tab and stop the loop.
    Shutdown,
}

// ============================================================================
// SessionHandle
// ============================================================================

/// Cloneable handle to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    input_tx: mpsc::UnboundedSender<SessionInput>,
}

impl SessionHandle {
    /// Sends a control command and waits until it has been applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionClosed`] if the loop has stopped, otherwise
    /// whatever the command itself produced.
    pub async fn send_command(&self, command: ControlCommand) -> Result<()> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionInput::Control { command, reply })?;
        rx.await?
    }

    /// Delivers a page event and waits for the outcome.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionClosed`] if the loop has stopped, or
    /// [`Error::TabNotFound`] for an unknown tab.
    pub async fn page_event(&self, tab_id: TabId, event: PageEvent) -> Result<PageEventOutcome> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionInput::Page {
            tab_id,
            event,
            reply,
        })?;
        rx.await?
    }

    /// Performs a context-menu entry.
    ///
    /// # Errors
    ///
    /// Same as [`page_event`](Self::page_event).
    pub async fn activate_menu_item(&self, tab_id: TabId, item: MenuItem) -> Result<bool> {
        let (reply, rx) = oneshot::channel();
        self.send(SessionInput::MenuItem {
            tab_id,
            item,
            reply,
        })?;
        rx.await?
    }

    /// Asks the loop to shut the session down.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionClosed`] if the loop has already stopped.
    pub fn shutdown(&self) -> Result<()> {
        self.send(SessionInput::Shutdown)
    }

    /// Returns `true` while the loop accepts input.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.input_tx.is_closed()
    }

    fn send(&self, input: SessionInput) -> Result<()> {
        self.input_tx.send(input).map_err(|_| Error::SessionClosed)
    }
}

// ============================================================================
// Spawning
// ============================================================================

/// Moves `session` onto its own task.
///
/// The loop ends on [`SessionHandle::shutdown`] or when every handle has been
/// dropped; either way all surfaces are destroyed.
pub fn spawn_session(session: Session) -> (SessionHandle, JoinHandle<()>) {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run_event_loop(session, input_rx));
    (SessionHandle { input_tx }, task)
}

async fn run_event_loop(mut session: Session, mut input_rx: mpsc::UnboundedReceiver<SessionInput>) {
    info!(session_id = %session.id(), "Session event loop started");

    loop {
        tokio::select! {
            // Inputs from handles
            input = input_rx.recv() => {
                match input {
                    Some(SessionInput::Control { command, reply }) => {
                        let method = command.method();
                        let result = session.handle_command(command);
                        if let Err(ref e) = result {
                            warn!(method, error = %e, "Control command failed");
                        }
                        let _ = reply.send(result);
                    }

                    Some(SessionInput::Page { tab_id, event, reply }) => {
                        let _ = reply.send(session.handle_page_event(tab_id, event));
                    }

                    Some(SessionInput::MenuItem { tab_id, item, reply }) => {
                        let _ = reply.send(session.activate_menu_item(tab_id, &item));
                    }

                    Some(SessionInput::Shutdown) => {
                        debug!("Shutdown requested");
                        break;
                    }

                    None => {
                        debug!("All session handles dropped");
                        break;
                    }
                }
            }

            // Verification results from spawned tasks
            Some(completion) = session.recv_completion() => {
                session.complete_verification(completion);
            }
        }
    }

    session.shutdown();
    info!(session_id = %session.id(), "Session event loop terminated");
}
