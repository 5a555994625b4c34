//! Control-panel commands.

use tracing::debug;

use crate::error::Result;
use crate::protocol::{ControlCommand, SurfaceAction};
use crate::tab::TabPatch;

use super::Session;

impl Session {
    /// Applies a command from the control panel.
    ///
    /// # Errors
    ///
    /// - [`Error::TabNotFound`](crate::Error::TabNotFound) for unknown ids
    /// - [`Error::InvalidDestination`](crate::Error::InvalidDestination) for
    ///   unusable URLs
    /// - [`Error::UnknownAction`](crate::Error::UnknownAction) for `act` names
    ///   outside [`SurfaceAction`]
    pub fn handle_command(&mut self, command: ControlCommand) -> Result<()> {
        debug!(session_id = %self.id, method = command.method(), "Control command");

        match command {
            ControlCommand::Ready => {
                let start = self.config.start_page.clone().unwrap_or_default();
                self.open_tab(&start, None, false, None)?;
                Ok(())
            }

            ControlCommand::UrlChanged { url } => {
                let tab_id = self.require_current()?;
                self.registry.update(tab_id, TabPatch::new().url(url))
            }

            ControlCommand::UrlEntered { url } => self.load_url(&url, false),

            ControlCommand::Act { action } => self.act(action.parse()?),

            ControlCommand::OpenTab {
                url,
                surface_config,
            } => {
                self.open_tab(&url, None, false, surface_config.as_ref())?;
                Ok(())
            }

            ControlCommand::SwitchTab { id } => self.switch_tab(id),

            ControlCommand::CloseTab { id } => self.close_tab(id),
        }
    }

    /// Runs a toolbar action on the current tab's surface.
    ///
    /// Reloading an empty surface does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionClosed`](crate::Error::SessionClosed) when no
    /// tab exists.
    pub fn act(&mut self, action: SurfaceAction) -> Result<()> {
        let tab_id = self.require_current()?;
        let Some(surface) = self.registry.surface_mut(tab_id) else {
            return Ok(());
        };

        match action {
            SurfaceAction::GoBack => surface.go_back(),
            SurfaceAction::GoForward => surface.go_forward(),
            SurfaceAction::Stop => surface.stop(),
            SurfaceAction::Reload => {
                if surface.current_url().is_empty() {
                    debug!(tab_id = %tab_id, "Reload skipped on empty surface");
                    return Ok(());
                }
                surface.reload();
            }
        }

        // back/forward flags are read from the surface on merge
        self.registry.update(tab_id, TabPatch::new())
    }
}
