//! Page events from rendering surfaces.

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, trace, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::gate::{GateState, LocalAction, LocalActionToken, NavigationIntent};
use crate::identifiers::TabId;
use crate::menu::{MenuItem, build_context_menu};
use crate::protocol::{PageEvent, PageEventOutcome, WindowDisposition};
use crate::tab::{TabPatch, TitleStatus};
use crate::verify::Verdict;

use super::Session;

// ============================================================================
// Session - Page Events
// ============================================================================

impl Session {
    /// Handles an event raised by a tab's rendering surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if the tab is not live.
    pub fn handle_page_event(&mut self, tab_id: TabId, event: PageEvent) -> Result<PageEventOutcome> {
        if !self.registry.contains(tab_id) {
            return Err(Error::tab_not_found(tab_id));
        }
        trace!(tab_id = %tab_id, event = event.name(), "Page event");

        match event {
            PageEvent::DidStartLoading => {
                self.registry.update(tab_id, TabPatch::new().loading(true))?;
            }

            PageEvent::DidStopLoading => {
                if self.gate.state(tab_id) == GateState::AwaitingVerification {
                    trace!(tab_id = %tab_id, "Stop during verification keeps verifying state");
                } else {
                    self.registry.update(
                        tab_id,
                        TabPatch::new().loading(false).title_status(TitleStatus::Done),
                    )?;
                }
            }

            PageEvent::PageTitleUpdated { title } => {
                self.registry.update(tab_id, TabPatch::new().title(title))?;
            }

            PageEvent::UpdateTargetUrl { url } => {
                let target = (!url.is_empty()).then_some(url);
                self.registry.update(tab_id, TabPatch::new().target_url(target))?;
            }

            PageEvent::PageFaviconUpdated { favicons } => {
                let favicon = favicons.into_iter().next();
                self.registry.update(tab_id, TabPatch::new().favicon(favicon))?;
            }

            PageEvent::DomReady => return self.on_dom_ready(tab_id),

            PageEvent::WillNavigate { url } => return self.on_will_navigate(tab_id, url),

            PageEvent::WillRedirect { url } => return self.on_will_redirect(tab_id, url),

            PageEvent::NewWindow { url, disposition } => {
                return Ok(self.on_new_window(tab_id, url, disposition));
            }

            PageEvent::ContextMenu(params) => {
                return Ok(PageEventOutcome::ShowContextMenu {
                    items: build_context_menu(&params, self.config.devtools),
                    x: params.x,
                    y: params.y,
                });
            }
        }

        Ok(PageEventOutcome::Continue)
    }

    /// Performs a context-menu entry picked by the user.
    ///
    /// Returns `false` for entries the host performs itself (clipboard,
    /// zoom, saving).
    ///
    /// # Errors
    ///
    /// Returns [`Error::TabNotFound`] if the tab is not live.
    pub fn activate_menu_item(&mut self, tab_id: TabId, item: &MenuItem) -> Result<bool> {
        if !self.registry.contains(tab_id) {
            return Err(Error::tab_not_found(tab_id));
        }

        match item {
            MenuItem::OpenLinkInNewTab { url } => {
                self.open_tab(url, Some(tab_id), false, None)?;
                Ok(true)
            }
            MenuItem::Inspect => {
                if let Some(surface) = self.registry.surface_mut(tab_id) {
                    surface.open_devtools();
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn on_dom_ready(&mut self, tab_id: TabId) -> Result<PageEventOutcome> {
        let surface = self
            .registry
            .surface_mut(tab_id)
            .ok_or_else(|| Error::tab_not_found(tab_id))?;
        surface.focus();
        let committed = surface.current_url();

        let verdict = self.tab_verdict(tab_id);
        let mut patch = TabPatch::new();
        if verdict.allows_direct_load() {
            patch = patch.url(committed);
        }
        self.registry.update(tab_id, patch)?;
        Ok(PageEventOutcome::Continue)
    }

    fn on_will_navigate(&mut self, tab_id: TabId, url: String) -> Result<PageEventOutcome> {
        if let Some(token) = LocalActionToken::parse(&url, &self.config.local_action_marker) {
            self.run_local_action(tab_id, token)?;
            return Ok(PageEventOutcome::PreventDefault);
        }

        let is_target = self
            .registry
            .get(tab_id)
            .and_then(|state| state.target_url.as_deref())
            .is_some_and(|target| target == url);

        if !is_target {
            return Ok(PageEventOutcome::Continue);
        }

        debug!(tab_id = %tab_id, url = %url, "Intercepted link navigation");
        if let Err(e) = self.navigate(NavigationIntent::verified(tab_id, url)) {
            warn!(tab_id = %tab_id, error = %e, "Dropped intercepted navigation");
        }
        Ok(PageEventOutcome::PreventDefault)
    }

    fn on_will_redirect(&mut self, tab_id: TabId, url: String) -> Result<PageEventOutcome> {
        if self.gate.state(tab_id) == GateState::AwaitingVerification {
            debug!(tab_id = %tab_id, redirect = %url, "Redirect dropped while verification is pending");
            return Ok(PageEventOutcome::PreventDefault);
        }

        let verdict = self.tab_verdict(tab_id);

        if !verdict.allows_direct_load() {
            let held = self
                .registry
                .get(tab_id)
                .map(|state| state.url.clone())
                .unwrap_or_default();
            debug!(tab_id = %tab_id, redirect = %url, %verdict, "Redirect held");
            self.registry.update(tab_id, TabPatch::new().location(&held))?;
            return Ok(PageEventOutcome::PreventDefault);
        }

        if self.config.reverify_redirects {
            debug!(tab_id = %tab_id, redirect = %url, "Re-verifying redirect target");
            if let Err(e) = self.navigate(NavigationIntent::verified(tab_id, url)) {
                warn!(tab_id = %tab_id, error = %e, "Dropped redirect");
            }
            return Ok(PageEventOutcome::PreventDefault);
        }

        self.registry.update(tab_id, TabPatch::new().location(&url))?;
        Ok(PageEventOutcome::Continue)
    }

    fn on_new_window(
        &mut self,
        tab_id: TabId,
        url: String,
        disposition: WindowDisposition,
    ) -> PageEventOutcome {
        let has_host = Url::parse(&url)
            .ok()
            .is_some_and(|parsed| parsed.host_str().is_some_and(|host| !host.is_empty()));
        if !has_host {
            trace!(tab_id = %tab_id, url = %url, "New window without host left to host default");
            return PageEventOutcome::Continue;
        }

        if disposition == WindowDisposition::NewWindow {
            return PageEventOutcome::OpenInHostWindow { url };
        }

        if let Err(e) = self.open_tab(&url, Some(tab_id), false, None) {
            warn!(tab_id = %tab_id, url = %url, error = %e, "Could not open tab for new window");
        }
        PageEventOutcome::PreventDefault
    }

    /// Runs an in-page trust/ignore/home control in the emitting tab.
    fn run_local_action(&mut self, tab_id: TabId, token: LocalActionToken) -> Result<()> {
        let owner = token
            .tab_id
            .filter(|id| self.registry.contains(*id))
            .unwrap_or(tab_id);

        let destination = match token.action {
            LocalAction::SiteHome => self.config.site_home.clone(),
            LocalAction::Home => self.config.home_page.clone(),
            LocalAction::Ignore | LocalAction::Trust => self
                .registry
                .get(owner)
                .map(|state| state.url.clone())
                .unwrap_or_default(),
        };

        if token.action == LocalAction::Trust {
            match self.registry.get(owner).and_then(|state| state.record_id.clone()) {
                Some(record_id) => self.spawn_feedback(record_id),
                None => debug!(tab_id = %owner, "Trust without oracle record"),
            }
        }

        debug!(tab_id = %tab_id, action = ?token.action, destination = %destination, "Local action");
        self.registry.update(
            tab_id,
            TabPatch::new()
                .title_status(TitleStatus::Loading)
                .verdict(Verdict::Unverified)
                .record_id(None),
        )?;
        self.navigate(NavigationIntent::bypassed(tab_id, destination))
    }

    fn tab_verdict(&self, tab_id: TabId) -> Verdict {
        self.registry
            .get(tab_id)
            .map_or(Verdict::Unverified, |state| state.verdict)
    }
}
