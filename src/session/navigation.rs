//! Navigation requests, verification and routing.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use tokio::time::timeout;
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::gate::{NavigationIntent, RouteRequest, route};
use crate::identifiers::{Generation, RecordId, TabId};
use crate::tab::{TabPatch, TitleStatus};
use crate::verify::{Verdict, VerificationResult};

use super::Session;

// ============================================================================
// VerificationCompletion
// ============================================================================

/// Result of one spawned verification, tagged with the generation it
/// was started for.
#[derive(Debug)]
pub struct VerificationCompletion {
    pub tab_id: TabId,
    pub generation: Generation,
    pub url: String,
    pub result: Result<VerificationResult>,
}

// ============================================================================
// Session - Navigation
// ============================================================================

impl Session {
    /// Feeds a navigation request into the gate.
    ///
    /// Verified requests mark the tab as verifying and return immediately;
    /// the verdict arrives later through
    /// [`process_next_completion`](Self::process_next_completion). Bypassed
    /// requests are routed synchronously.
    ///
    /// # Errors
    ///
    /// - [`Error::TabNotFound`] if the tab is not live
    /// - [`Error::InvalidDestination`] if the URL has no resolvable host
    pub fn navigate(&mut self, intent: NavigationIntent) -> Result<()> {
        let tab_id = intent.tab_id;
        if !self.registry.contains(tab_id) {
            return Err(Error::tab_not_found(tab_id));
        }

        if intent.is_blank() {
            self.gate.reset(tab_id);
            trace!(tab_id = %tab_id, "Blank navigation");
            return Ok(());
        }

        validate_destination(&intent.url)?;

        let generation = self.gate.begin(&intent);

        if intent.bypass_verification {
            debug!(tab_id = %tab_id, url = %intent.url, %generation, "Navigation bypasses verification");
            self.registry.update(
                tab_id,
                TabPatch::new()
                    .url(intent.url.as_str())
                    .verdict(Verdict::Unverified)
                    .record_id(None),
            )?;
            return self.apply_route(tab_id, generation, &intent.url, Verdict::Unverified, None);
        }

        debug!(tab_id = %tab_id, url = %intent.url, %generation, "Navigation awaiting verification");
        // The page being left must not commit or redirect under a pending verdict.
        if let Some(surface) = self.registry.surface_mut(tab_id) {
            surface.stop();
        }
        self.registry.update(
            tab_id,
            TabPatch::new()
                .url(intent.url.as_str())
                .title_status(TitleStatus::Verifying)
                .loading(true),
        )?;
        self.spawn_verification(tab_id, generation, intent.url);
        Ok(())
    }

    /// Navigates the current tab.
    ///
    /// # Errors
    ///
    /// Same as [`navigate`](Self::navigate), plus [`Error::SessionClosed`]
    /// when no tab exists.
    pub fn load_url(&mut self, url: &str, bypass: bool) -> Result<()> {
        let tab_id = self.require_current()?;
        self.navigate(NavigationIntent {
            tab_id,
            url: url.to_string(),
            bypass_verification: bypass,
        })
    }

    /// Waits for the next verification completion and applies it.
    ///
    /// Returns `true` if the completion changed tab state, `false` if it was
    /// stale.
    pub async fn process_next_completion(&mut self) -> bool {
        match self.recv_completion().await {
            Some(completion) => self.complete_verification(completion),
            None => false,
        }
    }

    /// Applies a verification completion.
    ///
    /// Completions for closed tabs or superseded generations are dropped
    /// without touching state. Failures route to the service-error surface.
    pub fn complete_verification(&mut self, completion: VerificationCompletion) -> bool {
        let VerificationCompletion {
            tab_id,
            generation,
            url,
            result,
        } = completion;

        if !self.gate.accept(tab_id, generation) {
            debug!(tab_id = %tab_id, %generation, "Dropping stale verification result");
            return false;
        }

        let (verdict, record_id) = match result {
            Ok(VerificationResult { verdict, record_id }) => (verdict, record_id),
            Err(e) => {
                warn!(tab_id = %tab_id, url = %url, error = %e, "Verification failed");
                (Verdict::ServiceError, None)
            }
        };

        debug!(tab_id = %tab_id, url = %url, %verdict, "Verification resolved");

        let stored = self.registry.update(
            tab_id,
            TabPatch::new().verdict(verdict).record_id(record_id.clone()),
        );
        if let Err(e) = stored.and_then(|()| {
            self.apply_route(tab_id, generation, &url, verdict, record_id.as_ref())
        }) {
            warn!(tab_id = %tab_id, error = %e, "Failed to route verified navigation");
            return false;
        }
        true
    }

    pub(super) async fn recv_completion(&mut self) -> Option<VerificationCompletion> {
        self.completion_rx.recv().await
    }

    fn spawn_verification(&self, tab_id: TabId, generation: Generation, url: String) {
        let client = Arc::clone(&self.client);
        let completions = self.completion_tx.clone();
        let limit = self.config.verification_timeout;
        let limit_ms = self.config.verification_timeout_ms();

        tokio::spawn(async move {
            let result = match timeout(limit, client.verify(&url)).await {
                Ok(result) => result,
                Err(_) => Err(Error::verification_timeout(limit_ms)),
            };

            let completion = VerificationCompletion {
                tab_id,
                generation,
                url,
                result,
            };
            if completions.send(completion).is_err() {
                trace!(tab_id = %tab_id, "Session gone before verification finished");
            }
        });
    }

    pub(super) fn spawn_feedback(&self, record_id: RecordId) {
        let client = Arc::clone(&self.client);
        let limit = self.config.verification_timeout;

        tokio::spawn(async move {
            match timeout(limit, client.report_user_action(&record_id)).await {
                Ok(Ok(())) => debug!(%record_id, "Trust decision reported"),
                Ok(Err(e)) => warn!(%record_id, error = %e, "Failed to report trust decision"),
                Err(_) => warn!(%record_id, "Trust report timed out"),
            }
        });
    }

    /// Routes a tab and issues the single surface load.
    fn apply_route(
        &mut self,
        tab_id: TabId,
        generation: Generation,
        url: &str,
        verdict: Verdict,
        record_id: Option<&RecordId>,
    ) -> Result<()> {
        let destination = route(
            &RouteRequest {
                verdict,
                tab_id,
                url,
                record_id,
            },
            &self.config.blocked_surface_base,
        );

        let surface = self
            .registry
            .surface_mut(tab_id)
            .ok_or_else(|| Error::tab_not_found(tab_id))?;
        surface.load_url(destination.load_target());

        let mut patch = TabPatch::new().title_status(TitleStatus::Loading);
        if destination.is_blocked() {
            patch = patch.location(url);
        }
        self.registry.update(tab_id, patch)?;

        let blocked = destination.is_blocked();
        self.gate.resolve(tab_id, generation, blocked);
        debug!(tab_id = %tab_id, target = %destination.load_target(), blocked, "Route applied");
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn validate_destination(url: &str) -> Result<()> {
    let parsed =
        Url::parse(url).map_err(|e| Error::invalid_destination(url, e.to_string()))?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(Error::invalid_destination(url, "no host"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_destination() {
        assert!(validate_destination("https://example.com/path").is_ok());
        assert!(validate_destination("http://localhost:8080").is_ok());

        let err = validate_destination("example.com").unwrap_err();
        assert!(err.is_invalid_destination());
        assert!(validate_destination("mailto:someone@example.com").is_err());
        assert!(validate_destination("data:text/plain,hi").is_err());
    }
}
