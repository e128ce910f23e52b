//! Periodic session revalidation
//!
//! Background task that re-checks an authenticated session whenever its
//! validation has gone stale.

use std::sync::{Arc, Weak};
use std::time::Duration;

use conex_domain::SessionConfig;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::manager::AuthManager;

/// Handle of a running revalidation task
///
/// Dropping the handle cancels the task.
#[derive(Debug)]
pub struct RevalidationHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RevalidationHandle {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancel the task and wait for it to finish.
    pub async fn stop(mut self) {
        self.cancel.cancel();

        if let Some(task) = self.task.take() {
            match tokio::time::timeout(Duration::from_secs(5), task).await {
                Ok(Ok(())) => info!("Session revalidation stopped"),
                Ok(Err(e)) => warn!("Revalidation task panicked: {}", e),
                Err(_) => warn!("Revalidation task did not complete within timeout"),
            }
        }
    }
}

impl Drop for RevalidationHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl AuthManager {
    /// Re-validate the session every `interval` while it is authenticated
    /// and stale
    ///
    /// The task holds only a weak reference and ends with the manager.
    /// Must be called from within a tokio runtime.
    pub fn spawn_revalidation(self: &Arc<Self>, interval: Duration) -> RevalidationHandle {
        let cancel = CancellationToken::new();
        let manager = Arc::downgrade(self);
        let task = tokio::spawn(revalidation_loop(manager, interval, cancel.clone()));
        info!(interval_secs = interval.as_secs(), "Session revalidation started");

        RevalidationHandle { cancel, task: Some(task) }
    }

    /// Start revalidation at the configured period
    ///
    /// Returns `None` when `revalidate_interval_seconds` is unset or zero.
    pub fn spawn_configured_revalidation(
        self: &Arc<Self>,
        config: &SessionConfig,
    ) -> Option<RevalidationHandle> {
        let Some(interval) = config.revalidate_interval() else {
            debug!("Background revalidation disabled");
            return None;
        };
        Some(self.spawn_revalidation(interval))
    }
}

async fn revalidation_loop(manager: Weak<AuthManager>, interval: Duration, cancel: CancellationToken) {
    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                debug!("Revalidation loop cancelled");
                break;
            }
            () = tokio::time::sleep(interval) => {
                let Some(manager) = manager.upgrade() else {
                    debug!("Session manager dropped; ending revalidation");
                    break;
                };

                if !manager.is_authenticated() {
                    continue;
                }
                if !manager.backend_has_session() {
                    // Tokens were cleared by a failed refresh.
                    debug!("Client session gone; settling state");
                    manager.logout().await;
                } else if manager.should_validate_token() {
                    debug!("Session validation stale; revalidating");
                    manager.validate_token().await;
                }
            }
        }
    }
}
