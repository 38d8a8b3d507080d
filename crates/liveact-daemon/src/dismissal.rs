//! Scheduled dismissal of final live activities.

use std::sync::Arc;
use std::time::Duration;

use liveact_core::ActivityKind;

use crate::controller::LiveActivityController;

/// Schedules a delayed one-shot clear for a kind. Injected so tests can
/// observe scheduling without real timers.
pub trait DismissalScheduler: Send + Sync {
    fn schedule(&self, kind: ActivityKind, delay: Duration);
}

/// Spawns a sleeping task that force-clears the kind once the delay elapses.
///
/// The task fires unconditionally; it does not check whether the state
/// changed since scheduling. `clear` is safe to call redundantly, so a stale
/// worker firing late performs a harmless no-op. A previously scheduled
/// worker is never cancelled when a newer update supersedes it.
pub struct TokioDismissalScheduler {
    controller: Arc<LiveActivityController>,
}

impl TokioDismissalScheduler {
    pub fn new(controller: Arc<LiveActivityController>) -> Self {
        Self { controller }
    }
}

impl DismissalScheduler for TokioDismissalScheduler {
    fn schedule(&self, kind: ActivityKind, delay: Duration) {
        tracing::debug!(kind = %kind, delay_secs = delay.as_secs(), "dismissal scheduled");

        let controller = Arc::clone(&self.controller);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(error) = controller.clear(kind).await {
                tracing::warn!(kind = %kind, error = %error, "scheduled dismissal failed");
            }
        });
    }
}
