//! The single authority keeping three things consistent per activity kind:
//! the platform notification, the persisted content state, and the remote
//! registration that lets push-delivered updates keep arriving.

use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use liveact_core::{ActivityKind, ContentState};

use crate::analytics::AnalyticsSink;
use crate::error::HandlingError;
use crate::id::IdAllocator;
use crate::notification::render;
use crate::platform::NotificationPlatform;
use crate::remote::RemoteRegistration;
use crate::store::ContentStateStore;

pub struct LiveActivityController {
    store: Arc<ContentStateStore>,
    notifications: Arc<dyn NotificationPlatform>,
    remote: Arc<dyn RemoteRegistration>,
    analytics: Arc<dyn AnalyticsSink>,
    ids: Arc<dyn IdAllocator>,
}

impl LiveActivityController {
    pub fn new(
        store: Arc<ContentStateStore>,
        notifications: Arc<dyn NotificationPlatform>,
        remote: Arc<dyn RemoteRegistration>,
        analytics: Arc<dyn AnalyticsSink>,
        ids: Arc<dyn IdAllocator>,
    ) -> Self {
        Self {
            store,
            notifications,
            remote,
            analytics,
            ids,
        }
    }

    /// Start a live activity: present it, track an analytics event, and
    /// register on the push backend to receive updates. Repeated creates
    /// simply re-render and re-register.
    pub async fn create(&self, state: ContentState) -> Result<(), HandlingError> {
        let kind = state.kind();

        self.update(state)?;

        self.analytics
            .log_custom(
                "live_activity_started",
                json!({
                    "activity": kind.identifier(),
                    "activityId": Uuid::new_v4().to_string(),
                }),
            )
            .await
            .map_err(HandlingError::Analytics)?;

        self.remote
            .register(kind)
            .await
            .map_err(HandlingError::Remote)?;

        tracing::debug!(kind = %kind, "live activity created");
        Ok(())
    }

    /// Render and post the notification for a state, then persist the state.
    ///
    /// Id reuse is keyed by tag equality only: if a notification tagged for
    /// this kind is showing, its id is reused so the update replaces in
    /// place rather than stacking.
    pub fn update(&self, state: ContentState) -> Result<(), HandlingError> {
        let kind = state.kind();
        let tag = kind.identifier();

        let id = self
            .notifications
            .active()
            .into_iter()
            .find(|active| active.tag == tag)
            .map(|active| active.id)
            .unwrap_or_else(|| self.ids.next());

        self.notifications.post(tag, id, render(&state));
        self.store.write(kind, Some(state))?;
        Ok(())
    }

    /// Dismiss every notification for a kind, clear the record, and end the
    /// registration on the push backend.
    ///
    /// Local effects come first: if the remote call fails, the system fails
    /// toward "locally absent" rather than leaving a zombie local record.
    pub async fn clear(&self, kind: ActivityKind) -> Result<(), HandlingError> {
        let tag = kind.identifier();

        for active in self.notifications.active() {
            if active.tag == tag {
                self.notifications.cancel(tag, active.id);
            }
        }

        self.store.write(kind, None)?;

        self.remote.end(kind).await.map_err(HandlingError::Remote)?;

        tracing::debug!(kind = %kind, "live activity cleared");
        Ok(())
    }

    /// Store passthrough. Used on final updates, where the record clears
    /// immediately while the notification stays until the scheduled clear.
    pub fn persist_state(
        &self,
        kind: ActivityKind,
        state: Option<ContentState>,
    ) -> Result<(), HandlingError> {
        self.store.write(kind, state)?;
        Ok(())
    }

    /// Repair remote registrations after a push token rotation. The store is
    /// the authority: every kind with a non-null record is re-registered; a
    /// kind with no active state never is.
    pub async fn on_token_changed(&self) -> Result<(), HandlingError> {
        for kind in ActivityKind::ALL {
            if self.store.read(kind)?.is_some() {
                self.remote
                    .register(kind)
                    .await
                    .map_err(HandlingError::Remote)?;
            }
        }
        Ok(())
    }
}
