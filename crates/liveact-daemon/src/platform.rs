//! Notification platform boundary.

use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::notification::RenderedNotification;

/// A notification currently showing, identified by (tag, id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveNotification {
    pub tag: String,
    pub id: i32,
}

/// The platform's notification surface. Posting with an existing (tag, id)
/// replaces in place. Assumed always-succeeds on the host platform, so the
/// operations are infallible.
pub trait NotificationPlatform: Send + Sync {
    fn post(&self, tag: &str, id: i32, notification: RenderedNotification);
    fn active(&self) -> Vec<ActiveNotification>;
    fn cancel(&self, tag: &str, id: i32);
}

/// In-process notification surface: a mutex-guarded list of what is
/// currently "showing". Used by the daemon binary and by tests.
#[derive(Debug, Default)]
pub struct InMemoryNotifications {
    showing: Mutex<Vec<(ActiveNotification, RenderedNotification)>>,
}

impl InMemoryNotifications {
    /// Rendered content currently showing under a tag, for inspection.
    pub fn rendered(&self, tag: &str) -> Vec<RenderedNotification> {
        self.lock()
            .iter()
            .filter(|(active, _)| active.tag == tag)
            .map(|(_, rendered)| rendered.clone())
            .collect()
    }

    fn lock(
        &self,
    ) -> std::sync::MutexGuard<'_, Vec<(ActiveNotification, RenderedNotification)>> {
        self.showing.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationPlatform for InMemoryNotifications {
    fn post(&self, tag: &str, id: i32, notification: RenderedNotification) {
        let mut showing = self.lock();
        let key = ActiveNotification {
            tag: tag.to_string(),
            id,
        };
        match showing.iter_mut().find(|(active, _)| *active == key) {
            Some((_, existing)) => *existing = notification,
            None => showing.push((key, notification)),
        }
    }

    fn active(&self) -> Vec<ActiveNotification> {
        self.lock().iter().map(|(active, _)| active.clone()).collect()
    }

    fn cancel(&self, tag: &str, id: i32) {
        self.lock()
            .retain(|(active, _)| !(active.tag == tag && active.id == id));
    }
}
