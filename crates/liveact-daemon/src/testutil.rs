//! Recording fakes and a controller harness shared by unit tests.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use liveact_core::{
    ActivityKind, BrewPhase, CoffeeBrewerContentState, ContentState, OrderContentState,
    OrderStatus,
};

use crate::analytics::AnalyticsSink;
use crate::controller::LiveActivityController;
use crate::dismissal::DismissalScheduler;
use crate::id::AtomicIdAllocator;
use crate::platform::InMemoryNotifications;
use crate::remote::RemoteRegistration;
use crate::store::ContentStateStore;

pub fn brewing(phase: BrewPhase, remaining: u32) -> ContentState {
    ContentState::CoffeeBrewer(CoffeeBrewerContentState { phase, remaining })
}

pub fn order(status: OrderStatus) -> ContentState {
    ContentState::Order(OrderContentState { status })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCall {
    Register(ActivityKind),
    End(ActivityKind),
}

/// Records registration calls; `end` can be made to fail.
#[derive(Default)]
pub struct RecordingRegistration {
    calls: Mutex<Vec<RemoteCall>>,
    fail_end: Mutex<bool>,
}

impl RecordingRegistration {
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn fail_end(&self) {
        *self.fail_end.lock().unwrap_or_else(PoisonError::into_inner) = true;
    }
}

#[async_trait]
impl RemoteRegistration for RecordingRegistration {
    async fn register(&self, kind: ActivityKind) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RemoteCall::Register(kind));
        Ok(())
    }

    async fn end(&self, kind: ActivityKind) -> anyhow::Result<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RemoteCall::End(kind));
        if *self.fail_end.lock().unwrap_or_else(PoisonError::into_inner) {
            anyhow::bail!("push backend unreachable");
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<(String, Value)>>,
}

impl RecordingAnalytics {
    pub fn events(&self) -> Vec<(String, Value)> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl AnalyticsSink for RecordingAnalytics {
    async fn log_custom(&self, event: &str, data: Value) -> anyhow::Result<()> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((event.to_string(), data));
        Ok(())
    }
}

/// Records scheduled dismissals instead of spawning timers.
#[derive(Default)]
pub struct RecordingScheduler {
    scheduled: Mutex<Vec<(ActivityKind, Duration)>>,
}

impl RecordingScheduler {
    pub fn scheduled(&self) -> Vec<(ActivityKind, Duration)> {
        self.scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl DismissalScheduler for RecordingScheduler {
    fn schedule(&self, kind: ActivityKind, delay: Duration) {
        self.scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((kind, delay));
    }
}

/// A controller wired to an in-memory store and recording collaborators.
pub struct Harness {
    pub controller: Arc<LiveActivityController>,
    pub store: Arc<ContentStateStore>,
    pub notifications: Arc<InMemoryNotifications>,
    pub remote: Arc<RecordingRegistration>,
    pub analytics: Arc<RecordingAnalytics>,
}

pub fn harness() -> Harness {
    let store = Arc::new(
        ContentStateStore::open_in_memory().expect("in-memory store should open"),
    );
    let notifications = Arc::new(InMemoryNotifications::default());
    let remote = Arc::new(RecordingRegistration::default());
    let analytics = Arc::new(RecordingAnalytics::default());

    let controller = Arc::new(LiveActivityController::new(
        Arc::clone(&store),
        notifications.clone(),
        remote.clone(),
        analytics.clone(),
        Arc::new(AtomicIdAllocator::default()),
    ));

    Harness {
        controller,
        store,
        notifications,
        remote,
        analytics,
    }
}
