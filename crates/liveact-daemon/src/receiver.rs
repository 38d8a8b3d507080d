//! Inbound boundary: dispatches push-delivered events to the controller.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;

use liveact_core::dismissal::dismissal_delay;
use liveact_core::{ActivityKind, ContentState, DecodeError, PushEvent};

use crate::controller::LiveActivityController;
use crate::dismissal::DismissalScheduler;
use crate::error::HandlingError;

/// Dispatch core for one inbound event. Pure of scheduling concerns beyond
/// the injected scheduler, so it is testable without real timers.
pub struct EventHandler {
    controller: Arc<LiveActivityController>,
    scheduler: Arc<dyn DismissalScheduler>,
}

impl EventHandler {
    pub fn new(
        controller: Arc<LiveActivityController>,
        scheduler: Arc<dyn DismissalScheduler>,
    ) -> Self {
        Self {
            controller,
            scheduler,
        }
    }

    pub async fn handle(&self, event: PushEvent) -> Result<(), HandlingError> {
        match event {
            PushEvent::Dismiss { activity } => {
                let kind = resolve_kind(activity)?;
                self.controller.clear(kind).await
            }
            PushEvent::SubscriptionChanged => self.controller.on_token_changed().await,
            PushEvent::LiveActivityUpdate {
                activity,
                content,
                is_final,
                dismissal_date,
            } => {
                let kind = resolve_kind(activity)?;
                let state = ContentState::decode(kind, content)?;

                self.controller.update(state)?;

                if is_final {
                    let delay = dismissal_delay(dismissal_date, Utc::now());
                    self.scheduler.schedule(kind, delay);

                    // The backing record clears now; the notification itself
                    // is left showing so that the scheduled worker's clear is
                    // what eventually removes it.
                    self.controller.persist_state(kind, None)?;
                }

                Ok(())
            }
        }
    }
}

fn resolve_kind(activity: String) -> Result<ActivityKind, DecodeError> {
    ActivityKind::from_identifier(&activity).ok_or(DecodeError::UnknownKind(activity))
}

/// Drains the push event channel. Handling of one event is fire-and-forget
/// relative to delivery: each event runs on its own task, and failures are
/// logged, never propagated back to the delivery source.
pub struct PushReceiver {
    handler: Arc<EventHandler>,
    rx: mpsc::Receiver<PushEvent>,
}

impl PushReceiver {
    pub fn new(handler: Arc<EventHandler>, rx: mpsc::Receiver<PushEvent>) -> Self {
        Self { handler, rx }
    }

    pub async fn run(&mut self) {
        while let Some(event) = self.rx.recv().await {
            let handler = Arc::clone(&self.handler);
            tokio::spawn(async move {
                match handler.handle(event).await {
                    Ok(()) => {}
                    // Undecodable events are dropped silently; the server
                    // resends full state on a later push.
                    Err(HandlingError::Decode(error)) => {
                        tracing::debug!(error = %error, "dropped undecodable push event");
                    }
                    Err(error) => {
                        tracing::warn!(error = %error, "push event handling failed");
                    }
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::NotificationPlatform;
    use crate::testutil::{brewing, harness, order, Harness, RecordingScheduler, RemoteCall};
    use chrono::TimeDelta;
    use liveact_core::dismissal::DEFAULT_DISMISSAL;
    use liveact_core::{BrewPhase, OrderStatus};
    use serde_json::json;
    use std::time::Duration;

    fn handler_for(harness: &Harness) -> (EventHandler, Arc<RecordingScheduler>) {
        let scheduler = Arc::new(RecordingScheduler::default());
        let handler = EventHandler::new(Arc::clone(&harness.controller), scheduler.clone());
        (handler, scheduler)
    }

    fn update_event(
        activity: &str,
        content: serde_json::Value,
        is_final: bool,
        dismissal_date: Option<chrono::DateTime<Utc>>,
    ) -> PushEvent {
        PushEvent::LiveActivityUpdate {
            activity: activity.to_string(),
            content,
            is_final,
            dismissal_date,
        }
    }

    #[tokio::test]
    async fn dismiss_event_clears_the_activity() {
        let h = harness();
        let (handler, _) = handler_for(&h);

        h.controller.update(brewing(BrewPhase::Brewing, 3)).unwrap();

        handler
            .handle(PushEvent::Dismiss {
                activity: "coffee-brewer".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(h.store.read(ActivityKind::CoffeeBrewer).unwrap(), None);
        assert!(h.notifications.active().is_empty());
    }

    #[tokio::test]
    async fn dismiss_for_unknown_activity_is_a_decode_error() {
        let h = harness();
        let (handler, _) = handler_for(&h);

        let result = handler
            .handle(PushEvent::Dismiss {
                activity: "pizza-tracker".to_string(),
            })
            .await;

        assert!(matches!(result, Err(HandlingError::Decode(_))));
    }

    #[tokio::test]
    async fn subscription_change_triggers_token_resync() {
        let h = harness();
        let (handler, _) = handler_for(&h);

        // OrderStatus=null, CoffeeBrewer=Grinding: exactly one re-registration.
        h.store
            .write(ActivityKind::CoffeeBrewer, Some(brewing(BrewPhase::Grinding, 5)))
            .unwrap();

        handler.handle(PushEvent::SubscriptionChanged).await.unwrap();

        assert_eq!(
            h.remote.calls(),
            vec![RemoteCall::Register(ActivityKind::CoffeeBrewer)]
        );
    }

    #[tokio::test]
    async fn update_event_posts_and_persists() {
        let h = harness();
        let (handler, scheduler) = handler_for(&h);

        handler
            .handle(update_event(
                "order-status",
                json!({"status": "SHIPPED"}),
                false,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(
            h.store.read(ActivityKind::OrderStatus).unwrap(),
            Some(order(OrderStatus::Shipped))
        );
        assert_eq!(h.notifications.active().len(), 1);
        assert!(scheduler.scheduled().is_empty(), "non-final updates never schedule");
    }

    #[tokio::test]
    async fn malformed_content_is_a_decode_error_and_changes_nothing() {
        let h = harness();
        let (handler, scheduler) = handler_for(&h);

        let result = handler
            .handle(update_event(
                "coffee-brewer",
                json!({"status": "SHIPPED"}),
                true,
                None,
            ))
            .await;

        assert!(matches!(result, Err(HandlingError::Decode(_))));
        assert_eq!(h.store.read(ActivityKind::CoffeeBrewer).unwrap(), None);
        assert!(h.notifications.active().is_empty());
        assert!(scheduler.scheduled().is_empty());
    }

    #[tokio::test]
    async fn final_update_schedules_clear_and_nulls_the_record_immediately() {
        let h = harness();
        let (handler, scheduler) = handler_for(&h);

        handler
            .handle(update_event(
                "coffee-brewer",
                json!({"state": "SERVED", "remaining": 0}),
                true,
                Some(Utc::now() + TimeDelta::seconds(10)),
            ))
            .await
            .unwrap();

        let scheduled = scheduler.scheduled();
        assert_eq!(scheduled.len(), 1);
        let (kind, delay) = scheduled[0];
        assert_eq!(kind, ActivityKind::CoffeeBrewer);
        assert!(delay <= Duration::from_secs(10));
        assert!(delay >= Duration::from_secs(9), "delay was {delay:?}");

        // Record is already null, but the notification keeps showing until
        // the scheduled clear runs.
        assert_eq!(h.store.read(ActivityKind::CoffeeBrewer).unwrap(), None);
        assert_eq!(h.notifications.active().len(), 1);
    }

    #[tokio::test]
    async fn final_update_with_past_deadline_schedules_immediately() {
        let h = harness();
        let (handler, scheduler) = handler_for(&h);

        handler
            .handle(update_event(
                "order-status",
                json!({"status": "DELIVERED"}),
                true,
                Some(Utc::now() - TimeDelta::minutes(1)),
            ))
            .await
            .unwrap();

        assert_eq!(
            scheduler.scheduled(),
            vec![(ActivityKind::OrderStatus, Duration::ZERO)]
        );
    }

    #[tokio::test]
    async fn final_update_without_deadline_uses_the_default_delay() {
        let h = harness();
        let (handler, scheduler) = handler_for(&h);

        handler
            .handle(update_event(
                "order-status",
                json!({"status": "DELIVERED"}),
                true,
                None,
            ))
            .await
            .unwrap();

        assert_eq!(
            scheduler.scheduled(),
            vec![(ActivityKind::OrderStatus, DEFAULT_DISMISSAL)]
        );
    }

    #[tokio::test]
    async fn run_loop_survives_failing_events() {
        let h = harness();
        let (handler, _) = handler_for(&h);
        let handler = Arc::new(handler);

        let (tx, rx) = mpsc::channel(8);
        let mut receiver = PushReceiver::new(Arc::clone(&handler), rx);
        let receiver_task = tokio::spawn(async move { receiver.run().await });

        // An undecodable event followed by a valid one.
        tx.send(update_event("pizza-tracker", json!({}), false, None))
            .await
            .unwrap();
        tx.send(update_event(
            "coffee-brewer",
            json!({"state": "GRINDING", "remaining": 5}),
            false,
            None,
        ))
        .await
        .unwrap();
        drop(tx);

        receiver_task.await.unwrap();
        // Spawned handler tasks are fire-and-forget; give them a few turns.
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        assert_eq!(
            h.store.read(ActivityKind::CoffeeBrewer).unwrap(),
            Some(brewing(BrewPhase::Grinding, 5))
        );
    }
}
