use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event delivered by the push boundary.
///
/// Wire format is newline-delimited JSON, tagged by `type`:
///
/// ```json
/// {"type":"dismiss","activity":"coffee-brewer"}
/// {"type":"subscription-changed"}
/// {"type":"live-activity-update","activity":"order-status",
///  "content":{"status":"DELIVERED"},"final":true,
///  "dismissalDate":"2026-08-30T12:00:00Z"}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PushEvent {
    /// Platform-originated dismiss intent (user swiped the notification away).
    Dismiss { activity: String },
    /// The underlying push token rotated; remote registrations must be
    /// repaired against the local store.
    SubscriptionChanged,
    /// Server-initiated update to a live activity's content.
    #[serde(rename_all = "camelCase")]
    LiveActivityUpdate {
        activity: String,
        content: Value,
        /// The last update of the session; triggers scheduled cleanup.
        #[serde(rename = "final", default)]
        is_final: bool,
        /// When the final notification should be removed. Absent means the
        /// default dismissal delay applies.
        #[serde(default)]
        dismissal_date: Option<DateTime<Utc>>,
    },
}
