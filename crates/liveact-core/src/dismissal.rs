//! Dismissal delay computation for final updates.

use std::time::Duration;

use chrono::{DateTime, Utc};

/// How long a final notification stays visible when the server did not
/// provide a dismissal date: 4 hours.
pub const DEFAULT_DISMISSAL: Duration = Duration::from_secs(4 * 60 * 60);

/// Delay until a final update's notification should be force-cleared.
///
/// `max(0, dismissal_date - now)` when a date is present, never negative;
/// [`DEFAULT_DISMISSAL`] otherwise.
pub fn dismissal_delay(dismissal_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Duration {
    match dismissal_date {
        Some(date) => (date - now).to_std().unwrap_or(Duration::ZERO),
        None => DEFAULT_DISMISSAL,
    }
}
