//! Reporting window filter.

use chrono::{DateTime, Duration, Utc};

/// Returns true if `created_at` falls inside the trailing `window` ending at `now`.
///
/// The lower edge is exclusive: an event exactly `window` old is dropped.
/// A window reaching past the earliest representable time admits everything.
pub fn is_recent(created_at: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> bool {
    now.checked_sub_signed(window)
        .is_none_or(|start| created_at > start)
}
