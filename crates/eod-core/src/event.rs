//! Raw events as delivered by the public event feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single record from a user's public event feed.
///
/// Only the envelope is typed. The payload shape depends on `kind` and is
/// interpreted by the classifier, so unknown event types still deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    /// The event type tag, e.g. `PushEvent`.
    #[serde(rename = "type")]
    pub kind: String,
    /// When the event was recorded by the feed.
    pub created_at: DateTime<Utc>,
    /// The repository the event happened in.
    pub repo: EventRepo,
    /// Type-specific payload.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Repository reference attached to every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRepo {
    /// `owner/name`.
    pub name: String,
}

impl RawEvent {
    /// Returns the `owner/name` of the event's repository.
    pub fn repo_name(&self) -> &str {
        &self.repo.name
    }
}
