//! Event type enum as the single source of truth for feed type strings.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Feed event types that contribute to the digest.
///
/// Every other type string in the feed is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    PullRequestReview,
    Issues,
    PullRequest,
    Push,
}

impl EventType {
    /// The type tag used by the feed.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PullRequestReview => "PullRequestReviewEvent",
            Self::Issues => "IssuesEvent",
            Self::PullRequest => "PullRequestEvent",
            Self::Push => "PushEvent",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PullRequestReviewEvent" => Ok(Self::PullRequestReview),
            "IssuesEvent" => Ok(Self::Issues),
            "PullRequestEvent" => Ok(Self::PullRequest),
            "PushEvent" => Ok(Self::Push),
            _ => Err(UnknownEventType(s.to_string())),
        }
    }
}

/// Error type for type strings outside the dispatch table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown event type: {0}")]
pub struct UnknownEventType(pub String);
