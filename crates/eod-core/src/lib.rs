//! Core domain logic for the end-of-day digest.
//!
//! This crate contains the fundamental types and logic for:
//! - Events: the envelope of a public feed record
//! - Classification: mapping feed events to activity entries
//! - Aggregation: folding entries into an ordered activity log

mod activity;
pub mod classify;
pub mod event;
pub mod event_type;
mod recency;

pub use activity::{ActivityLog, BranchCommits, LogEntry, collect_activity};
pub use classify::{ActivityEntry, classify};
pub use event::{EventRepo, RawEvent};
pub use event_type::{EventType, UnknownEventType};
pub use recency::is_recent;
