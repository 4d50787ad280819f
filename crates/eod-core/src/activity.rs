//! Aggregated activity log.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::classify::{ActivityEntry, classify};
use crate::event::RawEvent;
use crate::recency::is_recent;

/// One keyed line of the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// A flat bullet rendered as-is.
    Simple(String),
    /// Commits for one repository, grouped by branch.
    CommitGroup {
        repo: String,
        branches: Vec<BranchCommits>,
    },
}

impl LogEntry {
    /// The display key: bullet text or `owner/name`.
    pub fn key(&self) -> &str {
        match self {
            Self::Simple(text) => text,
            Self::CommitGroup { repo, .. } => repo,
        }
    }
}

/// Commit messages pushed to one branch, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchCommits {
    pub branch: String,
    pub messages: Vec<String>,
}

/// Insertion-ordered activity for a single run.
///
/// Keys are unique: repeating a bullet is a no-op and every commit for a
/// repository lands in that repository's group, whichever event carried it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
    index: HashMap<String, usize>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one classified entry into the log.
    pub fn add(&mut self, entry: ActivityEntry) {
        match entry {
            ActivityEntry::Simple { text } => {
                if self.index.contains_key(&text) {
                    tracing::trace!(%text, "collapsing repeated bullet");
                    return;
                }
                self.push(LogEntry::Simple(text));
            }
            ActivityEntry::Commit {
                repo,
                branch,
                message,
            } => {
                let position = match self.index.get(&repo).copied() {
                    Some(position) => position,
                    None => self.push(LogEntry::CommitGroup {
                        repo,
                        branches: Vec::new(),
                    }),
                };
                match &mut self.entries[position] {
                    LogEntry::CommitGroup { branches, .. } => {
                        match branches.iter_mut().find(|group| group.branch == branch) {
                            Some(group) => group.messages.push(message),
                            None => branches.push(BranchCommits {
                                branch,
                                messages: vec![message],
                            }),
                        }
                    }
                    LogEntry::Simple(text) => {
                        tracing::warn!(%text, "commit key collides with a bullet, dropping commit");
                    }
                }
            }
        }
    }

    /// Entries in first-insertion order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, entry: LogEntry) -> usize {
        let position = self.entries.len();
        self.index.insert(entry.key().to_string(), position);
        self.entries.push(entry);
        position
    }
}

impl Extend<ActivityEntry> for ActivityLog {
    fn extend<I: IntoIterator<Item = ActivityEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.add(entry);
        }
    }
}

/// Filters, classifies and aggregates one batch of events.
///
/// Events are processed in the order given, which fixes the order of the log.
pub fn collect_activity(events: &[RawEvent], now: DateTime<Utc>, window: Duration) -> ActivityLog {
    let mut log = ActivityLog::new();
    let mut in_window = 0usize;
    for event in events {
        if !is_recent(event.created_at, now, window) {
            continue;
        }
        in_window += 1;
        log.extend(classify(event));
    }
    tracing::debug!(
        total = events.len(),
        in_window,
        entries = log.len(),
        "collected activity"
    );
    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    use crate::event::EventRepo;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap()
    }

    fn commit(repo: &str, branch: &str, message: &str) -> ActivityEntry {
        ActivityEntry::Commit {
            repo: repo.to_string(),
            branch: branch.to_string(),
            message: message.to_string(),
        }
    }

    fn push_event(repo: &str, git_ref: &str, messages: &[&str], age: Duration) -> RawEvent {
        let commits: Vec<_> = messages.iter().map(|m| json!({"message": m})).collect();
        RawEvent {
            kind: "PushEvent".to_string(),
            created_at: now() - age,
            repo: EventRepo {
                name: repo.to_string(),
            },
            payload: json!({"ref": git_ref, "commits": commits}),
        }
    }

    fn opened_issue(title: &str, age: Duration) -> RawEvent {
        RawEvent {
            kind: "IssuesEvent".to_string(),
            created_at: now() - age,
            repo: EventRepo {
                name: "octocat/hello".to_string(),
            },
            payload: json!({
                "action": "opened",
                "issue": {"title": title, "html_url": "https://github.com/octocat/hello/issues/1"}
            }),
        }
    }

    #[test]
    fn repeated_bullets_collapse() {
        let mut log = ActivityLog::new();
        log.add(ActivityEntry::Simple {
            text: "Created an issue: [a](u)".to_string(),
        });
        log.add(ActivityEntry::Simple {
            text: "Created an issue: [a](u)".to_string(),
        });
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn keys_keep_first_insertion_order() {
        let mut log = ActivityLog::new();
        log.add(commit("repo/B", "main", "b1"));
        log.add(ActivityEntry::Simple {
            text: "Opened a pull request: [x](y)".to_string(),
        });
        log.add(commit("repo/A", "main", "a1"));
        log.add(commit("repo/B", "dev", "b2"));

        let keys: Vec<_> = log.entries().iter().map(LogEntry::key).collect();
        assert_eq!(keys, vec!["repo/B", "Opened a pull request: [x](y)", "repo/A"]);
    }

    #[test]
    fn commits_group_by_repo_and_branch() {
        let mut log = ActivityLog::new();
        log.extend([
            commit("repo/A", "main", "c1"),
            commit("repo/A", "dev", "d1"),
            commit("repo/A", "main", "c2"),
        ]);

        assert_eq!(
            log.entries(),
            &[LogEntry::CommitGroup {
                repo: "repo/A".to_string(),
                branches: vec![
                    BranchCommits {
                        branch: "main".to_string(),
                        messages: vec!["c1".to_string(), "c2".to_string()],
                    },
                    BranchCommits {
                        branch: "dev".to_string(),
                        messages: vec!["d1".to_string()],
                    },
                ],
            }]
        );
    }

    #[test]
    fn collect_merges_pushes_to_same_branch() {
        let events = vec![
            push_event("repo/A", "refs/heads/main", &["c1"], Duration::hours(3)),
            push_event("repo/A", "refs/heads/main", &["c2", "c3"], Duration::hours(1)),
        ];
        let log = collect_activity(&events, now(), Duration::hours(24));

        let [LogEntry::CommitGroup { repo, branches }] = log.entries() else {
            panic!("expected a single commit group, got {:?}", log.entries());
        };
        assert_eq!(repo, "repo/A");
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].messages, vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn collect_drops_events_outside_window() {
        let window = Duration::hours(24);
        let events = vec![
            opened_issue("stale", window),
            opened_issue("fresh", window - Duration::seconds(1)),
        ];
        let log = collect_activity(&events, now(), window);

        assert_eq!(log.len(), 1);
        assert!(log.entries()[0].key().contains("fresh"));
    }

    #[test]
    fn collect_collapses_identical_issues() {
        let events = vec![
            opened_issue("same", Duration::hours(2)),
            opened_issue("same", Duration::hours(1)),
        ];
        let log = collect_activity(&events, now(), Duration::hours(24));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn collect_ignores_unknown_types() {
        let mut watch = opened_issue("ignored", Duration::hours(1));
        watch.kind = "WatchEvent".to_string();
        let log = collect_activity(&[watch], now(), Duration::hours(24));
        assert!(log.is_empty());
    }

    #[test]
    fn collect_empty_input() {
        let log = collect_activity(&[], now(), Duration::hours(24));
        assert!(log.is_empty());
    }
}
