//! Turns feed events into normalized activity entries.
//!
//! Each supported event type has its own payload shape. Payloads are decoded
//! into typed structs; a payload that doesn't fit its shape yields no entries
//! so one bad event never sinks the whole report.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::event::RawEvent;
use crate::event_type::EventType;

const OPENED: &str = "opened";

/// One unit of activity produced by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityEntry {
    /// A one-line bullet (review, new issue, new pull request).
    Simple { text: String },
    /// A single commit pushed to `repo` on `branch`.
    Commit {
        repo: String,
        branch: String,
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct User {
    login: String,
}

#[derive(Debug, Deserialize)]
struct PullRequest {
    title: String,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct ReviewedPullRequest {
    title: String,
    html_url: String,
    user: User,
}

#[derive(Debug, Deserialize)]
struct Issue {
    title: String,
    html_url: String,
}

#[derive(Debug, Deserialize)]
struct ReviewPayload {
    pull_request: ReviewedPullRequest,
}

#[derive(Debug, Deserialize)]
struct IssuesPayload {
    action: Option<String>,
    issue: Option<Issue>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    action: Option<String>,
    pull_request: Option<PullRequest>,
}

#[derive(Debug, Deserialize)]
struct PushPayload {
    #[serde(rename = "ref")]
    git_ref: String,
    #[serde(default)]
    commits: Vec<PushCommit>,
}

#[derive(Debug, Deserialize)]
struct PushCommit {
    message: String,
}

/// Classifies a single event.
///
/// Returns an empty list for unknown types, filtered actions, and payloads
/// missing the fields the rule needs. Push events yield one entry per commit
/// in payload order.
pub fn classify(event: &RawEvent) -> Vec<ActivityEntry> {
    let Ok(event_type) = event.kind.parse::<EventType>() else {
        tracing::trace!(kind = %event.kind, "ignoring event type");
        return Vec::new();
    };

    match event_type {
        EventType::PullRequestReview => decode::<ReviewPayload>(event)
            .map(|payload| {
                let pr = payload.pull_request;
                vec![simple(format!(
                    "Reviewed a pull request: [{}]({}) by _{}_",
                    pr.title, pr.html_url, pr.user.login
                ))]
            })
            .unwrap_or_default(),
        EventType::Issues => decode::<IssuesPayload>(event)
            .and_then(|payload| opened(payload.action.as_deref(), payload.issue))
            .map(|issue| {
                vec![simple(format!(
                    "Created an issue: [{}]({})",
                    issue.title, issue.html_url
                ))]
            })
            .unwrap_or_default(),
        EventType::PullRequest => decode::<PullRequestPayload>(event)
            .and_then(|payload| opened(payload.action.as_deref(), payload.pull_request))
            .map(|pr| {
                vec![simple(format!(
                    "Opened a pull request: [{}]({})",
                    pr.title, pr.html_url
                ))]
            })
            .unwrap_or_default(),
        EventType::Push => decode::<PushPayload>(event)
            .map(|payload| {
                let branch = branch_name(&payload.git_ref);
                payload
                    .commits
                    .into_iter()
                    .map(|commit| ActivityEntry::Commit {
                        repo: event.repo_name().to_string(),
                        branch: branch.to_string(),
                        message: commit.message,
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Extracts the branch name from a git ref: the last `/`-delimited segment.
///
/// `refs/heads/feature/x` yields `x`.
pub fn branch_name(git_ref: &str) -> &str {
    git_ref
        .split('/')
        .rfind(|segment| !segment.is_empty())
        .unwrap_or(git_ref)
}

fn opened<T>(action: Option<&str>, subject: Option<T>) -> Option<T> {
    subject.filter(|_| action == Some(OPENED))
}

fn decode<T: DeserializeOwned>(event: &RawEvent) -> Option<T> {
    match serde_json::from_value(event.payload.clone()) {
        Ok(payload) => Some(payload),
        Err(err) => {
            tracing::debug!(kind = %event.kind, repo = %event.repo_name(), %err, "skipping malformed payload");
            None
        }
    }
}

fn simple(text: String) -> ActivityEntry {
    ActivityEntry::Simple { text }
}
