//! GitHub REST integration for the end-of-day digest.
//!
//! Fetches a user's public event feed and decodes it into [`RawEvent`]s.
//! Individual events that don't decode are skipped so one odd record never
//! costs the whole batch.

use std::fmt;
use std::time::Duration;

use eod_core::RawEvent;
use reqwest::{StatusCode, Url};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use thiserror::Error;

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("eod/", env!("CARGO_PKG_VERSION"));

/// GitHub client errors.
#[derive(Debug, Error)]
pub enum GithubError {
    /// The provided token was invalid.
    #[error("invalid token: {reason}")]
    InvalidToken { reason: &'static str },
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// HTTP request failed.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// API returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },
    /// The configured API root is not a usable base URL.
    #[error("invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    /// Failed to parse response.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// GitHub REST client.
///
/// Holds the bearer token and a connection pool. Cloning shares the pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new client with the given bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is empty or whitespace-only, or if
    /// the HTTP client fails to build.
    pub fn new(token: impl Into<String>) -> Result<Self, GithubError> {
        let token = token.into();

        if token.is_empty() {
            return Err(GithubError::InvalidToken {
                reason: "token cannot be empty",
            });
        }
        if token.trim().is_empty() {
            return Err(GithubError::InvalidToken {
                reason: "token cannot be whitespace-only",
            });
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(GithubError::ClientBuild)?;

        Ok(Self {
            http,
            token,
            base_url: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Points the client at a different API root, e.g. a GitHub Enterprise host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The URL of a user's public event feed.
    ///
    /// The username is a single escaped path segment.
    pub fn events_url(&self, username: &str) -> Result<Url, GithubError> {
        let invalid = |reason: String| GithubError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };
        let mut url = Url::parse(&self.base_url).map_err(|err| invalid(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["users", username, "events"]);
        Ok(url)
    }

    /// Fetches the most recent page of events for `username`.
    ///
    /// A single attempt; no retries and no pagination.
    pub async fn fetch_events(&self, username: &str) -> Result<Vec<RawEvent>, GithubError> {
        let url = self.events_url(username)?;
        tracing::debug!(%url, "fetching events");

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(parse_api_error(status, &body).unwrap_or_else(|| GithubError::Api {
                status,
                message: body,
            }));
        }

        parse_events(&body)
    }
}

/// Decodes a feed response body.
///
/// The body must be a JSON array. Elements that fail to decode are skipped.
pub fn parse_events(body: &str) -> Result<Vec<RawEvent>, GithubError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|err| GithubError::InvalidResponse(err.to_string()))?;

    let total = values.len();
    let events: Vec<RawEvent> = values
        .into_iter()
        .enumerate()
        .filter_map(|(position, value)| match serde_json::from_value(value) {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::debug!(position, %err, "skipping undecodable event");
                None
            }
        })
        .collect();

    tracing::debug!(total, decoded = events.len(), "parsed event feed");
    Ok(events)
}

fn parse_api_error(status: StatusCode, body: &str) -> Option<GithubError> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        message: String,
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| GithubError::Api {
            status,
            message: payload.message,
        })
}
