//! Submission Fetcher: relays the fixed `recentAcSubmissions` GraphQL query
//! to the upstream practice platform.
//!
//! One request per user action, no retry, no backoff. The client carries a
//! hard timeout so a hung upstream surfaces as a transport error instead of
//! leaving the caller stuck in "fetching" forever.
//!
//! Calls are instrumented and log latencies and list sizes, never payloads.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::AppConfig;
use crate::domain::SolvedEntry;
use crate::util::trunc_for_log;

const RECENT_AC_QUERY: &str = r#"
query recentAcSubmissions($username: String!) {
  recentAcSubmissionList(username: $username) {
    title
    titleSlug
    timestamp
  }
}
"#;

/// Why a fetch produced no solved list.
#[derive(Debug)]
pub enum FetchError {
  /// Rejected before any network I/O.
  EmptyUsername,
  /// Connection, timeout, or non-success HTTP status.
  Transport(String),
  /// Body arrived but was not decodable into the expected shape.
  Malformed(String),
}

impl fmt::Display for FetchError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FetchError::EmptyUsername => write!(f, "username must not be empty"),
      FetchError::Transport(e) => write!(f, "upstream request failed: {e}"),
      FetchError::Malformed(e) => write!(f, "upstream response malformed: {e}"),
    }
  }
}

impl std::error::Error for FetchError {}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
  #[serde(rename = "operationName")]
  operation_name: &'a str,
  variables: Variables<'a>,
  query: &'a str,
}

#[derive(Serialize)]
struct Variables<'a> {
  username: &'a str,
}

#[derive(Deserialize)]
struct GraphqlResponse {
  #[serde(default)]
  data: Option<RecentData>,
}

#[derive(Deserialize)]
struct RecentData {
  #[serde(rename = "recentAcSubmissionList", default)]
  recent_ac_submission_list: Option<Vec<SolvedEntry>>,
}

/// Thin client over the upstream GraphQL endpoint.
#[derive(Clone)]
pub struct Fetcher {
  client: reqwest::Client,
  endpoint: String,
  max_recent: usize,
}

impl Fetcher {
  /// Construct the client; `None` only if the HTTP client cannot be built.
  pub fn new(config: &AppConfig) -> Option<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.fetch_timeout_secs))
      .build()
      .ok()?;
    Some(Self {
      client,
      endpoint: config.upstream_url.clone(),
      max_recent: config.max_recent,
    })
  }

  /// Fetch the recent accepted submissions for `username`, newest first,
  /// capped at the configured maximum. An absent list in an otherwise
  /// well-formed response means the user has no recent solves.
  #[instrument(level = "info", skip(self), fields(endpoint = %self.endpoint))]
  pub async fn fetch_recent(&self, username: &str) -> Result<Vec<SolvedEntry>, FetchError> {
    let username = username.trim();
    if username.is_empty() {
      return Err(FetchError::EmptyUsername);
    }

    let body = GraphqlRequest {
      operation_name: "recentAcSubmissions",
      variables: Variables { username },
      query: RECENT_AC_QUERY,
    };

    let started = Instant::now();
    let resp = self
      .client
      .post(&self.endpoint)
      .json(&body)
      .send()
      .await
      .map_err(|e| {
        error!(target: "fetch", %username, error = %e, "Upstream request failed");
        FetchError::Transport(e.to_string())
      })?;

    let status = resp.status();
    if !status.is_success() {
      error!(target: "fetch", %username, %status, "Upstream returned non-success status");
      return Err(FetchError::Transport(format!("HTTP {status}")));
    }

    let text = resp.text().await.map_err(|e| {
      error!(target: "fetch", %username, error = %e, "Failed reading upstream body");
      FetchError::Transport(e.to_string())
    })?;

    let parsed: GraphqlResponse = serde_json::from_str(&text).map_err(|e| {
      error!(target: "fetch", %username, error = %e, body = %trunc_for_log(&text, 200), "Upstream body undecodable");
      FetchError::Malformed(e.to_string())
    })?;

    let mut entries = parsed
      .data
      .and_then(|d| d.recent_ac_submission_list)
      .unwrap_or_default();
    entries.truncate(self.max_recent);

    info!(
      target: "fetch",
      %username,
      count = entries.len(),
      elapsed_ms = started.elapsed().as_millis() as u64,
      "Recent submissions fetched"
    );
    Ok(entries)
  }
}
