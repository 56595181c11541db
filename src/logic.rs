//! Core behaviors shared by the HTTP handlers.
//!
//! This includes:
//!   - Validating the username and running the fetch-then-cache flow
//!   - Restoring the persisted view for the frontend
//!   - Running the recommendation engine against the cached solved set
//!   - Enriching solved entries for display (catalog number + relative time)

use tracing::{info, instrument, warn};

use crate::catalog::Catalog;
use crate::domain::{Problem, SolvedEntry, UserState};
use crate::fetcher::FetchError;
use crate::protocol::SolvedItemOut;
use crate::recommend::{recommend, RecommendConfig};
use crate::state::AppState;
use crate::util::time_ago;

/// Validate the username, relay one fetch upstream, cap and persist the
/// result. The saved slot replaces whatever was cached before, wholesale.
#[instrument(level = "info", skip(state))]
pub async fn fetch_and_cache(state: &AppState, username: &str) -> Result<UserState, FetchError> {
  let username = username.trim();
  if username.is_empty() {
    // Validation failure; no network call is made.
    return Err(FetchError::EmptyUsername);
  }
  let Some(fetcher) = &state.fetcher else {
    return Err(FetchError::Transport("HTTP client unavailable".into()));
  };

  let recent_solved = fetcher.fetch_recent(username).await?;
  if recent_solved.is_empty() {
    info!(target: "fetch", %username, "No recent solves reported upstream");
  }

  let user = UserState {
    username: username.to_string(),
    recent_solved,
    selected_topics: None,
    selected_difficulty: None,
  };
  state.save_user(user.clone()).await;
  Ok(user)
}

/// Run the engine against the cached solved set. An empty slot behaves as an
/// empty solved set. Under the filter convention the selection is persisted
/// for the next session.
#[instrument(level = "info", skip(state, config))]
pub async fn recommend_for_user(state: &AppState, config: &RecommendConfig) -> Vec<Problem> {
  let solved: Vec<SolvedEntry> = state
    .user()
    .await
    .map(|u| u.recent_solved)
    .unwrap_or_default();

  if let RecommendConfig::ByFilter { topics, difficulty, .. } = config {
    state
      .save_filters(topics.iter().cloned().collect(), *difficulty)
      .await;
  }

  let mut rng = rand::thread_rng();
  let picks = recommend(&state.catalog, &solved, config, &mut rng);
  info!(target: "recommend", solved = solved.len(), picks = picks.len(), "Recommendations computed");
  picks.into_iter().cloned().collect()
}

/// Enrich raw solved entries for display: resolve the catalog number where
/// the slug exists, fall back to the raw title where it does not.
pub fn enrich_solved(catalog: &Catalog, entries: &[SolvedEntry], now_secs: i64) -> Vec<SolvedItemOut> {
  entries
    .iter()
    .map(|e| {
      let question_id = catalog
        .get(&e.slug)
        .map(|p| p.frontend_id.clone())
        .filter(|id| !id.is_empty());
      let label = match &question_id {
        Some(id) => format!("#{} - {}", id, e.title),
        None => e.title.clone(),
      };
      SolvedItemOut {
        title: e.title.clone(),
        slug: e.slug.clone(),
        timestamp: e.timestamp,
        question_id,
        label,
        solved_ago: time_ago(now_secs, e.timestamp),
      }
    })
    .collect()
}

/// Status line shown next to the solved list.
pub fn solved_status(username: &str, count: usize) -> String {
  if count == 0 {
    format!("No recent solves found for @{username}.")
  } else {
    format!("Showing recent solved problems for @{username}")
  }
}

/// Status line for the restored (cached) view.
pub fn cached_status(username: &str) -> String {
  format!("Loaded cached data for @{username}")
}

/// Shared mapping from fetch failures to a user-facing message. Transport and
/// malformed responses collapse into one generic line on purpose; the log
/// keeps the distinction, the client does not.
pub fn fetch_error_message(err: &FetchError) -> String {
  match err {
    FetchError::EmptyUsername => "Please enter a valid username.".into(),
    FetchError::Transport(e) => {
      warn!(target: "fetch", error = %e, "Fetch failed (transport)");
      "Error fetching data. Maybe the username is wrong or the platform is blocking us.".into()
    }
    FetchError::Malformed(e) => {
      warn!(target: "fetch", error = %e, "Fetch failed (malformed upstream body)");
      "Error fetching data. Maybe the username is wrong or the platform is blocking us.".into()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::AppConfig;
  use crate::domain::{Difficulty, Problem};
  use std::collections::BTreeSet;

  fn catalog_with_two_sum() -> Catalog {
    Catalog::from_problems(vec![Problem {
      frontend_id: "1".into(),
      title: "Two Sum".into(),
      slug: "two-sum".into(),
      difficulty: Difficulty::Easy,
      topics: BTreeSet::from(["Array".to_string()]),
      paid_only: false,
    }])
  }

  fn entry(title: &str, slug: &str, ts: i64) -> SolvedEntry {
    SolvedEntry { title: title.into(), slug: slug.into(), timestamp: ts }
  }

  #[test]
  fn enrichment_resolves_catalog_number() {
    let catalog = catalog_with_two_sum();
    let now = 1_700_000_000;
    let out = enrich_solved(&catalog, &[entry("Two Sum", "two-sum", now - 120)], now);
    assert_eq!(out[0].label, "#1 - Two Sum");
    assert_eq!(out[0].question_id.as_deref(), Some("1"));
    assert_eq!(out[0].solved_ago, "2 minutes ago");
  }

  #[test]
  fn enrichment_falls_back_to_raw_title_for_unknown_slugs() {
    let catalog = catalog_with_two_sum();
    let out = enrich_solved(&catalog, &[entry("Shiny New Problem", "shiny-new", 0)], 0);
    assert_eq!(out[0].label, "Shiny New Problem");
    assert!(out[0].question_id.is_none());
  }

  #[test]
  fn status_lines_distinguish_empty_results() {
    assert_eq!(solved_status("alice", 0), "No recent solves found for @alice.");
    assert_eq!(solved_status("alice", 3), "Showing recent solved problems for @alice");
  }

  #[tokio::test]
  async fn empty_username_is_rejected_before_any_network_io() {
    let state = AppState::new(AppConfig {
      catalog_path: "./missing.json".into(),
      user_state_path: std::env::temp_dir()
        .join(format!("leetbuddy-logic-{}.json", std::process::id()))
        .to_string_lossy()
        .into_owned(),
      upstream_url: "http://127.0.0.1:9/graphql".into(),
      ..AppConfig::default()
    });
    let err = fetch_and_cache(&state, "  ").await.expect_err("reject");
    assert!(matches!(err, FetchError::EmptyUsername));
    assert!(state.user().await.is_none(), "nothing may be cached on validation failure");
  }

  #[tokio::test]
  async fn recommend_with_empty_slot_uses_empty_solved_set() {
    let dir = std::env::temp_dir().join(format!("leetbuddy-logic-rec-{}", std::process::id()));
    let state = AppState::new(AppConfig {
      catalog_path: "./missing.json".into(),
      user_state_path: dir.join("user.json").to_string_lossy().into_owned(),
      ..AppConfig::default()
    });
    // Empty catalog + empty slot: pool is empty, output is empty, no error.
    let out = recommend_for_user(
      &state,
      &RecommendConfig::ByMode { mode: crate::recommend::Mode::Random },
    )
    .await;
    assert!(out.is_empty());
  }
}
