//! Application state: the load-once catalog, the upstream fetcher, and the
//! single-slot persisted user state.
//!
//! This module owns:
//!   - the `Catalog` (read-only after construction)
//!   - the optional `Fetcher` (absent only if the HTTP client cannot build)
//!   - the user slot behind an async RwLock, mirrored to one JSON file
//!
//! The slot is overwritten wholesale on every save. `save_filters` is the one
//! partial update and it spreads the prior state explicitly.

use std::path::Path;

use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::domain::{DifficultyFilter, UserState};
use crate::fetcher::Fetcher;

pub struct AppState {
    pub catalog: Catalog,
    pub config: AppConfig,
    pub fetcher: Option<Fetcher>,
    user: RwLock<Option<UserState>>,
}

impl AppState {
    /// Build state from config: load the catalog once, restore the persisted
    /// user slot if present, construct the upstream client.
    #[instrument(level = "info", skip_all)]
    pub fn new(config: AppConfig) -> Self {
        let catalog = Catalog::load(&config.catalog_path);
        info!(target: "leetbuddy_backend", problems = catalog.len(), "Catalog loaded");

        let user = load_user_state(&config.user_state_path);
        if let Some(u) = &user {
            info!(target: "leetbuddy_backend", username = %u.username, solved = u.recent_solved.len(), "Restored cached user state");
        }

        let fetcher = Fetcher::new(&config);
        if fetcher.is_none() {
            error!(target: "leetbuddy_backend", "HTTP client construction failed; fetches will be unavailable");
        }

        Self {
            catalog,
            config,
            fetcher,
            user: RwLock::new(user),
        }
    }

    /// Snapshot of the current user slot.
    pub async fn user(&self) -> Option<UserState> {
        self.user.read().await.clone()
    }

    /// Replace the slot and rewrite the file wholesale.
    #[instrument(level = "debug", skip(self, state), fields(username = %state.username))]
    pub async fn save_user(&self, state: UserState) {
        persist_user_state(&self.config.user_state_path, &state);
        *self.user.write().await = Some(state);
    }

    /// Store a new filter selection, spreading the prior state so the
    /// username and solved list survive. No-op when the slot is empty.
    #[instrument(level = "debug", skip(self, topics))]
    pub async fn save_filters(&self, topics: Vec<String>, difficulty: DifficultyFilter) {
        let mut slot = self.user.write().await;
        let Some(prev) = slot.as_ref() else {
            return;
        };
        let next = UserState {
            selected_topics: Some(topics),
            selected_difficulty: Some(difficulty),
            ..prev.clone()
        };
        persist_user_state(&self.config.user_state_path, &next);
        *slot = Some(next);
    }
}

/// Read the persisted slot. Missing or corrupt file means starting empty.
fn load_user_state(path: &str) -> Option<UserState> {
    let text = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<UserState>(&text) {
        Ok(state) => Some(state),
        Err(e) => {
            warn!(target: "leetbuddy_backend", %path, error = %e, "Persisted user state unreadable; starting empty");
            None
        }
    }
}

/// Rewrite the slot file wholesale. Failure is logged and non-fatal: the
/// in-memory slot still updates, only cross-session restore is lost.
fn persist_user_state(path: &str, state: &UserState) {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                error!(target: "leetbuddy_backend", %path, error = %e, "Could not create state directory");
                return;
            }
        }
    }
    match serde_json::to_string_pretty(state) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                error!(target: "leetbuddy_backend", %path, error = %e, "Could not write user state");
            }
        }
        Err(e) => {
            error!(target: "leetbuddy_backend", %path, error = %e, "Could not serialize user state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SolvedEntry;

    fn temp_config(tag: &str) -> AppConfig {
        let dir = std::env::temp_dir().join(format!("leetbuddy-state-{}-{}", tag, std::process::id()));
        AppConfig {
            catalog_path: dir.join("missing_catalog.json").to_string_lossy().into_owned(),
            user_state_path: dir.join("user_state.json").to_string_lossy().into_owned(),
            ..AppConfig::default()
        }
    }

    fn sample_state() -> UserState {
        UserState {
            username: "alice".into(),
            recent_solved: vec![
                SolvedEntry { title: "Two Sum".into(), slug: "two-sum".into(), timestamp: 1_700_000_100 },
                SolvedEntry { title: "LRU Cache".into(), slug: "lru-cache".into(), timestamp: 1_700_000_000 },
            ],
            selected_topics: None,
            selected_difficulty: None,
        }
    }

    #[tokio::test]
    async fn user_state_round_trips_across_sessions() {
        let config = temp_config("roundtrip");
        let state = AppState::new(config.clone());
        assert!(state.user().await.is_none());

        state.save_user(sample_state()).await;

        // A second session restores the same view: same name, slugs, order.
        let reloaded = AppState::new(config);
        let user = reloaded.user().await.expect("slot restored");
        assert_eq!(user.username, "alice");
        let slugs: Vec<&str> = user.recent_solved.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["two-sum", "lru-cache"]);
    }

    #[tokio::test]
    async fn save_filters_spreads_prior_state() {
        let config = temp_config("filters");
        let state = AppState::new(config);
        state.save_user(sample_state()).await;

        state
            .save_filters(vec!["Graph".into()], DifficultyFilter::Hard)
            .await;

        let user = state.user().await.expect("slot");
        assert_eq!(user.username, "alice");
        assert_eq!(user.recent_solved.len(), 2);
        assert_eq!(user.selected_topics.as_deref(), Some(&["Graph".to_string()][..]));
        assert_eq!(user.selected_difficulty, Some(DifficultyFilter::Hard));
    }

    #[tokio::test]
    async fn save_filters_without_a_user_is_a_noop() {
        let config = temp_config("noop");
        let state = AppState::new(config);
        state.save_filters(vec![], DifficultyFilter::All).await;
        assert!(state.user().await.is_none());
    }
}
