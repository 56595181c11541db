//! Application configuration loaded from TOML.
//!
//! Path comes from the LEETBUDDY_CONFIG_PATH env variable; every field has a
//! default so the server runs with no config file at all.

use serde::Deserialize;
use tracing::{error, info};

fn default_catalog_path() -> String {
  "./data/all_questions.json".into()
}
fn default_upstream_url() -> String {
  "https://leetcode.com/graphql".into()
}
fn default_user_state_path() -> String {
  "./data/user_state.json".into()
}
fn default_max_recent() -> usize {
  20
}
fn default_fetch_timeout_secs() -> u64 {
  15
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
  /// Static problem catalog (JSON array), loaded once per session.
  #[serde(default = "default_catalog_path")]
  pub catalog_path: String,
  /// Upstream GraphQL endpoint the submission query is relayed to.
  #[serde(default = "default_upstream_url")]
  pub upstream_url: String,
  /// Single-slot persisted user state.
  #[serde(default = "default_user_state_path")]
  pub user_state_path: String,
  /// Cap on the solved list returned per fetch.
  #[serde(default = "default_max_recent")]
  pub max_recent: usize,
  /// Hard timeout on the upstream call; a hung upstream must not wedge us.
  #[serde(default = "default_fetch_timeout_secs")]
  pub fetch_timeout_secs: u64,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      catalog_path: default_catalog_path(),
      upstream_url: default_upstream_url(),
      user_state_path: default_user_state_path(),
      max_recent: default_max_recent(),
      fetch_timeout_secs: default_fetch_timeout_secs(),
    }
  }
}

/// Load `AppConfig` from LEETBUDDY_CONFIG_PATH. On any parsing/IO error,
/// logs and returns the defaults.
pub fn load_app_config_from_env() -> AppConfig {
  let Ok(path) = std::env::var("LEETBUDDY_CONFIG_PATH") else {
    return AppConfig::default();
  };
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "leetbuddy_backend", %path, "Loaded config (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "leetbuddy_backend", %path, error = %e, "Failed to parse TOML config; using defaults");
        AppConfig::default()
      }
    },
    Err(e) => {
      error!(target: "leetbuddy_backend", %path, error = %e, "Failed to read TOML config file; using defaults");
      AppConfig::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_fills_defaults() {
    let cfg: AppConfig = toml::from_str("max_recent = 5").expect("parse");
    assert_eq!(cfg.max_recent, 5);
    assert_eq!(cfg.upstream_url, default_upstream_url());
    assert_eq!(cfg.fetch_timeout_secs, default_fetch_timeout_secs());
  }
}
