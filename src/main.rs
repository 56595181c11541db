//! LeetBuddy · Practice Companion Backend
//!
//! - Axum HTTP API relaying the recent-submissions GraphQL query upstream
//! - Load-once static problem catalog with normalized topic tags
//! - Single-slot persisted user state (cache of the last fetched view)
//! - Recommendation engine over the unsolved catalog
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT          : u16 (default 3000)
//!   LEETBUDDY_CONFIG_PATH : path to TOML config (catalog/upstream/state paths)
//!   LOG_LEVEL    : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod catalog;
mod fetcher;
mod recommend;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::config::load_app_config_from_env;
use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (catalog, persisted user slot, fetcher).
  let state = Arc::new(AppState::new(load_app_config_from_env()));

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "leetbuddy_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
