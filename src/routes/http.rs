//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented; errors are mapped to status codes here and
//! nowhere else.

use std::sync::Arc;

use axum::{
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::fetcher::FetchError;
use crate::logic::*;
use crate::protocol::*;
use crate::recommend::RecommendConfig;
use crate::state::AppState;
use crate::util::now_epoch_secs;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
  Json(HealthOut { ok: true })
}

/// Relay one fetch upstream, cache the result, return the enriched list.
/// Empty username → 400 before any network I/O; upstream trouble → 502 with
/// one generic message. Zero submissions is a success with a distinct status.
#[instrument(level = "info", skip(state, body), fields(username = %body.username))]
pub async fn http_post_solved(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SolvedIn>,
) -> Result<Json<SolvedOut>, (StatusCode, Json<ErrorOut>)> {
  match fetch_and_cache(&state, &body.username).await {
    Ok(user) => {
      info!(target: "fetch", username = %user.username, count = user.recent_solved.len(), "HTTP solved list served");
      let solved = enrich_solved(&state.catalog, &user.recent_solved, now_epoch_secs());
      Ok(Json(SolvedOut {
        status: solved_status(&user.username, solved.len()),
        username: user.username,
        solved,
      }))
    }
    Err(err) => {
      let code = match err {
        FetchError::EmptyUsername => StatusCode::BAD_REQUEST,
        FetchError::Transport(_) | FetchError::Malformed(_) => StatusCode::BAD_GATEWAY,
      };
      Err((code, Json(ErrorOut { error: fetch_error_message(&err) })))
    }
  }
}

/// Restore the persisted view (read once at frontend startup).
#[instrument(level = "info", skip(state))]
pub async fn http_get_user(
  State(state): State<Arc<AppState>>,
) -> Result<Json<UserOut>, (StatusCode, Json<ErrorOut>)> {
  let Some(user) = state.user().await else {
    return Err((
      StatusCode::NOT_FOUND,
      Json(ErrorOut { error: "No cached user state.".into() }),
    ));
  };
  let solved = enrich_solved(&state.catalog, &user.recent_solved, now_epoch_secs());
  Ok(Json(UserOut {
    status: cached_status(&user.username),
    username: user.username,
    solved,
    selected_topics: user.selected_topics,
    selected_difficulty: user.selected_difficulty,
  }))
}

/// Run the engine against the cached solved set. Accepts both calling
/// conventions via the tagged config. Empty pool is an empty list, not an
/// error.
#[instrument(level = "info", skip(state, config))]
pub async fn http_post_recommend(
  State(state): State<Arc<AppState>>,
  Json(config): Json<RecommendConfig>,
) -> impl IntoResponse {
  let picks = recommend_for_user(&state, &config).await;
  info!(target: "recommend", picks = picks.len(), "HTTP recommendations served");
  Json(RecommendOut {
    recommendations: picks.iter().map(to_out).collect(),
  })
}

/// Catalog point lookup by slug.
#[instrument(level = "info", skip(state))]
pub async fn http_get_problem(
  State(state): State<Arc<AppState>>,
  Path(slug): Path<String>,
) -> Result<Json<ProblemOut>, (StatusCode, Json<ErrorOut>)> {
  match state.catalog.get(&slug) {
    Some(p) => Ok(Json(to_out(p))),
    None => Err((
      StatusCode::NOT_FOUND,
      Json(ErrorOut { error: format!("Unknown problem slug: {slug}") }),
    )),
  }
}
