//! Recommendation Engine: pool-then-sample over the unsolved catalog.
//!
//! Flow:
//! 1) Index the solved set by slug; resolve solved slugs against the catalog
//!    (dangling slugs are dropped silently).
//! 2) Build the candidate pool under the requested strategy.
//! 3) Draw up to MAX_RECOMMENDATIONS entries with a truncated Fisher–Yates
//!    shuffle (no repeats, never more than the pool holds).
//!
//! The engine is a pure function of (catalog, solved set, config) plus the
//! caller-supplied randomness source, so tests drive it with a seeded rng.

use std::collections::{BTreeSet, HashSet};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::domain::{Difficulty, DifficultyFilter, Problem, SolvedEntry};

/// Upper bound on entries returned per recommendation pass.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Legacy dropdown-driven selection modes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
  Random,
  SameTopic,
  SameTopicHarder,
  DifferentTopicSameDifficulty,
}

/// The two calling conventions, unified behind one tagged config.
/// Both resolve to the same pool-then-sample algorithm.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum RecommendConfig {
  ByMode {
    mode: Mode,
  },
  ByFilter {
    #[serde(default)]
    topics: BTreeSet<String>,
    #[serde(default)]
    difficulty: DifficultyFilter,
    #[serde(rename = "includePremium", default)]
    include_premium: bool,
  },
}

/// Compute at most MAX_RECOMMENDATIONS unsolved candidates for the given
/// solved set and strategy. Empty pool means empty output, not an error.
pub fn recommend<'a, R: Rng>(
  catalog: &'a Catalog,
  solved: &[SolvedEntry],
  config: &RecommendConfig,
  rng: &mut R,
) -> Vec<&'a Problem> {
  let solved_slugs: HashSet<&str> = solved.iter().map(|e| e.slug.as_str()).collect();
  let pool = build_pool(catalog, &solved_slugs, config);
  debug!(
    target: "recommend",
    pool = pool.len(),
    catalog = catalog.len(),
    solved = solved_slugs.len(),
    "Recommendation pool built"
  );
  sample_up_to(pool, MAX_RECOMMENDATIONS, rng)
}

fn build_pool<'a>(
  catalog: &'a Catalog,
  solved_slugs: &HashSet<&str>,
  config: &RecommendConfig,
) -> Vec<&'a Problem> {
  let unsolved = || {
    catalog
      .iter()
      .filter(|p| !solved_slugs.contains(p.slug.as_str()))
  };

  match config {
    RecommendConfig::ByMode { mode } => {
      // Catalog entries for solved slugs; dangling slugs drop out here.
      let solved_info: Vec<&Problem> = solved_slugs
        .iter()
        .filter_map(|slug| catalog.get(slug))
        .collect();
      let recent_topics: BTreeSet<String> = solved_info
        .iter()
        .flat_map(|p| p.topics.iter().cloned())
        .collect();
      let solved_difficulties: HashSet<Difficulty> =
        solved_info.iter().map(|p| p.difficulty).collect();

      match mode {
        Mode::Random => unsolved().collect(),
        Mode::SameTopic => unsolved().filter(|p| p.shares_topic(&recent_topics)).collect(),
        Mode::SameTopicHarder => unsolved()
          .filter(|p| p.shares_topic(&recent_topics) && p.difficulty != Difficulty::Easy)
          .collect(),
        Mode::DifferentTopicSameDifficulty => unsolved()
          .filter(|p| {
            !p.shares_topic(&recent_topics) && solved_difficulties.contains(&p.difficulty)
          })
          .collect(),
      }
    }
    RecommendConfig::ByFilter {
      topics,
      difficulty,
      include_premium,
    } => unsolved()
      .filter(|p| (!p.paid_only || *include_premium))
      .filter(|p| difficulty.admits(p.difficulty))
      .filter(|p| topics.is_empty() || p.shares_topic(topics))
      .collect(),
  }
}

/// Unordered sample of up to `k` entries, truncated Fisher–Yates.
fn sample_up_to<'a, R: Rng>(mut pool: Vec<&'a Problem>, k: usize, rng: &mut R) -> Vec<&'a Problem> {
  let k = k.min(pool.len());
  if k == 0 {
    return Vec::new();
  }
  let (picked, _) = pool.partial_shuffle(rng, k);
  picked.to_vec()
}
