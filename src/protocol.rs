//! Public request/response DTOs for the HTTP API (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{DifficultyFilter, Problem};

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

/// Generic error payload. Deliberately one message field: the client shows
/// it verbatim and learns nothing about upstream internals.
#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct SolvedIn {
    pub username: String,
}

/// One solved entry enriched for display.
#[derive(Debug, Serialize)]
pub struct SolvedItemOut {
    pub title: String,
    #[serde(rename = "titleSlug")]
    pub slug: String,
    pub timestamp: i64,
    /// Catalog display number when the slug resolves.
    #[serde(rename = "questionId", skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    /// `#1 - Two Sum` when the catalog knows the slug, raw title otherwise.
    pub label: String,
    #[serde(rename = "solvedAgo")]
    pub solved_ago: String,
}

#[derive(Serialize)]
pub struct SolvedOut {
    pub username: String,
    /// Human status line, e.g. "No recent solves found for @alice.".
    pub status: String,
    pub solved: Vec<SolvedItemOut>,
}

#[derive(Serialize)]
pub struct UserOut {
    pub username: String,
    pub status: String,
    pub solved: Vec<SolvedItemOut>,
    #[serde(rename = "selectedTopics", skip_serializing_if = "Option::is_none")]
    pub selected_topics: Option<Vec<String>>,
    #[serde(rename = "selectedDifficulty", skip_serializing_if = "Option::is_none")]
    pub selected_difficulty: Option<DifficultyFilter>,
}

/// Catalog entry as served to the frontend.
#[derive(Debug, Serialize)]
pub struct ProblemOut {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub title: String,
    #[serde(rename = "titleSlug")]
    pub slug: String,
    pub difficulty: &'static str,
    pub topics: Vec<String>,
    #[serde(rename = "paidOnly")]
    pub paid_only: bool,
}

/// Convert an internal `Problem` to the public DTO.
pub fn to_out(p: &Problem) -> ProblemOut {
    ProblemOut {
        question_id: p.frontend_id.clone(),
        title: p.title.clone(),
        slug: p.slug.clone(),
        difficulty: p.difficulty.as_str(),
        topics: p.topics.iter().cloned().collect(),
        paid_only: p.paid_only,
    }
}

#[derive(Serialize)]
pub struct RecommendOut {
    pub recommendations: Vec<ProblemOut>,
}
