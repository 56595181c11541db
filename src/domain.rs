//! Domain models: problem difficulty, catalog entries, solved submissions,
//! and the single-slot persisted user state.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

/// Problem difficulty as the upstream catalog spells it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  /// Parse the catalog spelling. Anything else is a malformed record.
  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "Easy" => Some(Difficulty::Easy),
      "Medium" => Some(Difficulty::Medium),
      "Hard" => Some(Difficulty::Hard),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Difficulty::Easy => "Easy",
      Difficulty::Medium => "Medium",
      Difficulty::Hard => "Hard",
    }
  }
}

/// Catalog entry. Immutable after load; `slug` is the primary key.
/// `topics` is normalized to a proper set at load time and never re-parsed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Problem {
  /// Display number as the platform shows it (kept as a string; the feed
  /// is inconsistent about numbering).
  pub frontend_id: String,
  pub title: String,
  pub slug: String,
  pub difficulty: Difficulty,
  pub topics: BTreeSet<String>,
  pub paid_only: bool,
}

impl Problem {
  /// True if this problem shares at least one topic tag with `topics`.
  pub fn shares_topic(&self, topics: &BTreeSet<String>) -> bool {
    self.topics.iter().any(|t| topics.contains(t))
  }
}

/// One recently accepted submission as reported by the upstream platform.
/// The slug is a foreign key into the catalog but is allowed to dangle
/// (catalog and live submissions drift).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SolvedEntry {
  pub title: String,
  #[serde(rename = "titleSlug")]
  pub slug: String,
  /// Seconds since epoch. Upstream sends this as a JSON string; older
  /// cached payloads carry a number. Accept both.
  #[serde(deserialize_with = "de_epoch_seconds")]
  pub timestamp: i64,
}

fn de_epoch_seconds<'de, D>(d: D) -> Result<i64, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    Num(i64),
    Str(String),
  }
  match Raw::deserialize(d)? {
    Raw::Num(n) => Ok(n),
    Raw::Str(s) => s
      .trim()
      .parse::<i64>()
      .map_err(|e| serde::de::Error::custom(format!("bad epoch timestamp {s:?}: {e}"))),
  }
}

/// Difficulty selection in the filter-based recommendation convention.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DifficultyFilter {
  #[default]
  #[serde(rename = "all")]
  All,
  Easy,
  Medium,
  Hard,
}

impl DifficultyFilter {
  /// Whether `d` passes this selection.
  pub fn admits(&self, d: Difficulty) -> bool {
    match self {
      DifficultyFilter::All => true,
      DifficultyFilter::Easy => d == Difficulty::Easy,
      DifficultyFilter::Medium => d == Difficulty::Medium,
      DifficultyFilter::Hard => d == Difficulty::Hard,
    }
  }
}

/// The single persisted user slot. Overwritten wholesale on every save;
/// callers that want a partial update spread the prior state explicitly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserState {
  pub username: String,
  #[serde(rename = "recentSolved")]
  pub recent_solved: Vec<SolvedEntry>,
  #[serde(rename = "selectedTopics", default, skip_serializing_if = "Option::is_none")]
  pub selected_topics: Option<Vec<String>>,
  #[serde(rename = "selectedDifficulty", default, skip_serializing_if = "Option::is_none")]
  pub selected_difficulty: Option<DifficultyFilter>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn solved_entry_accepts_string_and_numeric_timestamps() {
    let a: SolvedEntry =
      serde_json::from_str(r#"{"title":"Two Sum","titleSlug":"two-sum","timestamp":"1700000000"}"#)
        .expect("string timestamp");
    let b: SolvedEntry =
      serde_json::from_str(r#"{"title":"Two Sum","titleSlug":"two-sum","timestamp":1700000000}"#)
        .expect("numeric timestamp");
    assert_eq!(a.timestamp, 1_700_000_000);
    assert_eq!(a.timestamp, b.timestamp);
  }

  #[test]
  fn difficulty_parse_rejects_unknown_spellings() {
    assert_eq!(Difficulty::parse("Medium"), Some(Difficulty::Medium));
    assert_eq!(Difficulty::parse("medium"), None);
    assert_eq!(Difficulty::parse(""), None);
  }

  #[test]
  fn difficulty_filter_all_admits_everything() {
    for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
      assert!(DifficultyFilter::All.admits(d));
    }
    assert!(DifficultyFilter::Hard.admits(Difficulty::Hard));
    assert!(!DifficultyFilter::Hard.admits(Difficulty::Easy));
  }
}
