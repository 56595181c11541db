//! Catalog Store: the full static problem list, loaded exactly once per
//! session.
//!
//! The raw feed is messy:
//!   - `topicTags` is usually a string-encoded list, sometimes with
//!     single-quote (Python-style) quoting, sometimes a real JSON array.
//!   - `frontendQuestionId` arrives as either a number or a string.
//!
//! All of that is normalized here, once, at load time. A record that cannot
//! be normalized is skipped with a warning; a load failure leaves an empty
//! catalog so lookups return "unknown" instead of raising.

use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::domain::{Difficulty, Problem};

/// Raw record shape of the static catalog resource.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogRecord {
    #[serde(default)]
    frontend_question_id: Value,
    title: String,
    title_slug: String,
    difficulty: String,
    #[serde(default)]
    topic_tags: Value,
    #[serde(default)]
    paid_only: bool,
}

/// Read-only problem catalog with O(1) slug lookup.
#[derive(Debug, Default)]
pub struct Catalog {
    problems: Vec<Problem>,
    by_slug: HashMap<String, usize>,
}

impl Catalog {
    /// Load the catalog from a static JSON resource. Never panics: IO or
    /// decode failure logs and yields an empty catalog.
    #[instrument(level = "info")]
    pub fn load(path: &str) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) => {
                warn!(target: "leetbuddy_backend", %path, error = %e, "Catalog resource unavailable; starting with empty catalog");
                return Self::default();
            }
        };
        match serde_json::from_str::<Vec<CatalogRecord>>(&text) {
            Ok(records) => Self::from_records(records),
            Err(e) => {
                error!(target: "leetbuddy_backend", %path, error = %e, "Catalog resource is not a JSON array of records; starting empty");
                Self::default()
            }
        }
    }

    fn from_records(records: Vec<CatalogRecord>) -> Self {
        let mut problems = Vec::with_capacity(records.len());
        let mut skipped = 0usize;
        for rec in records {
            let Some(difficulty) = Difficulty::parse(&rec.difficulty) else {
                warn!(target: "leetbuddy_backend", slug = %rec.title_slug, difficulty = %rec.difficulty, "Skipping catalog record with unknown difficulty");
                skipped += 1;
                continue;
            };
            if rec.title_slug.is_empty() {
                skipped += 1;
                continue;
            }
            let topics = match normalize_topic_tags(&rec.topic_tags) {
                Some(t) => t,
                None => {
                    // Malformed tag encoding: keep the problem, treat it as untagged.
                    warn!(target: "leetbuddy_backend", slug = %rec.title_slug, "Unparseable topicTags; treating as untagged");
                    BTreeSet::new()
                }
            };
            problems.push(Problem {
                frontend_id: frontend_id_string(&rec.frontend_question_id),
                title: rec.title,
                slug: rec.title_slug,
                difficulty,
                topics,
                paid_only: rec.paid_only,
            });
        }
        let catalog = Self::from_problems(problems);

        // Startup inventory by difficulty.
        let mut count_by_diff: HashMap<Difficulty, usize> = HashMap::new();
        for p in catalog.iter() {
            *count_by_diff.entry(p.difficulty).or_insert(0) += 1;
        }
        for (diff, n) in count_by_diff {
            info!(target: "leetbuddy_backend", difficulty = diff.as_str(), count = n, "Catalog inventory");
        }
        if skipped > 0 {
            warn!(target: "leetbuddy_backend", skipped, "Catalog records skipped as malformed");
        }
        catalog
    }

    /// Build from already-normalized problems. Later duplicates of a slug win,
    /// matching a wholesale re-export of the resource.
    pub fn from_problems(problems: Vec<Problem>) -> Self {
        let mut by_slug = HashMap::with_capacity(problems.len());
        for (i, p) in problems.iter().enumerate() {
            by_slug.insert(p.slug.clone(), i);
        }
        Self { problems, by_slug }
    }

    /// Point lookup by slug.
    pub fn get(&self, slug: &str) -> Option<&Problem> {
        self.by_slug.get(slug).map(|&i| &self.problems[i])
    }

    /// Full scan, catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Problem> {
        self.problems.iter()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

fn frontend_id_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Normalize whatever the feed put in `topicTags` into a set of tag names.
/// `None` means the encoding was unrecognizable.
fn normalize_topic_tags(v: &Value) -> Option<BTreeSet<String>> {
    match v {
        Value::Null => Some(BTreeSet::new()),
        Value::Array(items) => {
            let mut out = BTreeSet::new();
            for item in items {
                match item {
                    Value::String(s) => {
                        out.insert(s.clone());
                    }
                    // Some exports keep the full tag object; the name is what we filter on.
                    Value::Object(obj) => {
                        out.insert(obj.get("name")?.as_str()?.to_string());
                    }
                    _ => return None,
                }
            }
            Some(out)
        }
        Value::String(s) => parse_tag_string(s),
        _ => None,
    }
}

/// Parse a string-encoded tag list. Accepts proper JSON (`["Array"]`) and the
/// single-quoted convention (`['Array', 'Hash Table']`) seen in older exports.
pub(crate) fn parse_tag_string(s: &str) -> Option<BTreeSet<String>> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed == "[]" {
        return Some(BTreeSet::new());
    }
    if let Ok(tags) = serde_json::from_str::<Vec<String>>(trimmed) {
        return Some(tags.into_iter().collect());
    }
    // Single-quoted variant. Tag names never contain quotes, so a blanket
    // replacement is safe.
    if trimmed.contains('\'') && !trimmed.contains('"') {
        let requoted = trimmed.replace('\'', "\"");
        if let Ok(tags) = serde_json::from_str::<Vec<String>>(&requoted) {
            return Some(tags.into_iter().collect());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_string_double_quoted() {
        let tags = parse_tag_string(r#"["Array", "Hash Table"]"#).expect("parse");
        assert!(tags.contains("Array"));
        assert!(tags.contains("Hash Table"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn tag_string_single_quoted() {
        let tags = parse_tag_string("['Array', 'Two Pointers']").expect("parse");
        assert!(tags.contains("Two Pointers"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn tag_string_malformed_is_none_not_panic() {
        assert!(parse_tag_string("not a list").is_none());
        assert!(parse_tag_string("[1, 2, 3]").is_none());
        assert_eq!(parse_tag_string("  []  ").unwrap().len(), 0);
        assert_eq!(parse_tag_string("").unwrap().len(), 0);
    }

    #[test]
    fn records_with_bad_difficulty_are_skipped_not_fatal() {
        let records: Vec<CatalogRecord> = serde_json::from_str(
            r#"[
                {"frontendQuestionId": "1", "title": "Two Sum", "titleSlug": "two-sum",
                 "difficulty": "Easy", "topicTags": "[\"Array\"]", "paidOnly": false},
                {"frontendQuestionId": 9000, "title": "Broken", "titleSlug": "broken",
                 "difficulty": "Impossible", "topicTags": "[]", "paidOnly": false}
            ]"#,
        )
        .expect("records");
        let catalog = Catalog::from_records(records);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("two-sum").is_some());
        assert!(catalog.get("broken").is_none());
    }

    #[test]
    fn malformed_tags_keep_the_problem_untagged() {
        let records: Vec<CatalogRecord> = serde_json::from_str(
            r#"[{"frontendQuestionId": "2", "title": "Add Two Numbers",
                 "titleSlug": "add-two-numbers", "difficulty": "Medium",
                 "topicTags": "Linked List, Math", "paidOnly": false}]"#,
        )
        .expect("records");
        let catalog = Catalog::from_records(records);
        let p = catalog.get("add-two-numbers").expect("kept");
        assert!(p.topics.is_empty());
    }

    #[test]
    fn tag_object_arrays_use_the_name_field() {
        let records: Vec<CatalogRecord> = serde_json::from_str(
            r#"[{"frontendQuestionId": "3", "title": "Longest Substring",
                 "titleSlug": "longest-substring", "difficulty": "Medium",
                 "topicTags": [{"name": "Sliding Window", "slug": "sliding-window"}],
                 "paidOnly": false}]"#,
        )
        .expect("records");
        let catalog = Catalog::from_records(records);
        let p = catalog.get("longest-substring").expect("kept");
        assert!(p.topics.contains("Sliding Window"));
    }

    #[test]
    fn load_from_missing_path_is_empty() {
        let catalog = Catalog::load("./definitely/not/here.json");
        assert!(catalog.is_empty());
        assert!(catalog.get("two-sum").is_none());
    }
}
