//! TagMerger: one canonical tag set per record from three sources
//! (category list, genre list, weighted-tag mapping).

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeSet;

use crate::record::columns::{ALL_TAGS, CATEGORIES, GENRES, TAGS};
use crate::record::Record;

static NON_TAG_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s]").unwrap());

/// Union of categories, genres and tag keys; sorted and deduplicated
pub fn merge_tags(record: &Record) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();

    for column in [CATEGORIES, GENRES] {
        if let Some(Value::Array(items)) = record.get(column) {
            tags.extend(items.iter().filter_map(Value::as_str).map(str::to_string));
        }
    }
    if let Some(Value::Object(weights)) = record.get(TAGS) {
        tags.extend(weights.keys().cloned());
    }

    tags
}

/// Strip non-alphanumerics, lowercase, trim
pub fn normalize_tag(tag: &str) -> String {
    NON_TAG_CHARS
        .replace_all(tag, "")
        .to_lowercase()
        .trim()
        .to_string()
}

/// Normalize every tag; tags that collapse onto each other or to nothing are merged away
pub fn normalize_tags(tags: &[Value]) -> BTreeSet<String> {
    tags.iter()
        .filter_map(Value::as_str)
        .map(normalize_tag)
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn set_all_tags(record: &mut Record, tags: BTreeSet<String>) {
    record.set(ALL_TAGS, tags.into_iter().map(Value::String).collect::<Vec<_>>());
}

/// Tag count of a record; anything other than a list counts as none
pub fn tag_count(record: &Record) -> usize {
    match record.get(ALL_TAGS) {
        Some(Value::Array(tags)) => tags.len(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_three_sources() {
        let record = Record::new("1")
            .with(CATEGORIES, json!(["Single-player", "Steam Achievements"]))
            .with(GENRES, json!(["Action", "Indie"]))
            .with(TAGS, json!({"Action": 512, "Roguelike": 300, "Indie": 120}));

        let tags: Vec<_> = merge_tags(&record).into_iter().collect();
        assert_eq!(
            tags,
            vec!["Action", "Indie", "Roguelike", "Single-player", "Steam Achievements"]
        );
    }

    #[test]
    fn test_merge_tolerates_missing_and_malformed_sources() {
        let record = Record::new("1")
            .with(CATEGORIES, json!(["Co-op", 7, null]))
            .with(GENRES, "Action")
            .with(TAGS, json!([]));

        let tags: Vec<_> = merge_tags(&record).into_iter().collect();
        assert_eq!(tags, vec!["Co-op"]);
        assert!(merge_tags(&Record::new("2")).is_empty());
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("Single-player"), "singleplayer");
        assert_eq!(normalize_tag(" Steam Trading Cards "), "steam trading cards");
        assert_eq!(normalize_tag("Rogue-lite!"), "roguelite");
        assert_eq!(normalize_tag("Инди"), "");
    }

    #[test]
    fn test_normalize_collapses_duplicates() {
        let tags = normalize_tags(&[
            json!("Single-player"),
            json!("Singleplayer"),
            json!("Инди"),
            json!("RPG"),
        ]);
        let tags: Vec<_> = tags.into_iter().collect();
        assert_eq!(tags, vec!["rpg", "singleplayer"]);
    }

    #[test]
    fn test_non_latin_tags_do_not_count() {
        let mut record = Record::new("1");
        let tags = normalize_tags(&[json!("Инди"), json!("RPG"), json!("Action")]);
        set_all_tags(&mut record, tags);

        // "Инди" normalizes to nothing and is dropped before counting
        assert_eq!(record.get(ALL_TAGS), Some(&json!(["action", "rpg"])));
        assert_eq!(tag_count(&record), 2);
    }
}
