//! RowFilterChain predicates. Each returns `true` when the record survives.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::record::columns::{
    CATEGORIES, DETAILED_DESCRIPTION, HEADER_IMAGE, NAME, SHORT_DESCRIPTION,
    SHORT_DESCRIPTION_CLEAN, SUPPORTED_LANGUAGES,
};
use crate::record::Record;
use crate::tags::tag_count;
use crate::text::{detect, Detection, Language};

static NON_NAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9\s]").unwrap());
static NAME_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static VALID_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9 ]+$").unwrap());

/// Required fields present, not a playtest build
pub fn is_complete(record: &Record) -> bool {
    let is_playtest = record
        .text(NAME)
        .map(|name| name.to_lowercase().contains("playtest"))
        .unwrap_or(false);

    !(record.is_blank(SHORT_DESCRIPTION)
        || record.is_blank(DETAILED_DESCRIPTION)
        || is_playtest
        || record.is_blank(HEADER_IMAGE)
        || is_empty_collection(record.get(SUPPORTED_LANGUAGES))
        || is_empty_collection(record.get(CATEGORIES)))
}

/// An empty list, or text that spells one out. Absent cells do not count.
fn is_empty_collection(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::String(s)) => s.trim() == "[]",
        _ => false,
    }
}

/// Strip every character outside `[A-Za-z0-9\s]`, then fold each whitespace
/// run (tabs, newlines, non-breaking spaces) into one ASCII space
pub fn sanitize_name(name: &str) -> String {
    let stripped = NON_NAME_CHARS.replace_all(name, "");
    NAME_WHITESPACE.replace_all(&stripped, " ").into_owned()
}

/// A sanitized name must be non-blank and made only of the allowed characters
pub fn is_valid_name(name: &str) -> bool {
    VALID_NAME.is_match(name) && !name.trim().is_empty()
}

/// Both descriptions detected as a supported language.
///
/// Returns the detected languages (short, detailed) for a surviving record.
pub fn detect_descriptions(record: &Record) -> Option<(Language, Language)> {
    let short = record.text(SHORT_DESCRIPTION).map(detect).unwrap_or(Detection::Undetected);
    let detailed = record
        .text(DETAILED_DESCRIPTION)
        .map(detect)
        .unwrap_or(Detection::Undetected);

    Some((short.language()?, detailed.language()?))
}

/// Cleaned short description length within `[min, max]`, counted in characters
pub fn has_description_length(record: &Record, min: usize, max: usize) -> bool {
    match record.text(SHORT_DESCRIPTION_CLEAN) {
        Some(text) => (min..=max).contains(&text.chars().count()),
        None => false,
    }
}

pub fn has_min_tags(record: &Record, min_tags: usize) -> bool {
    tag_count(record) >= min_tags
}
