//! The named stages of a cleaning run, in the order they must execute.

use rayon::prelude::*;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::coerce::{coerce_bool, coerce_owners, date_cell, is_empty_credit};
use crate::error::Result;
use crate::filter::{
    detect_descriptions, has_description_length, has_min_tags, is_complete, is_valid_name,
    sanitize_name,
};
use crate::record::columns::{
    ALL_TAGS, CREDIT_COLUMNS, DESCRIPTIONS, DETAILED_DESCRIPTION_CLEAN,
    DETAILED_DESCRIPTION_LANG, ESTIMATED_OWNERS, NAME, PLATFORMS, RELEASE_DATE,
    SHORT_DESCRIPTION_CLEAN, SHORT_DESCRIPTION_LANG,
};
use crate::record::{Record, RecordSet};
use crate::tags::{merge_tags, normalize_tags, set_all_tags};
use crate::text::{normalize, remove_words, Language, LanguageResources};

/// One transform or filter over a whole record set
pub trait Stage: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, records: RecordSet) -> Result<RecordSet>;

    /// Runs only when the records were loaded from a source file
    fn source_only(&self) -> bool {
        false
    }
}

pub struct CompletenessFilter;

impl Stage for CompletenessFilter {
    fn name(&self) -> &'static str {
        "completeness filter"
    }

    fn apply(&self, records: RecordSet) -> Result<RecordSet> {
        Ok(records.retain(is_complete))
    }
}

pub struct MergeTags;

impl Stage for MergeTags {
    fn name(&self) -> &'static str {
        "tag merge"
    }

    fn apply(&self, records: RecordSet) -> Result<RecordSet> {
        Ok(records.map_records(|r| {
            let tags = merge_tags(r);
            set_all_tags(r, tags);
        }))
    }
}

pub struct DropColumns {
    pub columns: Vec<String>,
}

impl Stage for DropColumns {
    fn name(&self) -> &'static str {
        "drop columns"
    }

    fn apply(&self, records: RecordSet) -> Result<RecordSet> {
        Ok(records.map_records(|r| {
            for column in &self.columns {
                r.remove(column);
            }
        }))
    }
}

pub struct NameFilter;

impl Stage for NameFilter {
    fn name(&self) -> &'static str {
        "name filter"
    }

    fn apply(&self, records: RecordSet) -> Result<RecordSet> {
        let records = records.map_records(|r| {
            if let Some(name) = r.text(NAME) {
                let cleaned = sanitize_name(name);
                r.set(NAME, cleaned);
            }
        });
        Ok(records.retain(|r| r.text(NAME).map(is_valid_name).unwrap_or(false)))
    }
}

pub struct CoerceDates;

impl Stage for CoerceDates {
    fn name(&self) -> &'static str {
        "date coercion"
    }

    fn apply(&self, records: RecordSet) -> Result<RecordSet> {
        Ok(records.map_records(|r| {
            let date = r.get(RELEASE_DATE).map(date_cell).unwrap_or(Value::Null);
            r.set(RELEASE_DATE, date);
        }))
    }
}

pub struct CoercePlatforms;

impl Stage for CoercePlatforms {
    fn name(&self) -> &'static str {
        "platform coercion"
    }

    fn apply(&self, records: RecordSet) -> Result<RecordSet> {
        Ok(records.map_records(|r| {
            for column in PLATFORMS {
                let flag = coerce_bool(r.get(column));
                r.set(column, flag);
            }
        }))
    }
}

pub struct CoerceOwners;

impl Stage for CoerceOwners {
    fn name(&self) -> &'static str {
        "ownership coercion"
    }

    fn apply(&self, records: RecordSet) -> Result<RecordSet> {
        Ok(records.map_records(|r| {
            let owners = r.get(ESTIMATED_OWNERS).and_then(coerce_owners);
            r.set(ESTIMATED_OWNERS, owners);
        }))
    }
}

pub struct NormalizeCredits;

impl Stage for NormalizeCredits {
    fn name(&self) -> &'static str {
        "empty-collection normalization"
    }

    fn apply(&self, records: RecordSet) -> Result<RecordSet> {
        Ok(records.map_records(|r| {
            for column in CREDIT_COLUMNS {
                if r.get(column).map(is_empty_credit).unwrap_or(false) {
                    r.set(column, Value::Null);
                }
            }
        }))
    }
}

/// Keeps records whose descriptions both read as English or Russian and
/// records the detected language of each.
pub struct LanguageFilter;

impl Stage for LanguageFilter {
    fn name(&self) -> &'static str {
        "language filter"
    }

    fn apply(&self, records: RecordSet) -> Result<RecordSet> {
        let kept: Vec<Record> = records
            .into_records()
            .into_par_iter()
            .filter_map(|mut r| {
                let Some((short, detailed)) = detect_descriptions(&r) else {
                    debug!(key = r.key(), "descriptions not in a supported language");
                    return None;
                };
                r.set(SHORT_DESCRIPTION_LANG, short.code());
                r.set(DETAILED_DESCRIPTION_LANG, detailed.code());
                Some(r)
            })
            .collect();
        Ok(RecordSet::new(kept))
    }
}

/// Writes the `_clean` variant of each description using the language the
/// language filter confirmed for that field.
pub struct NormalizeDescriptions {
    pub resources: Arc<LanguageResources>,
}

impl NormalizeDescriptions {
    fn clean_record(&self, record: &mut Record) {
        for (raw, lang, clean) in DESCRIPTIONS {
            let language = record.text(lang).and_then(Language::from_code);
            let cleaned = match (record.text(raw), language) {
                (Some(text), Some(language)) => normalize(text, language, &self.resources),
                (_, None) => {
                    debug!(key = record.key(), column = raw, "no confirmed language");
                    String::new()
                }
                _ => String::new(),
            };
            record.set(clean, cleaned);
        }
    }
}

impl Stage for NormalizeDescriptions {
    fn name(&self) -> &'static str {
        "text normalization"
    }

    fn apply(&self, records: RecordSet) -> Result<RecordSet> {
        let mut records = records.into_records();
        records.par_iter_mut().for_each(|r| self.clean_record(r));
        Ok(RecordSet::new(records))
    }
}

pub struct RemoveWords {
    pub words: Vec<String>,
}

impl Stage for RemoveWords {
    fn name(&self) -> &'static str {
        "domain word removal"
    }

    fn apply(&self, records: RecordSet) -> Result<RecordSet> {
        Ok(records.map_records(|r| {
            for column in [SHORT_DESCRIPTION_CLEAN, DETAILED_DESCRIPTION_CLEAN] {
                if let Some(text) = r.text(column) {
                    let kept = remove_words(text, &self.words);
                    r.set(column, kept);
                }
            }
        }))
    }
}

pub struct DescriptionLengthFilter {
    pub min: usize,
    pub max: usize,
}

impl Stage for DescriptionLengthFilter {
    fn name(&self) -> &'static str {
        "description length filter"
    }

    fn apply(&self, records: RecordSet) -> Result<RecordSet> {
        Ok(records.retain(|r| has_description_length(r, self.min, self.max)))
    }

    fn source_only(&self) -> bool {
        true
    }
}

pub struct NormalizeTags;

impl Stage for NormalizeTags {
    fn name(&self) -> &'static str {
        "tag normalization"
    }

    fn apply(&self, records: RecordSet) -> Result<RecordSet> {
        Ok(records.map_records(|r| {
            if let Some(Value::Array(tags)) = r.get(ALL_TAGS) {
                let tags = normalize_tags(tags);
                set_all_tags(r, tags);
            }
        }))
    }
}

pub struct TagCountFilter {
    pub min_tags: usize,
}

impl Stage for TagCountFilter {
    fn name(&self) -> &'static str {
        "tag count filter"
    }

    fn apply(&self, records: RecordSet) -> Result<RecordSet> {
        Ok(records.retain(|r| has_min_tags(r, self.min_tags)))
    }
}
