//! CleaningPipeline: the fixed, ordered composition of all stages.
//!
//! Later stages rely on invariants established by earlier ones (tags are merged
//! before columns are dropped, the language filter confirms the language text
//! normalization uses, tags are normalized before they are counted), so the
//! order is not configurable.

pub mod stages;

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::config::CleanerConfig;
use crate::error::Result;
use crate::record::RecordSet;
use crate::store;
use crate::text::LanguageResources;
use crate::ui::{Phase, Ui};

pub use stages::Stage;
use stages::*;

pub struct CleaningPipeline {
    config: CleanerConfig,
    stages: Vec<Box<dyn Stage>>,
}

impl CleaningPipeline {
    /// Build the fixed stage list. Fails on an invalid config.
    pub fn new(config: CleanerConfig, resources: Arc<LanguageResources>) -> Result<Self> {
        config.validate()?;

        let stages: Vec<Box<dyn Stage>> = vec![
            Box::new(CompletenessFilter),
            Box::new(MergeTags),
            Box::new(DropColumns {
                columns: config.columns_to_drop.clone(),
            }),
            Box::new(NameFilter),
            Box::new(CoerceDates),
            Box::new(CoercePlatforms),
            Box::new(CoerceOwners),
            Box::new(NormalizeCredits),
            Box::new(LanguageFilter),
            Box::new(NormalizeDescriptions { resources }),
            Box::new(RemoveWords {
                words: config.words_to_remove.clone(),
            }),
            Box::new(DescriptionLengthFilter {
                min: config.min_description_length,
                max: config.max_description_length,
            }),
            Box::new(NormalizeTags),
            Box::new(TagCountFilter {
                min_tags: config.min_tags,
            }),
        ];

        Ok(Self { config, stages })
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    pub fn stages(&self) -> &[Box<dyn Stage>] {
        &self.stages
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Clean an in-memory record set. The description length filter is skipped.
    pub fn clean(&self, records: RecordSet, ui: &mut impl Ui) -> Result<RecordSet> {
        self.run(records, false, ui)
    }

    /// Load a record set from a `.json` / `.csv` source and clean it with every stage
    pub fn clean_from_source(&self, path: &Path, ui: &mut impl Ui) -> Result<RecordSet> {
        ui.set_phase(Phase::Loading);
        ui.set_info(path.display().to_string());
        let records = store::load(path)?;
        self.run(records, true, ui)
    }

    fn run(&self, mut records: RecordSet, from_source: bool, ui: &mut impl Ui) -> Result<RecordSet> {
        let active: Vec<&dyn Stage> = self
            .stages
            .iter()
            .map(|s| &**s)
            .filter(|s| from_source || !s.source_only())
            .collect();
        let total = active.len() as u64;

        ui.set_phase(Phase::Cleaning);
        ui.log(format!("Initial shape: {}", records.shape()));

        for (idx, stage) in active.iter().enumerate() {
            ui.set_progress(idx as u64, total, stage.name());

            let before = records.shape();
            let start = Instant::now();
            records = stage.apply(records)?;
            let after = records.shape();

            debug!(stage = stage.name(), elapsed_ms = start.elapsed().as_millis() as u64, "stage done");
            ui.log(format!("{}: {} -> {}", stage.name(), before, after));
        }

        ui.clear_progress();
        ui.log(format!("Final shape: {}", records.shape()));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleanError;
    use crate::ui::SilentUi;

    #[test]
    fn test_stage_order_is_fixed() {
        let pipeline = CleaningPipeline::new(
            CleanerConfig::default(),
            Arc::new(LanguageResources::load()),
        )
        .unwrap();
        assert_eq!(
            pipeline.stage_names(),
            vec![
                "completeness filter",
                "tag merge",
                "drop columns",
                "name filter",
                "date coercion",
                "platform coercion",
                "ownership coercion",
                "empty-collection normalization",
                "language filter",
                "text normalization",
                "domain word removal",
                "description length filter",
                "tag normalization",
                "tag count filter",
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let pipeline = CleaningPipeline::new(
            CleanerConfig::default(),
            Arc::new(LanguageResources::load()),
        )
        .unwrap();
        let out = pipeline.clean(RecordSet::default(), &mut SilentUi::new()).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_inverted_length_bounds_rejected() {
        let config = CleanerConfig {
            min_description_length: 241,
            ..CleanerConfig::default()
        };
        let result = CleaningPipeline::new(config, Arc::new(LanguageResources::load()));
        assert!(matches!(result, Err(CleanError::Config(_))));
    }
}
