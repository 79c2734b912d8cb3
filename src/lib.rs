pub mod cli;
pub mod coerce;
pub mod config;
pub mod error;
pub mod filter;
pub mod logging;
pub mod pipeline;
pub mod record;
pub mod store;
pub mod tags;
pub mod text;
pub mod ui;

pub use cli::{Cli, Commands};
pub use config::CleanerConfig;
pub use error::{CleanError, StoreError};
pub use pipeline::CleaningPipeline;
pub use record::{GameRecord, Record, RecordSet};
pub use text::LanguageResources;
pub use ui::{Phase, SilentUi, TracingUi, Ui, UiApp};
