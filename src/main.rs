use anyhow::{Context, Result};
use game_catalog_cleaner::{
    cli::{Cli, Commands},
    logging, store, CleanerConfig, CleaningPipeline, LanguageResources, Phase, TracingUi, Ui, UiApp,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Clean {
            input,
            output,
            config,
            tui,
        } => {
            // the terminal view owns the screen; console logging would tear it
            if !tui {
                logging::init(cli.verbose);
            }

            let config = CleanerConfig::load(config.as_deref()).context("Failed to load config")?;
            let resources = Arc::new(LanguageResources::load());
            let pipeline =
                CleaningPipeline::new(config, resources).context("Invalid cleaner config")?;

            if tui {
                let mut ui = UiApp::new()?;
                let summary = clean(&pipeline, &input, &output, &mut ui)?;
                ui.finish(&summary)?;
            } else {
                let summary = clean(&pipeline, &input, &output, &mut TracingUi)?;
                println!("{}", summary);
            }
        }

        Commands::Convert { input, output } => {
            logging::init(cli.verbose);
            let records = store::load(&input)
                .with_context(|| format!("Failed to load {:?}", input))?;
            store::save(&records, &output)
                .with_context(|| format!("Failed to save {:?}", output))?;
            println!("Converted {} records to {:?}", records.len(), output);
        }

        Commands::Stages => {
            let pipeline =
                CleaningPipeline::new(CleanerConfig::default(), Arc::new(LanguageResources::load()))?;
            println!("Cleaning stages:\n");
            for (idx, stage) in pipeline.stages().iter().enumerate() {
                let note = if stage.source_only() {
                    " (file sources only)"
                } else {
                    ""
                };
                println!("  {:>2}. {}{}", idx + 1, stage.name(), note);
            }
        }
    }

    Ok(())
}

fn clean(
    pipeline: &CleaningPipeline,
    input: &Path,
    output: &Path,
    ui: &mut impl Ui,
) -> Result<String> {
    let start = Instant::now();

    let records = pipeline
        .clean_from_source(input, ui)
        .with_context(|| format!("Failed to clean {:?}", input))?;

    ui.set_phase(Phase::Saving);
    ui.set_info(output.display().to_string());
    store::save(&records, output).with_context(|| format!("Failed to save {:?}", output))?;

    Ok(format!(
        "Wrote {:?} ({} records) in {:.1}s",
        output,
        records.len(),
        start.elapsed().as_secs_f64()
    ))
}
