use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "game-catalog-cleaner")]
#[command(version, about = "Clean scraped game-catalog records into a model-ready dataset")]
pub struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load, clean and save a record set
    Clean {
        /// Source file (.json keyed object or .csv/.txt)
        input: PathBuf,

        /// Destination file (.json or .csv/.txt)
        output: PathBuf,

        /// Config file (default: cleaner.toml in the platform config dir)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show the full-screen progress view
        #[arg(long)]
        tui: bool,
    },

    /// Convert a record set between the JSON and CSV forms without cleaning
    Convert {
        input: PathBuf,
        output: PathBuf,
    },

    /// List the cleaning stages in execution order
    Stages,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
