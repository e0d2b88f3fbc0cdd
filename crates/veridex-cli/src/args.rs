use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(
    name = "veridex",
    version,
    about = "Semantic mismatch inspection for Android application packages"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a single package archive and print the verdict
    Analyze {
        /// Path to the artifact (its package dump must sit at `<artifact>.json`)
        artifact: PathBuf,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Model API key; defaults to $GEMINI_API_KEY
        #[arg(long)]
        api_key: Option<String>,

        /// Skip the model endpoint and run rule-only analysis
        #[arg(long)]
        offline: bool,
    },

    /// Analyze a labeled dataset and write CSV evaluation reports
    Batch {
        /// Dataset root containing `safe/` and `malware/` directories
        dataset_root: PathBuf,

        /// Directory for the timestamped report files
        output_dir: PathBuf,

        /// Model API key; defaults to $GEMINI_API_KEY
        #[arg(long)]
        api_key: Option<String>,

        /// Skip the model endpoint and run rule-only analysis
        #[arg(long)]
        offline: bool,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}
