use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "epochguard")]
#[command(about = "EpochGuard - PoS node risk analysis with local fallback")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Classifier base URL (overrides EPOCHGUARD_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Never contact the classifier
    #[arg(long, global = true)]
    pub offline: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a node telemetry CSV
    Analyze {
        file: PathBuf,

        /// Directory for the results CSV (default: Downloads)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show SHAP explanations, live for a file or the stored analysis
    Shap {
        file: Option<PathBuf>,

        /// Directory for the SHAP JSON (default: Downloads)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show hybrid ensemble performance
    Metrics,

    /// Send a message to the EpochGuard team
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        message: String,
    },
}
