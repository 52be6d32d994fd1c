//! Heart Disease Predictor CLI
//!
//! A command-line tool for running predictions against the local model
//! artifacts or a remote prediction server, and for inspecting the
//! feature schema.

mod client;
mod commands;
mod output;
mod prompt;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{predict, schema};

/// Heart Disease Predictor CLI
#[derive(Parser)]
#[command(name = "hdp")]
#[command(author, version, about = "CLI for the Heart Disease Predictor", long_about = None)]
pub struct Cli {
    /// Prediction API URL; when set, predictions run against the server
    /// instead of local artifacts (can also be set via HDP_API_URL)
    #[arg(long, env = "HDP_API_URL")]
    pub api_url: Option<String>,

    /// Path to the serialized SVM model artifact
    #[arg(long, env = "HDP_MODEL_PATH", default_value = "svm_heart_disease_model.json")]
    pub model: String,

    /// Path to the pre-fitted scaler artifact
    #[arg(long, env = "HDP_SCALER_PATH", default_value = "scaler.json")]
    pub scaler: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run an interactive prediction session
    Predict,

    /// Show the feature schema (names, ranges, guidance)
    Schema,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Predict => predict::run(&cli).await,
        Commands::Schema => schema::run(cli.format),
    };

    if let Err(err) = result {
        output::print_error(&format!("{:#}", err));
        std::process::exit(1);
    }

    Ok(())
}
