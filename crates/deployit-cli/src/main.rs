//! deployit CLI tool.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "deployit")]
#[command(about = "Deployment pipeline CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a pipeline configuration
    Validate {
        /// Path to the configuration file
        #[arg(default_value = "pipeline.yml")]
        path: String,
    },
    /// Show the assembled pipeline, service and messenger
    Inspect {
        /// Path to the configuration file
        #[arg(default_value = "pipeline.yml")]
        path: String,
        /// Emit JSON instead of a tree
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => {
            commands::validate(&path)?;
        }
        Commands::Inspect { path, json } => {
            commands::inspect(&path, json)?;
        }
    }

    Ok(())
}
