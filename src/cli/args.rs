use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::{DEFAULT_CONFIG_FILE, DEFAULT_ENV_FILE};

#[derive(Parser)]
#[command(name = "weather-etl")]
#[command(about = "Fetch, flatten and archive current weather observations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE, help = "YAML settings file")]
    pub config: PathBuf,

    #[arg(long, global = true, default_value = DEFAULT_ENV_FILE, help = "Env file holding OPENWEATHER_API_KEY")]
    pub env_file: PathBuf,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Fetch current weather from the API into the raw file
    Extract,

    /// Flatten the raw file into a single processed record
    Transform,

    /// Append the processed record to the sink
    Load,

    /// Remove raw and processed intermediates
    Cleanup,

    /// Run extract, transform, load and cleanup in order
    Run,

    /// Print the loaded settings with the API key redacted
    ShowConfig,
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Extract => "extract",
            Commands::Transform => "transform",
            Commands::Load => "load",
            Commands::Cleanup => "cleanup",
            Commands::Run => "run",
            Commands::ShowConfig => "show-config",
        }
    }
}
