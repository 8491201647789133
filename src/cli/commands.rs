use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::{error, info, Level};

use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::error::Result;
use crate::pipeline;
use crate::utils::ensure_parent_dir;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    let settings = Settings::load(&cli.config, Some(cli.env_file.as_path())).map_err(|e| {
        error!(config = %cli.config.display(), error = %e, "failed to load settings");
        e
    })?;

    let command = cli.command;
    info!(command = command.name(), "starting");

    let result = match command {
        Commands::Extract => pipeline::extract(&settings),
        Commands::Transform => pipeline::transform(&settings),
        Commands::Load => pipeline::load(&settings),
        Commands::Cleanup => pipeline::cleanup(&settings),
        Commands::Run => pipeline::run(&settings),
        Commands::ShowConfig => show_config(&settings),
    };

    if let Err(ref e) = result {
        error!(command = command.name(), error = %e, "command failed");
    }
    result
}

fn show_config(settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings).map_err(std::io::Error::from)?;
    println!("{}", json);
    Ok(())
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    let installed = match log_file {
        Some(path) => {
            ensure_parent_dir(path)?;
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    installed.map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    Ok(())
}
