use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ct_cli::commands::{factors, forecast, trend};
use ct_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let granularity = cli.granularity.unwrap_or(config.granularity);

    match &cli.command {
        Some(Commands::Trend { input, json }) => {
            trend::run(input, &config.factors, granularity, *json)?;
        }
        Some(Commands::Forecast { input, json }) => {
            forecast::run(input, &config.factors, granularity, *json)?;
        }
        Some(Commands::Factors { json }) => {
            factors::run(&config.factors, *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
