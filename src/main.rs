use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use smogwatch::{serve, AppConfig, AppState, Pollutant};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Air-quality dashboard over precomputed station time series")]
struct Cli {
    /// TOML configuration file. Defaults to ./config.toml when present.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP dashboard.
    Serve {
        /// Overrides `server.port` from the configuration.
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Load every dataset and print what is available.
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = AppConfig::resolve(cli.config.as_deref()).context("Loading configuration")?;

    let state = AppState::load(&config.data)
        .await
        .with_context(|| format!("Loading data from {}", config.data.dir.display()))?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(&config.server, state).await?;
        }
        Command::Summary => print_summary(&state),
    }

    info!("Done");
    Ok(())
}

fn print_summary(state: &AppState) {
    for pollutant in Pollutant::ALL {
        match state.store.get(pollutant) {
            Some(dataset) => println!(
                "{:<12} {:>4} stations {:>6} rows  [{}]",
                pollutant.name(),
                dataset.stations().len(),
                dataset.height(),
                pollutant.unit()
            ),
            None => println!("{:<12} unavailable", pollutant.name()),
        }
    }

    let locations = state.index.all_locations();
    println!(
        "{} stations in metadata across {} locations",
        state.index.len(),
        locations.len()
    );
}
