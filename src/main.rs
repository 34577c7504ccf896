use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{LevelFilter, info};
use simplelog::{Config, WriteLogger};
use snake_rival::game::GameConfig;
use snake_rival::modes::{HumanMode, WatchMode};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "snake_rival")]
#[command(version, about = "Snake game against a heuristic rival snake")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON file with game settings; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed RNG seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Simulation ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Where to write the log (the terminal belongs to the game)
    #[arg(long, default_value = "snake_rival.log")]
    log_file: PathBuf,

    /// Log level filter
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play with the keyboard against the rival
    Human,
    /// Let the computer steer both snakes
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging before anything else
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    let config = build_config(&cli)?;
    info!("starting with {:?}", config);

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Watch => {
            let mut watch_mode = WatchMode::new(config)?;
            watch_mode.run().await?;
        }
    }

    info!("bye");
    Ok(())
}

/// File settings first, then command-line overrides
fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(rate) = cli.tick_rate {
        config.tick_rate_hz = rate;
    }

    config.validate()?;
    Ok(config)
}
