//! CLI entry point for fluidtel
//!
//! Replays a captured FluidNC session:
//! ```bash
//! fluidtel replay session.log --settings settings.txt
//! cat session.log | fluidtel replay
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fluidtel::{init_logging_with, replay, Config, FluidNCSettings};
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fluidtel")]
#[command(about = "FluidNC telemetry interpreter", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (.toml or .json); defaults to the platform config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay captured controller output and print status snapshots as JSON lines
    Replay {
        /// Captured controller output; reads stdin when omitted
        file: Option<PathBuf>,

        /// Captured `$S` settings dump used for capability detection
        #[arg(long)]
        settings: Option<PathBuf>,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => match Config::default_path().filter(|p| p.exists()) {
            Some(path) => Config::load_from_file(&path)
                .with_context(|| format!("loading config {}", path.display())),
            None => Ok(Config::default()),
        },
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    config.logging.json |= cli.log_json;
    init_logging_with(&config.logging)?;

    tracing::debug!("fluidtel {} built {}", fluidtel::VERSION, fluidtel::BUILD_DATE);

    match cli.command {
        Commands::Replay { file, settings } => {
            let units = config.reporting.units()?;

            let settings = match settings {
                Some(path) => {
                    let mut store = FluidNCSettings::new();
                    store
                        .load_from_file(&path)
                        .with_context(|| format!("loading settings {}", path.display()))?;
                    Some(store)
                }
                None => None,
            };
            let provider = settings
                .as_ref()
                .map(|s| s as &dyn fluidtel::FirmwareSettingsProvider);

            let stdout = std::io::stdout();
            let mut output = stdout.lock();
            match file {
                Some(path) => {
                    let input = std::fs::File::open(&path)
                        .with_context(|| format!("opening {}", path.display()))?;
                    replay(BufReader::new(input), &mut output, units, provider)?;
                }
                None => {
                    replay(std::io::stdin().lock(), &mut output, units, provider)?;
                }
            }
        }
    }

    Ok(())
}
