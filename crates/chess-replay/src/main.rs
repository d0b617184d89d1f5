mod config;
mod replay;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chess_rules::{perft, perft_divide, GameState};
use clap::{Parser, Subcommand};
use config::ReplayConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess-replay")]
#[command(about = "Replay scripted chess games and count move trees")]
struct Cli {
    /// Path to the scenario file
    #[arg(short, long, global = true, default_value = "replay.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a named scenario from the config file
    Run {
        /// Scenario name
        scenario: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the scenarios in the config file
    List,
    /// Count leaf nodes of the legal move tree
    Perft {
        /// Search depth in plies
        depth: u32,
        /// Starting position (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,
        /// Print the count below each root move
        #[arg(long)]
        divide: bool,
    },
}

fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("invalid log filter {:?}", default_filter))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ReplayConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    init_tracing(&config.log_filter)?;

    match cli.command {
        Commands::Run { scenario, json } => {
            let entry = config.scenario(&scenario)?;
            if let Some(description) = &entry.description {
                tracing::info!("{}: {}", scenario, description);
            }
            let report = replay::run_scenario(&scenario, entry)
                .with_context(|| format!("scenario {} failed", scenario))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.to_text());
            }
        }
        Commands::List => {
            if config.scenarios.is_empty() {
                println!("No scenarios in {}", cli.config.display());
            }
            for (name, entry) in &config.scenarios {
                match &entry.description {
                    Some(description) => println!("{:<20} {}", name, description),
                    None => println!("{}", name),
                }
            }
        }
        Commands::Perft { depth, fen, divide } => {
            let state = match &fen {
                Some(fen) => GameState::from_fen(fen).context("invalid FEN")?,
                None => GameState::new(),
            };
            let started = Instant::now();
            let nodes = if divide {
                let counts = perft_divide(&state, depth);
                for (mv, count) in &counts {
                    println!("{}: {}", mv, count);
                }
                counts.iter().map(|(_, count)| count).sum()
            } else {
                perft(&state, depth)
            };
            println!("Nodes searched: {}", nodes);
            tracing::info!(depth, nodes, elapsed_ms = started.elapsed().as_millis() as u64, "perft done");
        }
    }

    Ok(())
}
