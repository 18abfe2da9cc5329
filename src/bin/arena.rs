//! Arena CLI: run batches of autoplay games and report score statistics.
//!
//! Usage:
//!   cargo run --release --bin arena -- --games 200 --strategy greedy
//!   cargo run --release --bin arena -- --games 500 --strategy random --seed 7

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hexfall_engine::engine::arena::run_arena;
use hexfall_engine::engine::bot_strategy::strategy_by_name;
use hexfall_engine::engine::config::{load_config, load_default_config};

#[derive(Parser)]
#[command(name = "arena", about = "Run autoplay arena experiments for hexfall")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    games: usize,

    /// Base random seed; game i uses seed + i
    #[arg(long, default_value = "42", env = "HEXFALL_SEED")]
    seed: u64,

    /// Strategies to compare, comma-separated ("greedy", "random")
    #[arg(long, default_value = "greedy,random", value_delimiter = ',')]
    strategy: Vec<String>,

    /// Placement cap per game
    #[arg(long, default_value = "2000")]
    max_turns: usize,

    /// Path to hexfall.toml
    #[arg(long, env = "HEXFALL_CONFIG")]
    config: Option<PathBuf>,

    /// Also print per-game records
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let config = match cli.config {
        Some(ref path) => load_config(path)?,
        None => load_default_config(),
    };

    for name in &cli.strategy {
        let strategy = strategy_by_name(name).ok_or_else(|| format!("Unknown strategy: {name}"))?;
        tracing::info!(strategy = name.as_str(), games = cli.games, seed = cli.seed, "running arena");
        let result = run_arena(&config, strategy.as_ref(), cli.games, cli.seed, cli.max_turns)?;

        if cli.verbose {
            for g in &result.games {
                println!(
                    "  seed={:<6} score={:<7} placements={:<5} lines={:<4} finished={}",
                    g.seed, g.final_score, g.placements, g.lines_cleared, g.finished
                );
            }
        }
        println!("{}\n", result.summary());
    }

    Ok(())
}
