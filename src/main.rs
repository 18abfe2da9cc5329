use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use hexfall_engine::engine::bot_strategy::strategy_by_name;
use hexfall_engine::engine::config::{load_config, load_default_config};
use hexfall_engine::engine::session::Session;

#[derive(Parser)]
#[command(name = "hexfall-engine", about = "Play one seeded hexfall game with a bot")]
struct Cli {
    /// Random seed for figure generation and the bot
    #[arg(short, long, default_value = "42", env = "HEXFALL_SEED")]
    seed: u64,

    /// Bot strategy: "greedy" or "random"
    #[arg(long, default_value = "greedy")]
    strategy: String,

    /// Stop after this many placements even if the game is not over
    #[arg(long, default_value = "1000")]
    max_turns: usize,

    /// Path to hexfall.toml (default: auto-discover)
    #[arg(long, env = "HEXFALL_CONFIG")]
    config: Option<PathBuf>,

    /// Print every event as a JSON line
    #[arg(long)]
    events: bool,
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
    let strategy = strategy_by_name(&cli.strategy)
        .ok_or_else(|| format!("Unknown strategy: {}", cli.strategy))?;

    let grid = config.build_grid()?;
    let engine = config.build_engine(&grid);
    let source = config.figure_generator(cli.seed)?;
    let mut session = Session::start(engine, grid, source);
    let mut rng = StdRng::seed_from_u64(cli.seed);

    tracing::info!(seed = cli.seed, strategy = strategy.name(), "starting game");

    let mut turns = 0;
    'game: while !session.is_over() && turns < cli.max_turns {
        let Some(chosen) = strategy.choose_move(session.engine(), session.state(), &mut rng) else {
            break;
        };
        for action in chosen.to_actions() {
            let (outcome, new_events) = session.apply(&action)?;
            if cli.events {
                for event in new_events {
                    println!("{}", serde_json::to_string(event)?);
                }
            }
            if !outcome.is_accepted() {
                tracing::warn!(?action, ?outcome, "bot action rejected, stopping");
                break 'game;
            }
        }
        turns += 1;
    }

    let state = session.state();
    tracing::info!(
        score = state.score.total(),
        placements = state.score.placements(),
        lines = state.score.lines_cleared_total(),
        game_over = state.terminal,
        "finished"
    );
    println!("{}", serde_json::to_string_pretty(state)?);

    Ok(())
}
