//! Autoplay arena: run many seeded games with one strategy and aggregate
//! score statistics. Games run in parallel via rayon; each game is
//! deterministic for its seed.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::engine::bot_strategy::BotStrategy;
use crate::engine::config::EngineConfig;
use crate::engine::session::Session;
use crate::error::{ConfigError, RuleError};
use crate::game::types::Outcome;

/// Outcome of one autoplay game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub seed: u64,
    pub final_score: u64,
    pub placements: u32,
    pub lines_cleared: u32,
    /// False if the turn cap was hit before game over.
    pub finished: bool,
    pub duration_ms: f64,
}

/// Aggregated results from an arena run.
#[derive(Debug, Clone)]
pub struct ArenaResult {
    pub strategy: String,
    pub games: Vec<GameRecord>,
}

impl ArenaResult {
    pub fn num_games(&self) -> usize {
        self.games.len()
    }

    pub fn avg_score(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        self.games.iter().map(|g| g.final_score as f64).sum::<f64>() / self.games.len() as f64
    }

    pub fn score_stddev(&self) -> f64 {
        if self.games.len() < 2 {
            return 0.0;
        }
        let avg = self.avg_score();
        let variance = self
            .games
            .iter()
            .map(|g| (g.final_score as f64 - avg).powi(2))
            .sum::<f64>()
            / (self.games.len() - 1) as f64;
        variance.sqrt()
    }

    pub fn max_score(&self) -> u64 {
        self.games.iter().map(|g| g.final_score).max().unwrap_or(0)
    }

    pub fn avg_placements(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        self.games.iter().map(|g| g.placements as f64).sum::<f64>() / self.games.len() as f64
    }

    pub fn summary(&self) -> String {
        let mut lines = vec![format!(
            "Arena Results: {} ({} games)",
            self.strategy,
            self.num_games()
        )];
        lines.push("=".repeat(60));
        lines.push(format!(
            "  score: avg={:.1} +/- {:.1}  max={}",
            self.avg_score(),
            self.score_stddev(),
            self.max_score()
        ));
        lines.push(format!("  placements: avg={:.1}", self.avg_placements()));
        let unfinished = self.games.iter().filter(|g| !g.finished).count();
        if unfinished > 0 {
            lines.push(format!("  hit turn cap: {unfinished}"));
        }
        if !self.games.is_empty() {
            let total_ms: f64 = self.games.iter().map(|g| g.duration_ms).sum();
            lines.push(format!(
                "  Avg game: {:.1}ms  |  Total CPU: {:.1}s",
                total_ms / self.games.len() as f64,
                total_ms / 1000.0
            ));
        }
        lines.join("\n")
    }
}

/// Arena failures: bad configuration, or a strategy that broke the
/// rule engine's contract.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("strategy produced an invalid action: {0}")]
    Rule(#[from] RuleError),

    #[error("strategy '{strategy}' chose a move the engine rejected (seed {seed}): {outcome:?}")]
    RejectedMove {
        strategy: String,
        seed: u64,
        outcome: Outcome,
    },
}

/// Run `num_games` autoplay games with seeds `base_seed..base_seed + n`.
pub fn run_arena(
    config: &EngineConfig,
    strategy: &dyn BotStrategy,
    num_games: usize,
    base_seed: u64,
    max_turns: usize,
) -> Result<ArenaResult, ArenaError> {
    config.validate()?;
    let games = (0..num_games)
        .into_par_iter()
        .map(|i| play_one_game(config, strategy, base_seed + i as u64, max_turns))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ArenaResult {
        strategy: strategy.name().to_string(),
        games,
    })
}

/// Play one game to completion (or the turn cap) with a single strategy.
pub fn play_one_game(
    config: &EngineConfig,
    strategy: &dyn BotStrategy,
    seed: u64,
    max_turns: usize,
) -> Result<GameRecord, ArenaError> {
    let t0 = Instant::now();
    let grid = config.build_grid()?;
    let engine = config.build_engine(&grid);
    let source = config.figure_generator(seed)?;
    let mut session = Session::start(engine, grid, source);
    let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);

    for _ in 0..max_turns {
        if session.is_over() {
            break;
        }
        let Some(chosen) = strategy.choose_move(session.engine(), session.state(), &mut rng) else {
            break;
        };
        for action in chosen.to_actions() {
            let (outcome, _) = session.apply(&action)?;
            if !outcome.is_accepted() {
                tracing::warn!(seed, ?action, ?outcome, "strategy chose a rejected action");
                return Err(ArenaError::RejectedMove {
                    strategy: strategy.name().to_string(),
                    seed,
                    outcome,
                });
            }
        }
    }

    let state = session.state();
    let record = GameRecord {
        seed,
        final_score: state.score.total(),
        placements: state.score.placements(),
        lines_cleared: state.score.lines_cleared_total(),
        finished: state.terminal,
        duration_ms: t0.elapsed().as_secs_f64() * 1000.0,
    };
    tracing::debug!(seed, score = record.final_score, placements = record.placements, "game finished");
    Ok(record)
}
