//! Bot strategy trait and implementations for autoplay.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::game::hex::AxialCoord;
use crate::game::rules::RuleEngine;
use crate::game::types::{FigureId, GameState, Move};

/// A bot strategy picks the next move for a snapshot, or None when the
/// game is over.
pub trait BotStrategy: Send + Sync {
    fn name(&self) -> &str;

    fn choose_move(&self, engine: &RuleEngine, state: &GameState, rng: &mut StdRng) -> Option<Move>;
}

/// Picks a uniformly random legal move.
pub struct RandomStrategy;

impl BotStrategy for RandomStrategy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&self, engine: &RuleEngine, state: &GameState, rng: &mut StdRng) -> Option<Move> {
        engine.legal_moves(state).choose(rng).copied()
    }
}

/// Maximises the immediate score delta; ties go to the placement touching
/// the most occupied cells, then to the first candidate.
pub struct GreedyStrategy;

impl GreedyStrategy {
    fn rotated_state(state: &GameState, m: Move) -> GameState {
        GameState {
            figures: state
                .figures
                .iter()
                .map(|f| if f.id == m.figure_id { f.rotated(m.rotation_steps) } else { f.clone() })
                .collect(),
            ..state.clone()
        }
    }

    fn contact(state: &GameState, cells: &[AxialCoord]) -> usize {
        cells
            .iter()
            .flat_map(|c| c.neighbors())
            .filter(|&n| state.grid.is_occupied(n))
            .count()
    }
}

impl BotStrategy for GreedyStrategy {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_move(&self, engine: &RuleEngine, state: &GameState, _rng: &mut StdRng) -> Option<Move> {
        let mut best: Option<((u64, usize), Move)> = None;
        // Moves arrive grouped by (figure, rotation); rebuild the rotated
        // snapshot only when the group changes.
        let mut group: Option<(FigureId, u8)> = None;
        let mut snapshot = state.clone();

        for m in engine.legal_moves(state) {
            if group != Some((m.figure_id, m.rotation_steps)) {
                group = Some((m.figure_id, m.rotation_steps));
                snapshot = Self::rotated_state(state, m);
            }
            let Ok(Some(preview)) = engine.preview_placement(&snapshot, m.figure_id, m.anchor) else {
                continue;
            };
            let key = (preview.score_delta(), Self::contact(state, &preview.cells));
            if best.as_ref().map_or(true, |(k, _)| key > *k) {
                best = Some((key, m));
            }
        }

        best.map(|(_, m)| m)
    }
}

/// Look up a strategy by CLI name.
pub fn strategy_by_name(name: &str) -> Option<Box<dyn BotStrategy>> {
    match name {
        "random" => Some(Box::new(RandomStrategy)),
        "greedy" => Some(Box::new(GreedyStrategy)),
        _ => None,
    }
}
